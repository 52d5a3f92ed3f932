//! Step-ordering puzzle.

use chrono::TimeDelta;
use novela_core::error::DomainError;
use novela_core::rng::DeterministicRng;
use novela_core::surface::{ControlAction, Surface};
use novela_story::domain::scene::{Scene, Transition};

use super::{Turn, conclude};
use crate::domain::aggregates::Stage;
use crate::domain::ordering::{CONFIRM_LABEL, presentation_order, progress_line};

/// Shown after a correct order when the scene has no `transitionSuccess`.
pub const CORRECT_MESSAGE: &str = "El orden es correcto.";

/// Shown after a wrong order when the scene has no `transitionFail`.
pub const INCORRECT_MESSAGE: &str = "El orden no es correcto.";

/// Steps in shuffled order, then the confirm control, then the empty
/// progress line.
pub(crate) fn present(
    steps: &[String],
    surface: &mut dyn Surface,
    rng: &mut dyn DeterministicRng,
) -> Stage {
    let presentation = presentation_order(steps.len(), rng);
    for &step in &presentation {
        surface.append_option(&steps[step], ControlAction::Step(step));
    }
    surface.append_option(CONFIRM_LABEL, ControlAction::ConfirmOrder);
    surface.set_order_display(Some(progress_line(steps, &[]).as_str()));

    Stage::Ordering {
        presentation,
        picked: Vec::new(),
    }
}

/// Appends `step` (an original index) to the picked order and disables its
/// control for the rest of the scene.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no puzzle is on screen or the step
/// was already picked.
pub fn pick(turn: &mut Turn<'_>, steps: &[String], step: usize) -> Result<(), DomainError> {
    turn.session
        .pick_step(step, turn.correlation_id, turn.clock)?;
    turn.surface.enable_option(ControlAction::Step(step), false);
    let line = progress_line(steps, turn.session.picked_steps());
    turn.surface.set_order_display(Some(line.as_str()));
    Ok(())
}

/// Scores the picked order. Every control is disabled and the options
/// container removed; the continue control follows after `delay`.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no puzzle is on screen or the order
/// was already confirmed.
pub fn confirm(
    turn: &mut Turn<'_>,
    scene: &Scene,
    step_count: usize,
    correct_order: &[usize],
    next_scene: Option<&Transition>,
    delay: TimeDelta,
) -> Result<bool, DomainError> {
    let correct = turn
        .session
        .confirm_order(correct_order, turn.correlation_id, turn.clock)?;
    for step in 0..step_count {
        turn.surface.enable_option(ControlAction::Step(step), false);
    }
    turn.surface.enable_option(ControlAction::ConfirmOrder, false);
    turn.surface.clear_options();

    let message = if correct {
        scene.transition_success.as_deref().unwrap_or(CORRECT_MESSAGE)
    } else {
        scene.transition_fail.as_deref().unwrap_or(INCORRECT_MESSAGE)
    };
    conclude(turn, message, next_scene, delay)?;
    Ok(correct)
}
