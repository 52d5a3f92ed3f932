//! Free-text answer check.

use chrono::TimeDelta;
use novela_core::error::DomainError;
use novela_core::surface::Surface;
use novela_story::domain::scene::{Scene, Transition};
use tracing::warn;

use super::{Turn, conclude};
use crate::domain::aggregates::Stage;

/// Shown after a correct answer when the scene has no `transitionSuccess`.
pub const CORRECT_MESSAGE: &str = "Correcto.";

/// Shown after a wrong answer when the scene has no `transitionFail`.
pub const INCORRECT_MESSAGE: &str = "Incorrecto.";

pub(crate) fn present(surface: &mut dyn Surface) -> Stage {
    surface.show_input(true);
    Stage::AwaitingAnswer
}

/// Scores `input` against `answer`: trimmed, exact and case-sensitive. A
/// correct answer adds one point. The answer field is hidden and disabled at
/// once; the continue control follows after `delay`.
///
/// Returns `Ok(None)` without touching anything when the scene has no answer.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the answer was already submitted.
pub fn submit(
    turn: &mut Turn<'_>,
    scene: &Scene,
    answer: Option<&str>,
    next_scene: Option<&Transition>,
    input: &str,
    delay: TimeDelta,
) -> Result<Option<bool>, DomainError> {
    let Some(answer) = answer else {
        warn!(scene_id = %scene.id, "scene has no answer, submit ignored");
        return Ok(None);
    };

    let correct = turn
        .session
        .submit_answer(input, answer, turn.correlation_id, turn.clock)?;
    turn.surface.enable_input(false);
    turn.surface.show_input(false);

    let message = if correct {
        scene.transition_success.as_deref().unwrap_or(CORRECT_MESSAGE)
    } else {
        scene.transition_fail.as_deref().unwrap_or(INCORRECT_MESSAGE)
    };
    conclude(turn, message, next_scene, delay)?;
    Ok(Some(correct))
}
