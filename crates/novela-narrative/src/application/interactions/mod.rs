//! Interaction strategies, one per scene kind.
//!
//! Each strategy sets up its controls when a scene is rendered and handles
//! the activations those controls produce. Strategies never navigate; they
//! hand a transition request back to the navigator.

use chrono::TimeDelta;
use novela_core::clock::Clock;
use novela_core::error::DomainError;
use novela_core::rng::DeterministicRng;
use novela_core::surface::Surface;
use novela_story::domain::scene::{SceneKind, Transition};
use uuid::Uuid;

use crate::domain::aggregates::{Stage, StorySession};

pub mod choice;
pub mod free_text;
pub mod linear;
pub mod ordering;

/// Collaborators for handling one activation.
pub struct Turn<'a> {
    pub session: &'a mut StorySession,
    pub surface: &'a mut dyn Surface,
    pub clock: &'a dyn Clock,
    pub correlation_id: Uuid,
}

/// Sets up the controls for `kind` on a freshly reset surface and returns
/// the stage the scene starts in.
pub(crate) fn present(
    kind: &SceneKind,
    surface: &mut dyn Surface,
    rng: &mut dyn DeterministicRng,
) -> Stage {
    match kind {
        SceneKind::Choice { choices } => choice::present(choices, surface),
        SceneKind::FreeText { .. } => free_text::present(surface),
        SceneKind::Ordering { steps, .. } => ordering::present(steps, surface, rng),
        SceneKind::Linear { .. } => Stage::Narrating,
        SceneKind::Inert => Stage::DeadEnd,
    }
}

/// Shows the scoring result, clears the question and schedules the continue
/// control `delay` from now.
pub(crate) fn conclude(
    turn: &mut Turn<'_>,
    message: &str,
    next_scene: Option<&Transition>,
    delay: TimeDelta,
) -> Result<(), DomainError> {
    turn.surface.set_narrative(message);
    turn.surface.set_question("");
    let due_at = turn.clock.deadline_after(delay);
    turn.session
        .schedule_reveal(due_at, next_scene.cloned(), turn.correlation_id, turn.clock)
}
