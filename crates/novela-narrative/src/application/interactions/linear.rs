//! Plain continue.

use novela_core::error::DomainError;
use novela_story::domain::scene::Transition;

use super::Turn;

/// Shows the continue control right away. No score effect.
///
/// # Errors
///
/// Returns `DomainError::Validation` unless a linear scene was just entered.
pub fn reveal(turn: &mut Turn<'_>, next_scene: &Transition) -> Result<(), DomainError> {
    turn.session
        .reveal_continue(Some(next_scene.clone()), turn.correlation_id, turn.clock)?;
    turn.surface.show_next(true);
    Ok(())
}
