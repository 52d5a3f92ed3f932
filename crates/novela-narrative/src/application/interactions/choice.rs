//! Multiple choice.

use novela_core::error::DomainError;
use novela_core::surface::{ControlAction, Surface};
use novela_story::domain::scene::{Choice, Transition};

use super::Turn;
use crate::domain::aggregates::Stage;

/// One option control per choice, in list order. No choices is a dead end.
pub(crate) fn present(choices: &[Choice], surface: &mut dyn Surface) -> Stage {
    for (index, choice) in choices.iter().enumerate() {
        surface.append_option(&choice.text, ControlAction::Choice(index));
    }
    if choices.is_empty() {
        Stage::DeadEnd
    } else {
        Stage::Choosing
    }
}

/// Picks the choice at `index` and returns where it leads. The score is not
/// touched.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no choices are on screen or `index`
/// is out of range.
pub fn select(
    turn: &mut Turn<'_>,
    choices: &[Choice],
    index: usize,
) -> Result<Option<Transition>, DomainError> {
    let target = choices.get(index).and_then(|c| c.next_scene.clone());
    turn.session.select_choice(
        index,
        choices.len(),
        target.clone(),
        turn.correlation_id,
        turn.clock,
    )?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use novela_core::surface::Screen;
    use novela_story::domain::story::SceneRef;
    use novela_test_support::FixedClock;
    use uuid::Uuid;

    use crate::domain::aggregates::StorySession;

    fn choices() -> Vec<Choice> {
        vec![
            Choice {
                text: "Left".into(),
                next_scene: Some(Transition::Scene("s1".into())),
            },
            Choice {
                text: "Right".into(),
                next_scene: Some(Transition::Final),
            },
        ]
    }

    #[test]
    fn test_present_renders_one_control_per_choice() {
        // Arrange
        let mut screen = Screen::new();

        // Act
        let stage = present(&choices(), &mut screen);

        // Assert
        assert_eq!(stage, Stage::Choosing);
        assert_eq!(screen.option_labels(), vec!["Left", "Right"]);
        assert_eq!(screen.options[1].action, ControlAction::Choice(1));
    }

    #[test]
    fn test_present_empty_choices_is_dead_end() {
        let mut screen = Screen::new();

        let stage = present(&[], &mut screen);

        assert_eq!(stage, Stage::DeadEnd);
        assert!(screen.options.is_empty());
    }

    #[test]
    fn test_select_returns_target_without_scoring() {
        // Arrange
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let mut screen = Screen::new();
        let mut session = StorySession::new(Uuid::new_v4());
        session.enter_scene(SceneRef::Intro, Stage::Choosing, Uuid::new_v4(), &clock);
        let mut turn = Turn {
            session: &mut session,
            surface: &mut screen,
            clock: &clock,
            correlation_id: Uuid::new_v4(),
        };

        // Act
        let target = select(&mut turn, &choices(), 1).unwrap();
        let out_of_range = select(&mut turn, &choices(), 2);

        // Assert
        assert_eq!(target, Some(Transition::Final));
        assert!(matches!(out_of_range, Err(DomainError::Validation(_))));
        assert_eq!(session.score(), 0);
    }
}
