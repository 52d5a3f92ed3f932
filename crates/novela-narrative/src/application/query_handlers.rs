//! Query handlers for the Narrative Orchestration context.
//!
//! Read-only view DTOs of a session, for logging and exit summaries.

use novela_core::aggregate::AggregateRoot;
use novela_story::domain::story::SceneRef;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::{Stage, StorySession};
use crate::domain::ending::EndingTier;

/// Read-only view of a story session aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// The scene on screen, if any.
    pub scene: Option<SceneRef>,
    /// Cumulative score.
    pub score: u32,
    /// Interaction stage name.
    pub stage: &'static str,
    /// The ending reached, if the story is over.
    pub ending: Option<EndingTier>,
    /// Current version (event count).
    pub version: i64,
}

/// Builds the view of `session`.
#[must_use]
pub fn session_view(session: &StorySession) -> SessionView {
    let ending = match session.stage() {
        Stage::Ended(tier) => Some(*tier),
        _ => None,
    };
    SessionView {
        session_id: session.aggregate_id(),
        scene: session.scene().cloned(),
        score: session.score(),
        stage: session.stage().label(),
        ending,
        version: session.version(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use novela_story::domain::story::SceneRef;
    use novela_test_support::FixedClock;
    use uuid::Uuid;

    use crate::application::query_handlers::session_view;
    use crate::domain::aggregates::{Stage, StorySession};
    use crate::domain::ending::EndingTier;

    #[test]
    fn test_session_view_reflects_state() {
        // Arrange
        let session_id = Uuid::new_v4();
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let mut session = StorySession::new(session_id);
        session.enter_scene(
            SceneRef::Named("riddle".into()),
            Stage::AwaitingAnswer,
            Uuid::new_v4(),
            &clock,
        );
        session
            .submit_answer("eco", "eco", Uuid::new_v4(), &clock)
            .unwrap();

        // Act
        let view = session_view(&session);

        // Assert
        assert_eq!(view.session_id, session_id);
        assert_eq!(view.scene, Some(SceneRef::Named("riddle".into())));
        assert_eq!(view.score, 1);
        assert_eq!(view.stage, "scored");
        assert_eq!(view.ending, None);
        assert_eq!(view.version, 2);
    }

    #[test]
    fn test_session_view_reports_ending() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let mut session = StorySession::new(Uuid::new_v4());
        session.reach_ending(Uuid::new_v4(), &clock);

        let view = session_view(&session);

        assert_eq!(view.ending, Some(EndingTier::Bad));
        assert_eq!(view.scene, None);
        assert_eq!(view.stage, "ended");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["ending"], "Bad");
    }
}
