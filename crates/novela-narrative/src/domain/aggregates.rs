//! Aggregate roots for the Narrative Orchestration context.

use chrono::{DateTime, Utc};
use novela_core::aggregate::AggregateRoot;
use novela_core::clock::Clock;
use novela_core::error::DomainError;
use novela_core::event::EventMetadata;
use novela_story::domain::scene::Transition;
use novela_story::domain::story::SceneRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ending::EndingTier;
use super::events::{
    AnswerSubmitted, ChoiceSelected, ContinueRevealed, EndingReached, OrderConfirmed,
    RevealScheduled, SceneEntered, SessionEvent, SessionEventKind, StepPicked, TransitionMissed,
};
use super::ordering::is_solved;

/// Interaction state machine of the scene on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Nothing rendered yet.
    Idle,
    /// Choice controls on screen.
    Choosing,
    /// Answer field on screen.
    AwaitingAnswer,
    /// Ordering puzzle on screen.
    Ordering {
        /// Original step indices in display order.
        presentation: Vec<usize>,
        /// Original step indices in pick order.
        picked: Vec<usize>,
    },
    /// Linear scene text on screen.
    Narrating,
    /// Answer or order scored; continue control not shown yet.
    Scored,
    /// Continue control on screen.
    Continuing,
    /// Scene has no exit.
    DeadEnd,
    /// Ending on screen.
    Ended(EndingTier),
}

impl Stage {
    /// Short name used in logs and views.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Choosing => "choosing",
            Self::AwaitingAnswer => "awaiting_answer",
            Self::Ordering { .. } => "ordering",
            Self::Narrating => "narrating",
            Self::Scored => "scored",
            Self::Continuing => "continuing",
            Self::DeadEnd => "dead_end",
            Self::Ended(_) => "ended",
        }
    }
}

/// A scheduled appearance of the continue control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReveal {
    /// When the control appears.
    pub due_at: DateTime<Utc>,
    /// Where continuing leads.
    pub target: Option<Transition>,
}

/// The aggregate root for one play-through: current scene, score and the
/// interaction stage. Lives as long as the page (or process) does; there is
/// no reset other than starting a new session.
///
/// Unlike a persisted aggregate, every recorded event is applied immediately;
/// `uncommitted_events` only buffers them until the caller drains them.
#[derive(Debug)]
pub struct StorySession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// The scene on screen, `None` before the first render and after the ending.
    pub(crate) scene: Option<SceneRef>,
    /// Cumulative score.
    pub(crate) score: u32,
    /// Interaction stage.
    pub(crate) stage: Stage,
    /// Target of the visible continue control.
    pub(crate) continue_target: Option<Transition>,
    /// Continue control waiting for its delay.
    pub(crate) pending_reveal: Option<PendingReveal>,
    /// Recorded events not yet drained.
    uncommitted_events: Vec<SessionEvent>,
}

impl StorySession {
    /// Creates a new session with a zero score.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            scene: None,
            score: 0,
            stage: Stage::Idle,
            continue_target: None,
            pending_reveal: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Correct answers so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Interaction stage of the scene on screen.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Scene on screen; `None` before start and after the ending.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneRef> {
        self.scene.as_ref()
    }

    /// Where the continue control leads once shown.
    #[must_use]
    pub fn continue_target(&self) -> Option<&Transition> {
        self.continue_target.as_ref()
    }

    /// Reveal scheduled after an answer, if any.
    #[must_use]
    pub fn pending_reveal(&self) -> Option<&PendingReveal> {
        self.pending_reveal.as_ref()
    }

    /// Steps picked so far in the ordering puzzle on screen.
    #[must_use]
    pub fn picked_steps(&self) -> &[usize] {
        match &self.stage {
            Stage::Ordering { picked, .. } => picked,
            _ => &[],
        }
    }

    /// Takes every recorded event, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    fn record(&mut self, kind: SessionEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        // TODO: event_id uses Uuid::new_v4(), so two runs with the same seed
        // still differ in event ids. Derive ids from the session RNG instead.
        let event = SessionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.version + 1,
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }

    fn rejected(&self, action: &str) -> DomainError {
        DomainError::Validation(format!(
            "cannot {action} while session {} is {}",
            self.id,
            self.stage.label()
        ))
    }

    /// Puts a scene on screen, producing a `SceneEntered` event. Any pending
    /// reveal of the previous scene is cancelled.
    pub fn enter_scene(
        &mut self,
        scene: SceneRef,
        stage: Stage,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let kind = SessionEventKind::SceneEntered(SceneEntered {
            session_id: self.id,
            scene,
            stage,
        });
        self.record(kind, correlation_id, clock);
    }

    /// Picks a choice, producing a `ChoiceSelected` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no choices are on screen or
    /// `index` is out of range.
    pub fn select_choice(
        &mut self,
        index: usize,
        choice_count: usize,
        target: Option<Transition>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.stage != Stage::Choosing {
            return Err(self.rejected("select a choice"));
        }
        if index >= choice_count {
            return Err(DomainError::Validation(format!(
                "choice {index} out of range ({choice_count} choices)"
            )));
        }

        let kind = SessionEventKind::ChoiceSelected(ChoiceSelected {
            session_id: self.id,
            index,
            target,
        });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Scores a free-text answer, producing an `AnswerSubmitted` event.
    /// Returns whether the trimmed input equals `answer` exactly.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless an answer field is on screen
    /// and has not been submitted yet.
    pub fn submit_answer(
        &mut self,
        input: &str,
        answer: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        if self.stage != Stage::AwaitingAnswer {
            return Err(self.rejected("submit an answer"));
        }

        let correct = input.trim() == answer;
        let kind = SessionEventKind::AnswerSubmitted(AnswerSubmitted {
            session_id: self.id,
            correct,
        });
        self.record(kind, correlation_id, clock);
        Ok(correct)
    }

    /// Picks an ordering step, producing a `StepPicked` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no puzzle is on screen, the step
    /// is not part of it, or it was already picked.
    pub fn pick_step(
        &mut self,
        step: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let Stage::Ordering {
            presentation,
            picked,
        } = &self.stage
        else {
            return Err(self.rejected("pick a step"));
        };
        if !presentation.contains(&step) {
            return Err(DomainError::Validation(format!(
                "step {step} is not part of this puzzle"
            )));
        }
        if picked.contains(&step) {
            return Err(DomainError::Validation(format!(
                "step {step} was already picked"
            )));
        }

        let kind = SessionEventKind::StepPicked(StepPicked {
            session_id: self.id,
            step,
        });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Scores the picked order against `correct_order`, producing an
    /// `OrderConfirmed` event. Returns whether it matched exactly.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no puzzle is on screen.
    pub fn confirm_order(
        &mut self,
        correct_order: &[usize],
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        let Stage::Ordering { picked, .. } = &self.stage else {
            return Err(self.rejected("confirm an order"));
        };

        let picked = picked.clone();
        let correct = is_solved(&picked, correct_order);
        let kind = SessionEventKind::OrderConfirmed(OrderConfirmed {
            session_id: self.id,
            picked,
            correct,
        });
        self.record(kind, correlation_id, clock);
        Ok(correct)
    }

    /// Schedules the continue control, producing a `RevealScheduled` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless an answer or order was just
    /// scored.
    pub fn schedule_reveal(
        &mut self,
        due_at: DateTime<Utc>,
        target: Option<Transition>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.stage != Stage::Scored {
            return Err(self.rejected("schedule a reveal"));
        }

        let kind = SessionEventKind::RevealScheduled(RevealScheduled {
            session_id: self.id,
            due_at,
            target,
        });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Shows the continue control, producing a `ContinueRevealed` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless a linear scene or a scored
    /// interaction is on screen.
    pub fn reveal_continue(
        &mut self,
        target: Option<Transition>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if !matches!(self.stage, Stage::Narrating | Stage::Scored) {
            return Err(self.rejected("reveal the continue control"));
        }

        let kind = SessionEventKind::ContinueRevealed(ContinueRevealed {
            session_id: self.id,
            target,
        });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Fires the pending reveal if it is due. Returns whether it fired.
    pub fn poll_reveal(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        let Some(pending) = &self.pending_reveal else {
            return false;
        };
        if clock.now() < pending.due_at {
            return false;
        }

        let target = pending.target.clone();
        self.reveal_continue(target, correlation_id, clock).is_ok()
    }

    /// Records that a transition led nowhere, producing a `TransitionMissed`
    /// event. Scene, stage and score are unchanged.
    pub fn miss_transition(&mut self, target: String, correlation_id: Uuid, clock: &dyn Clock) {
        let kind = SessionEventKind::TransitionMissed(TransitionMissed {
            session_id: self.id,
            target,
        });
        self.record(kind, correlation_id, clock);
    }

    /// Ends the story at the tier matching the current score, producing an
    /// `EndingReached` event.
    pub fn reach_ending(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> EndingTier {
        let tier = EndingTier::for_score(self.score);
        let kind = SessionEventKind::EndingReached(EndingReached {
            session_id: self.id,
            tier,
            score: self.score,
        });
        self.record(kind, correlation_id, clock);
        tier
    }
}

impl AggregateRoot for StorySession {
    type Event = SessionEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            SessionEventKind::SceneEntered(payload) => {
                self.scene = Some(payload.scene.clone());
                self.stage = payload.stage.clone();
                self.continue_target = None;
                self.pending_reveal = None;
            }
            SessionEventKind::AnswerSubmitted(AnswerSubmitted { correct, .. })
            | SessionEventKind::OrderConfirmed(OrderConfirmed { correct, .. }) => {
                if *correct {
                    self.score = self.score.saturating_add(1);
                }
                self.stage = Stage::Scored;
            }
            SessionEventKind::StepPicked(payload) => {
                if let Stage::Ordering { picked, .. } = &mut self.stage {
                    picked.push(payload.step);
                }
            }
            SessionEventKind::RevealScheduled(payload) => {
                self.pending_reveal = Some(PendingReveal {
                    due_at: payload.due_at,
                    target: payload.target.clone(),
                });
            }
            SessionEventKind::ContinueRevealed(payload) => {
                self.pending_reveal = None;
                self.continue_target = payload.target.clone();
                self.stage = Stage::Continuing;
            }
            SessionEventKind::EndingReached(payload) => {
                self.scene = None;
                self.stage = Stage::Ended(payload.tier);
                self.continue_target = None;
                self.pending_reveal = None;
            }
            SessionEventKind::ChoiceSelected(_) | SessionEventKind::TransitionMissed(_) => {}
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use novela_core::event::DomainEvent;
    use novela_test_support::{FixedClock, ManualClock};

    use crate::domain::events::{
        ANSWER_SUBMITTED_EVENT_TYPE, ENDING_REACHED_EVENT_TYPE, SCENE_ENTERED_EVENT_TYPE,
    };

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn session_at(stage: Stage, clock: &dyn Clock) -> StorySession {
        let mut session = StorySession::new(Uuid::new_v4());
        session.enter_scene(SceneRef::Intro, stage, Uuid::new_v4(), clock);
        session.clear_uncommitted_events();
        session
    }

    #[test]
    fn test_enter_scene_produces_scene_entered_event() {
        // Arrange
        let session_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = fixed_clock();
        let mut session = StorySession::new(session_id);

        // Act
        session.enter_scene(SceneRef::Intro, Stage::Choosing, correlation_id, &clock);

        // Assert
        let events = session.uncommitted_events();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.event_type(), SCENE_ENTERED_EVENT_TYPE);

        let meta = event.metadata();
        assert_eq!(meta.aggregate_id, session_id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.causation_id, correlation_id);
        assert_eq!(meta.occurred_at, clock.0);

        assert_eq!(session.scene(), Some(&SceneRef::Intro));
        assert_eq!(session.stage(), &Stage::Choosing);
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_correct_answer_increments_score_by_one() {
        // Arrange
        let clock = fixed_clock();
        let mut session = session_at(Stage::AwaitingAnswer, &clock);

        // Act
        let correct = session
            .submit_answer("  eco ", "eco", Uuid::new_v4(), &clock)
            .unwrap();

        // Assert
        assert!(correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.stage(), &Stage::Scored);
        assert_eq!(
            session.uncommitted_events()[0].event_type(),
            ANSWER_SUBMITTED_EVENT_TYPE
        );
    }

    #[test]
    fn test_wrong_answer_leaves_score_unchanged() {
        let clock = fixed_clock();
        let mut session = session_at(Stage::AwaitingAnswer, &clock);

        let correct = session
            .submit_answer("Eco", "eco", Uuid::new_v4(), &clock)
            .unwrap();

        assert!(!correct);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_second_submit_is_rejected() {
        // Arrange
        let clock = fixed_clock();
        let mut session = session_at(Stage::AwaitingAnswer, &clock);
        session
            .submit_answer("eco", "eco", Uuid::new_v4(), &clock)
            .unwrap();

        // Act
        let result = session.submit_answer("eco", "eco", Uuid::new_v4(), &clock);

        // Assert
        match result.unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("scored")),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_pick_step_rejects_repeats_and_foreign_steps() {
        // Arrange
        let clock = fixed_clock();
        let mut session = session_at(
            Stage::Ordering {
                presentation: vec![1, 0, 2],
                picked: Vec::new(),
            },
            &clock,
        );
        session.pick_step(2, Uuid::new_v4(), &clock).unwrap();

        // Act
        let repeat = session.pick_step(2, Uuid::new_v4(), &clock);
        let foreign = session.pick_step(7, Uuid::new_v4(), &clock);

        // Assert
        assert!(matches!(repeat, Err(DomainError::Validation(_))));
        assert!(matches!(foreign, Err(DomainError::Validation(_))));
        assert_eq!(session.picked_steps(), &[2]);
    }

    #[test]
    fn test_confirm_order_scores_exact_match_only() {
        // Arrange
        let clock = fixed_clock();
        let ordering = Stage::Ordering {
            presentation: vec![0, 1, 2],
            picked: Vec::new(),
        };
        let mut solved = session_at(ordering.clone(), &clock);
        let mut prefix = session_at(ordering, &clock);
        for step in [2, 0, 1] {
            solved.pick_step(step, Uuid::new_v4(), &clock).unwrap();
        }
        for step in [2, 0] {
            prefix.pick_step(step, Uuid::new_v4(), &clock).unwrap();
        }

        // Act
        let solved_result = solved.confirm_order(&[2, 0, 1], Uuid::new_v4(), &clock);
        let prefix_result = prefix.confirm_order(&[2, 0, 1], Uuid::new_v4(), &clock);

        // Assert
        assert!(solved_result.unwrap());
        assert!(!prefix_result.unwrap());
        assert_eq!(solved.score(), 1);
        assert_eq!(prefix.score(), 0);
    }

    #[test]
    fn test_poll_reveal_fires_only_when_due() {
        // Arrange
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let mut session = session_at(Stage::AwaitingAnswer, &clock);
        session
            .submit_answer("x", "eco", Uuid::new_v4(), &clock)
            .unwrap();
        let due_at = clock.deadline_after(TimeDelta::milliseconds(1000));
        session
            .schedule_reveal(due_at, Some(Transition::Final), Uuid::new_v4(), &clock)
            .unwrap();

        // Act & Assert
        clock.advance(TimeDelta::milliseconds(999));
        assert!(!session.poll_reveal(Uuid::new_v4(), &clock));
        assert_eq!(session.stage(), &Stage::Scored);

        clock.advance(TimeDelta::milliseconds(1));
        assert!(session.poll_reveal(Uuid::new_v4(), &clock));
        assert_eq!(session.stage(), &Stage::Continuing);
        assert_eq!(session.continue_target(), Some(&Transition::Final));
        assert!(session.pending_reveal().is_none());
    }

    #[test]
    fn test_entering_a_scene_cancels_pending_reveal() {
        // Arrange
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let mut session = session_at(Stage::AwaitingAnswer, &clock);
        session
            .submit_answer("eco", "eco", Uuid::new_v4(), &clock)
            .unwrap();
        let due_at = clock.deadline_after(TimeDelta::milliseconds(1000));
        session
            .schedule_reveal(due_at, Some(Transition::Final), Uuid::new_v4(), &clock)
            .unwrap();

        // Act
        session.enter_scene(
            SceneRef::Named("elsewhere".into()),
            Stage::DeadEnd,
            Uuid::new_v4(),
            &clock,
        );
        clock.advance(TimeDelta::seconds(5));

        // Assert
        assert!(session.pending_reveal().is_none());
        assert!(!session.poll_reveal(Uuid::new_v4(), &clock));
        assert_eq!(session.stage(), &Stage::DeadEnd);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_reach_ending_uses_score_tier_and_rejects_further_commands() {
        // Arrange
        let clock = fixed_clock();
        let mut session = session_at(Stage::Choosing, &clock);

        // Act
        let tier = session.reach_ending(Uuid::new_v4(), &clock);

        // Assert
        assert_eq!(tier, EndingTier::Bad);
        assert_eq!(session.stage(), &Stage::Ended(EndingTier::Bad));
        assert_eq!(
            session.uncommitted_events()[0].event_type(),
            ENDING_REACHED_EVENT_TYPE
        );
        assert!(
            session
                .select_choice(0, 2, None, Uuid::new_v4(), &clock)
                .is_err()
        );
    }

    #[test]
    fn test_drain_events_empties_buffer_in_order() {
        let clock = fixed_clock();
        let mut session = StorySession::new(Uuid::new_v4());
        session.enter_scene(SceneRef::Intro, Stage::Narrating, Uuid::new_v4(), &clock);
        session
            .reveal_continue(Some(Transition::Final), Uuid::new_v4(), &clock)
            .unwrap();

        let drained = session.drain_events();

        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].metadata.sequence_number, 1);
        assert_eq!(drained[1].metadata.sequence_number, 2);
        assert!(session.uncommitted_events().is_empty());
    }
}
