//! Domain events for the Narrative Orchestration context.

use chrono::{DateTime, Utc};
use novela_core::event::{DomainEvent, EventMetadata};
use novela_story::domain::scene::Transition;
use novela_story::domain::story::SceneRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregates::Stage;
use super::ending::EndingTier;

/// Event type for `SceneEntered`.
pub const SCENE_ENTERED_EVENT_TYPE: &str = "narrative.scene_entered";
/// Event type for `ChoiceSelected`.
pub const CHOICE_SELECTED_EVENT_TYPE: &str = "narrative.choice_selected";
/// Event type for `AnswerSubmitted`.
pub const ANSWER_SUBMITTED_EVENT_TYPE: &str = "narrative.answer_submitted";
/// Event type for `StepPicked`.
pub const STEP_PICKED_EVENT_TYPE: &str = "narrative.step_picked";
/// Event type for `OrderConfirmed`.
pub const ORDER_CONFIRMED_EVENT_TYPE: &str = "narrative.order_confirmed";
/// Event type for `RevealScheduled`.
pub const REVEAL_SCHEDULED_EVENT_TYPE: &str = "narrative.reveal_scheduled";
/// Event type for `ContinueRevealed`.
pub const CONTINUE_REVEALED_EVENT_TYPE: &str = "narrative.continue_revealed";
/// Event type for `TransitionMissed`.
pub const TRANSITION_MISSED_EVENT_TYPE: &str = "narrative.transition_missed";
/// Event type for `EndingReached`.
pub const ENDING_REACHED_EVENT_TYPE: &str = "narrative.ending_reached";

/// Emitted when a scene is rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntered {
    /// The session identifier.
    pub session_id: Uuid,
    /// The scene now on screen.
    pub scene: SceneRef,
    /// Interaction stage the scene starts in.
    pub stage: Stage,
}

/// Emitted when the player picks a multiple-choice entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceSelected {
    /// The session identifier.
    pub session_id: Uuid,
    /// Position of the picked choice.
    pub index: usize,
    /// Where the choice leads.
    pub target: Option<Transition>,
}

/// Emitted when a free-text answer is scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmitted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Whether the trimmed input matched the answer.
    pub correct: bool,
}

/// Emitted when an ordering step is picked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepPicked {
    /// The session identifier.
    pub session_id: Uuid,
    /// Original index of the step.
    pub step: usize,
}

/// Emitted when the picked order is confirmed and scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmed {
    /// The session identifier.
    pub session_id: Uuid,
    /// The order as picked.
    pub picked: Vec<usize>,
    /// Whether it matched the correct order exactly.
    pub correct: bool,
}

/// Emitted when the continue control is due to appear later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealScheduled {
    /// The session identifier.
    pub session_id: Uuid,
    /// When the continue control appears.
    pub due_at: DateTime<Utc>,
    /// Where continuing leads.
    pub target: Option<Transition>,
}

/// Emitted when the continue control becomes visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinueRevealed {
    /// The session identifier.
    pub session_id: Uuid,
    /// Where continuing leads.
    pub target: Option<Transition>,
}

/// Emitted when a transition names a scene that does not exist. The screen
/// is left as it was.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionMissed {
    /// The session identifier.
    pub session_id: Uuid,
    /// The requested scene id; empty when the exit had no `nextScene`.
    pub target: String,
}

/// Emitted when the story ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndingReached {
    /// The session identifier.
    pub session_id: Uuid,
    /// The resolved tier.
    pub tier: EndingTier,
    /// Final score.
    pub score: u32,
}

/// Event payload variants for the Narrative Orchestration context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// A scene has been rendered.
    SceneEntered(SceneEntered),
    /// A choice has been picked.
    ChoiceSelected(ChoiceSelected),
    /// A free-text answer has been scored.
    AnswerSubmitted(AnswerSubmitted),
    /// An ordering step has been picked.
    StepPicked(StepPicked),
    /// An order has been confirmed and scored.
    OrderConfirmed(OrderConfirmed),
    /// The continue control has been scheduled.
    RevealScheduled(RevealScheduled),
    /// The continue control is visible.
    ContinueRevealed(ContinueRevealed),
    /// A transition pointed nowhere.
    TransitionMissed(TransitionMissed),
    /// The story has ended.
    EndingReached(EndingReached),
}

/// Domain event envelope for the Narrative Orchestration context.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl SessionEventKind {
    /// The event type name of this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SceneEntered(_) => SCENE_ENTERED_EVENT_TYPE,
            Self::ChoiceSelected(_) => CHOICE_SELECTED_EVENT_TYPE,
            Self::AnswerSubmitted(_) => ANSWER_SUBMITTED_EVENT_TYPE,
            Self::StepPicked(_) => STEP_PICKED_EVENT_TYPE,
            Self::OrderConfirmed(_) => ORDER_CONFIRMED_EVENT_TYPE,
            Self::RevealScheduled(_) => REVEAL_SCHEDULED_EVENT_TYPE,
            Self::ContinueRevealed(_) => CONTINUE_REVEALED_EVENT_TYPE,
            Self::TransitionMissed(_) => TRANSITION_MISSED_EVENT_TYPE,
            Self::EndingReached(_) => ENDING_REACHED_EVENT_TYPE,
        }
    }
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("SessionEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
