//! Commands for the Narrative Orchestration context.
//!
//! One command per user activation the surface can report.

use novela_core::command::Command;
use novela_core::surface::ControlAction;
use uuid::Uuid;

/// Command to pick a multiple-choice entry.
#[derive(Debug, Clone)]
pub struct SelectChoice {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Position of the choice in the scene's list.
    pub index: usize,
}

impl Command for SelectChoice {
    fn command_type(&self) -> &'static str {
        "narrative.select_choice"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to submit the answer field of a free-text scene.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Raw field content; trimmed before comparison.
    pub input: String,
}

impl Command for SubmitAnswer {
    fn command_type(&self) -> &'static str {
        "narrative.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to pick one ordering step.
#[derive(Debug, Clone)]
pub struct PickStep {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Original (unshuffled) index of the step.
    pub step: usize,
}

impl Command for PickStep {
    fn command_type(&self) -> &'static str {
        "narrative.pick_step"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to confirm the order picked so far.
#[derive(Debug, Clone)]
pub struct ConfirmOrder {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ConfirmOrder {
    fn command_type(&self) -> &'static str {
        "narrative.confirm_order"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to follow the visible continue control.
#[derive(Debug, Clone)]
pub struct Continue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for Continue {
    fn command_type(&self) -> &'static str {
        "narrative.continue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Any player command, for callers that dispatch generically.
#[derive(Debug, Clone)]
pub enum PlayerCommand {
    /// A choice button.
    SelectChoice(SelectChoice),
    /// The free-text submit control.
    SubmitAnswer(SubmitAnswer),
    /// A step button of the ordering puzzle.
    PickStep(PickStep),
    /// The confirm-order control.
    ConfirmOrder(ConfirmOrder),
    /// The continue control after a reveal.
    Continue(Continue),
}

impl PlayerCommand {
    /// Maps an option-control activation to its command.
    #[must_use]
    pub fn from_action(action: ControlAction, correlation_id: Uuid) -> Self {
        match action {
            ControlAction::Choice(index) => Self::SelectChoice(SelectChoice {
                correlation_id,
                index,
            }),
            ControlAction::Step(step) => Self::PickStep(PickStep {
                correlation_id,
                step,
            }),
            ControlAction::ConfirmOrder => Self::ConfirmOrder(ConfirmOrder { correlation_id }),
        }
    }

    /// The wrapped command.
    #[must_use]
    pub fn as_command(&self) -> &dyn Command {
        match self {
            Self::SelectChoice(c) => c,
            Self::SubmitAnswer(c) => c,
            Self::PickStep(c) => c,
            Self::ConfirmOrder(c) => c,
            Self::Continue(c) => c,
        }
    }
}
