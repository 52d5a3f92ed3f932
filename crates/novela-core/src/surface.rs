//! Rendering surface abstraction.
//!
//! The engine never talks to a concrete UI toolkit. It drives a fixed set of
//! named regions through [`Surface`]: narrative text, question text, the
//! answer input area, the options container (with an optional order display
//! for ordering puzzles) and the "next" control. User activations come back
//! to the engine as [`ControlAction`] values.

use serde::Serialize;

/// What activating an option control means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ControlAction {
    /// Pick the choice at this position in the scene's choice list.
    Choice(usize),
    /// Pick the ordering step with this original (unshuffled) index.
    Step(usize),
    /// Confirm the order picked so far.
    ConfirmOrder,
}

/// An option control inside the options container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    /// Activation payload.
    pub action: ControlAction,
    /// Visible label.
    pub label: String,
    /// Disabled controls ignore activation.
    pub enabled: bool,
}

/// The operations the engine needs from a UI toolkit.
pub trait Surface: Send {
    /// Replace the narrative region text.
    fn set_narrative(&mut self, text: &str);

    /// Replace the question/title region text.
    fn set_question(&mut self, text: &str);

    /// Show or hide the answer input area.
    fn show_input(&mut self, visible: bool);

    /// Enable or disable the answer field together with its submit control.
    fn enable_input(&mut self, enabled: bool);

    /// Empty the answer field.
    fn clear_input(&mut self);

    /// Remove every option control and the order display.
    fn clear_options(&mut self);

    /// Append an enabled option control.
    fn append_option(&mut self, label: &str, action: ControlAction);

    /// Enable or disable an option control. Unknown actions are ignored.
    fn enable_option(&mut self, action: ControlAction, enabled: bool);

    /// Set (`Some`) or remove (`None`) the "current order so far" display.
    fn set_order_display(&mut self, text: Option<&str>);

    /// Show or hide the "next" control.
    fn show_next(&mut self, visible: bool);
}

/// Retained in-memory surface. Holds exactly what a user would see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Screen {
    /// Narrative region text.
    pub narrative: String,
    /// Question/title region text.
    pub question: String,
    /// Whether the input area is shown.
    pub input_visible: bool,
    /// Whether the answer field and submit control accept input.
    pub input_enabled: bool,
    /// Current content of the answer field.
    pub input_value: String,
    /// Option controls in display order.
    pub options: Vec<Control>,
    /// Ordering puzzle progress line.
    pub order_display: Option<String>,
    /// Whether the "next" control is shown.
    pub next_visible: bool,
}

impl Screen {
    /// Creates a blank screen with the answer field enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input_enabled: true,
            ..Self::default()
        }
    }

    /// Looks up an option control by its action.
    #[must_use]
    pub fn option(&self, action: ControlAction) -> Option<&Control> {
        self.options.iter().find(|c| c.action == action)
    }

    /// Labels of all option controls in display order.
    #[must_use]
    pub fn option_labels(&self) -> Vec<&str> {
        self.options.iter().map(|c| c.label.as_str()).collect()
    }

    /// Types into the answer field, as a user would.
    pub fn type_input(&mut self, text: &str) {
        text.clone_into(&mut self.input_value);
    }
}

impl Surface for Screen {
    fn set_narrative(&mut self, text: &str) {
        text.clone_into(&mut self.narrative);
    }

    fn set_question(&mut self, text: &str) {
        text.clone_into(&mut self.question);
    }

    fn show_input(&mut self, visible: bool) {
        self.input_visible = visible;
    }

    fn enable_input(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn clear_input(&mut self) {
        self.input_value.clear();
    }

    fn clear_options(&mut self) {
        self.options.clear();
        self.order_display = None;
    }

    fn append_option(&mut self, label: &str, action: ControlAction) {
        self.options.push(Control {
            action,
            label: label.to_owned(),
            enabled: true,
        });
    }

    fn enable_option(&mut self, action: ControlAction, enabled: bool) {
        if let Some(control) = self.options.iter_mut().find(|c| c.action == action) {
            control.enabled = enabled;
        }
    }

    fn set_order_display(&mut self, text: Option<&str>) {
        self.order_display = text.map(str::to_owned);
    }

    fn show_next(&mut self, visible: bool) {
        self.next_visible = visible;
    }
}
