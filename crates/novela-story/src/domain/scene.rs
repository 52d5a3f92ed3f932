//! Scenes classified by interaction kind.

use serde::{Deserialize, Serialize};

use super::raw::{RawChoice, RawScene};

/// Sentinel `nextScene` value that routes to the ending resolver.
pub const FINAL_SENTINEL: &str = "final";

/// Where a completed interaction leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Another scene, looked up by id.
    Scene(String),
    /// The score-banded ending.
    Final,
}

impl Transition {
    /// Parses an authored `nextScene`. Absent or empty values yield `None`.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("") => None,
            Some(FINAL_SENTINEL) => Some(Self::Final),
            Some(id) => Some(Self::Scene(id.to_owned())),
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scene(id) => f.write_str(id),
            Self::Final => f.write_str(FINAL_SENTINEL),
        }
    }
}

/// One entry of a multiple-choice scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Button label.
    pub text: String,
    /// Destination when picked.
    pub next_scene: Option<Transition>,
}

impl From<&RawChoice> for Choice {
    fn from(raw: &RawChoice) -> Self {
        Self {
            text: raw.text.clone(),
            next_scene: Transition::parse(raw.next_scene.as_deref()),
        }
    }
}

/// Interaction mode of a scene, decided once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneKind {
    /// Multiple choice. May be empty, which is a dead end.
    Choice { choices: Vec<Choice> },
    /// Free-text answer compared verbatim. `answer` is `None` when the author
    /// left it out or empty; submitting then does nothing.
    FreeText {
        answer: Option<String>,
        next_scene: Option<Transition>,
    },
    /// Reconstruct `correct_order` (indices into `steps`) from a shuffle.
    Ordering {
        steps: Vec<String>,
        correct_order: Vec<usize>,
        next_scene: Option<Transition>,
    },
    /// Plain continue.
    Linear { next_scene: Transition },
    /// No way out.
    Inert,
}

impl SceneKind {
    /// Short name used in logs and views.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Choice { .. } => "choice",
            Self::FreeText { .. } => "input",
            Self::Ordering { .. } => "ordering",
            Self::Linear { .. } => "linear",
            Self::Inert => "inert",
        }
    }

    /// The transitions this scene can request.
    #[must_use]
    pub fn exits(&self) -> Vec<&Transition> {
        match self {
            Self::Choice { choices } => choices.iter().filter_map(|c| c.next_scene.as_ref()).collect(),
            Self::FreeText { next_scene, .. } | Self::Ordering { next_scene, .. } => {
                next_scene.iter().collect()
            }
            Self::Linear { next_scene } => vec![next_scene],
            Self::Inert => Vec::new(),
        }
    }
}

/// A node of the story graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub id: String,
    /// Narrative text, empty when absent.
    pub text: String,
    /// Question text, empty when absent.
    pub question: String,
    pub transition_success: Option<String>,
    pub transition_fail: Option<String>,
    pub kind: SceneKind,
}

impl From<&RawScene> for Scene {
    /// Classifies by field presence: choices, then `type: "input"`, then
    /// `type: "ordering"`, then a non-empty `nextScene`, else inert.
    fn from(raw: &RawScene) -> Self {
        let next_scene = Transition::parse(raw.next_scene.as_deref());
        let kind = if let Some(choices) = &raw.choices {
            SceneKind::Choice {
                choices: choices.iter().map(Choice::from).collect(),
            }
        } else if raw.kind.as_deref() == Some("input") {
            SceneKind::FreeText {
                answer: raw.answer.clone().filter(|a| !a.is_empty()),
                next_scene,
            }
        } else if raw.kind.as_deref() == Some("ordering") {
            SceneKind::Ordering {
                steps: raw.steps.clone().unwrap_or_default(),
                correct_order: raw.correct_order.clone().unwrap_or_default(),
                next_scene,
            }
        } else if let Some(next_scene) = next_scene {
            SceneKind::Linear { next_scene }
        } else {
            SceneKind::Inert
        };

        Self {
            id: raw.id.clone(),
            text: raw.text.clone().unwrap_or_default(),
            question: raw.question.clone().unwrap_or_default(),
            transition_success: raw.transition_success.clone(),
            transition_fail: raw.transition_fail.clone(),
            kind,
        }
    }
}
