//! Load-time authoring diagnostics.
//!
//! None of these stop a story from loading. A problem found here shows up at
//! play time as a dead end or a silently ignored transition, so the loader
//! logs each one as a warning.

use std::collections::HashSet;

use serde::Serialize;

use super::scene::{Scene, SceneKind, Transition};
use super::story::Story;

/// An authoring problem in the story graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StoryDiagnostic {
    /// A choice scene with no choices.
    EmptyChoices { scene_id: String },
    /// A free-text scene without an answer; submitting never advances.
    MissingAnswer { scene_id: String },
    /// `correctOrder` is not a permutation of the step indices, so the
    /// puzzle can never be solved.
    UnsolvableOrdering { scene_id: String },
    /// An input, ordering or choice entry without a `nextScene`.
    MissingNextScene { scene_id: String },
    /// A `nextScene` naming a scene that does not exist.
    DanglingTransition { scene_id: String, target: String },
    /// More than one scene uses the same id; only the first is reachable.
    DuplicateSceneId { scene_id: String },
    /// A scene that matches no interaction kind.
    DeadEnd { scene_id: String },
}

impl std::fmt::Display for StoryDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyChoices { scene_id } => write!(f, "scene '{scene_id}' has no choices"),
            Self::MissingAnswer { scene_id } => {
                write!(f, "input scene '{scene_id}' has no answer")
            }
            Self::UnsolvableOrdering { scene_id } => write!(
                f,
                "ordering scene '{scene_id}' has a correctOrder that is not a permutation of its steps"
            ),
            Self::MissingNextScene { scene_id } => {
                write!(f, "scene '{scene_id}' has an exit without nextScene")
            }
            Self::DanglingTransition { scene_id, target } => {
                write!(f, "scene '{scene_id}' leads to unknown scene '{target}'")
            }
            Self::DuplicateSceneId { scene_id } => {
                write!(f, "scene id '{scene_id}' is used more than once")
            }
            Self::DeadEnd { scene_id } => write!(f, "scene '{scene_id}' has no exit"),
        }
    }
}

/// Returns `true` if `order` lists every index in `0..len` exactly once.
#[must_use]
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Inspects every scene of `story`.
#[must_use]
pub fn diagnose(story: &Story) -> Vec<StoryDiagnostic> {
    let mut diagnostics = Vec::new();

    let mut seen = HashSet::new();
    for scene in story.scenes() {
        if !seen.insert(scene.id.as_str()) {
            diagnostics.push(StoryDiagnostic::DuplicateSceneId {
                scene_id: scene.id.clone(),
            });
        }
    }

    for scene in std::iter::once(story.intro()).chain(story.scenes()) {
        diagnose_scene(story, scene, &mut diagnostics);
    }

    diagnostics
}

fn diagnose_scene(story: &Story, scene: &Scene, out: &mut Vec<StoryDiagnostic>) {
    let scene_id = || scene.id.clone();

    match &scene.kind {
        SceneKind::Choice { choices } => {
            if choices.is_empty() {
                out.push(StoryDiagnostic::EmptyChoices {
                    scene_id: scene_id(),
                });
            }
            if choices.iter().any(|c| c.next_scene.is_none()) {
                out.push(StoryDiagnostic::MissingNextScene {
                    scene_id: scene_id(),
                });
            }
        }
        SceneKind::FreeText { answer, next_scene } => {
            if answer.is_none() {
                out.push(StoryDiagnostic::MissingAnswer {
                    scene_id: scene_id(),
                });
            }
            if next_scene.is_none() {
                out.push(StoryDiagnostic::MissingNextScene {
                    scene_id: scene_id(),
                });
            }
        }
        SceneKind::Ordering {
            steps,
            correct_order,
            next_scene,
        } => {
            if !is_permutation(correct_order, steps.len()) {
                out.push(StoryDiagnostic::UnsolvableOrdering {
                    scene_id: scene_id(),
                });
            }
            if next_scene.is_none() {
                out.push(StoryDiagnostic::MissingNextScene {
                    scene_id: scene_id(),
                });
            }
        }
        SceneKind::Linear { .. } => {}
        SceneKind::Inert => out.push(StoryDiagnostic::DeadEnd {
            scene_id: scene_id(),
        }),
    }

    for exit in scene.kind.exits() {
        if let Transition::Scene(target) = exit {
            if story.scene(target).is_none() {
                out.push(StoryDiagnostic::DanglingTransition {
                    scene_id: scene_id(),
                    target: target.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::raw::RawStory;

    fn diagnose_json(json: &str) -> Vec<StoryDiagnostic> {
        let raw: RawStory = serde_json::from_str(json).unwrap();
        diagnose(&Story::from_raw(&raw))
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }

    #[test]
    fn test_clean_story_has_no_diagnostics() {
        let diagnostics = diagnose_json(novela_test_support::fixtures::ORDERING_STORY);

        assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
    }

    #[test]
    fn test_missing_branch_is_reported_as_dangling() {
        // Arrange & Act
        let diagnostics = diagnose_json(novela_test_support::fixtures::MISSING_BRANCH_STORY);

        // Assert
        assert_eq!(
            diagnostics,
            vec![StoryDiagnostic::DanglingTransition {
                scene_id: "intro".to_owned(),
                target: "s1".to_owned(),
            }]
        );
    }

    #[test]
    fn test_authoring_problems_are_all_collected() {
        // Arrange
        let json = r#"{
            "intro": { "id": "intro", "choices": [] },
            "scenes": [
                { "id": "q", "type": "input", "nextScene": "final" },
                { "id": "o", "type": "ordering", "steps": ["a", "b"], "correctOrder": [0, 0], "nextScene": "final" },
                { "id": "q", "text": "duplicate" },
                { "id": "x" }
            ],
            "finals": {
                "good": { "text": "g", "title": "G" },
                "neutral": { "text": "n", "title": "N" },
                "bad": { "text": "b", "title": "B" }
            }
        }"#;

        // Act
        let diagnostics = diagnose_json(json);

        // Assert
        assert!(diagnostics.contains(&StoryDiagnostic::EmptyChoices {
            scene_id: "intro".into()
        }));
        assert!(diagnostics.contains(&StoryDiagnostic::MissingAnswer {
            scene_id: "q".into()
        }));
        assert!(diagnostics.contains(&StoryDiagnostic::UnsolvableOrdering {
            scene_id: "o".into()
        }));
        assert!(diagnostics.contains(&StoryDiagnostic::DuplicateSceneId {
            scene_id: "q".into()
        }));
        assert!(diagnostics.contains(&StoryDiagnostic::DeadEnd {
            scene_id: "x".into()
        }));
    }
}
