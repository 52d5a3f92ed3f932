//! The immutable story graph.

use std::collections::HashMap;

use novela_core::error::DomainError;
use serde::{Deserialize, Serialize};

use super::raw::{RawEnding, RawStory};
use super::scene::Scene;

/// Terminal text shown for an ending tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ending {
    pub text: String,
    pub title: String,
}

impl From<&RawEnding> for Ending {
    fn from(raw: &RawEnding) -> Self {
        Self {
            text: raw.text.clone(),
            title: raw.title.clone(),
        }
    }
}

/// The three score-banded endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finals {
    pub good: Ending,
    pub neutral: Ending,
    pub bad: Ending,
}

/// Identifies the scene a session is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneRef {
    /// The distinguished entry scene.
    Intro,
    /// A scene from the `scenes` list.
    Named(String),
}

impl std::fmt::Display for SceneRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intro => f.write_str("<intro>"),
            Self::Named(id) => f.write_str(id),
        }
    }
}

/// A loaded story. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Story {
    intro: Scene,
    scenes: Vec<Scene>,
    /// Scene id to position in `scenes`; the first scene wins on duplicates.
    index: HashMap<String, usize>,
    finals: Finals,
}

impl Story {
    /// Builds the graph, classifying every scene once.
    #[must_use]
    pub fn from_raw(raw: &RawStory) -> Self {
        let scenes: Vec<Scene> = raw.scenes.iter().map(Scene::from).collect();
        let mut index = HashMap::with_capacity(scenes.len());
        for (position, scene) in scenes.iter().enumerate() {
            index.entry(scene.id.clone()).or_insert(position);
        }

        Self {
            intro: Scene::from(&raw.intro),
            scenes,
            index,
            finals: Finals {
                good: Ending::from(&raw.finals.good),
                neutral: Ending::from(&raw.finals.neutral),
                bad: Ending::from(&raw.finals.bad),
            },
        }
    }

    /// The entry scene.
    #[must_use]
    pub fn intro(&self) -> &Scene {
        &self.intro
    }

    /// All addressable scenes in authored order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Looks a scene up by id.
    #[must_use]
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.index.get(id).map(|&position| &self.scenes[position])
    }

    /// Resolves a [`SceneRef`].
    #[must_use]
    pub fn resolve(&self, scene: &SceneRef) -> Option<&Scene> {
        match scene {
            SceneRef::Intro => Some(&self.intro),
            SceneRef::Named(id) => self.scene(id),
        }
    }

    /// Resolves a [`SceneRef`] that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SceneNotFound` if no scene has that id.
    pub fn require(&self, scene: &SceneRef) -> Result<&Scene, DomainError> {
        self.resolve(scene)
            .ok_or_else(|| DomainError::SceneNotFound(scene.to_string()))
    }

    /// Endings by tier.
    #[must_use]
    pub fn finals(&self) -> &Finals {
        &self.finals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scene::SceneKind;

    fn story(json: &str) -> Story {
        let raw: RawStory = serde_json::from_str(json).unwrap();
        Story::from_raw(&raw)
    }

    const FINALS: &str = r#""finals": {
        "good": { "text": "g", "title": "G" },
        "neutral": { "text": "n", "title": "N" },
        "bad": { "text": "b", "title": "B" }
    }"#;

    #[test]
    fn test_scene_lookup_by_id() {
        // Arrange
        let story = story(&format!(
            r#"{{ "intro": {{ "id": "intro", "nextScene": "a" }},
                 "scenes": [ {{ "id": "a", "text": "A" }}, {{ "id": "b", "text": "B" }} ],
                 {FINALS} }}"#
        ));

        // Act & Assert
        assert_eq!(story.scene("b").unwrap().text, "B");
        assert!(story.scene("missing").is_none());
        assert_eq!(story.scenes().len(), 2);
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first_scene() {
        let story = story(&format!(
            r#"{{ "intro": {{ "id": "intro" }},
                 "scenes": [ {{ "id": "a", "text": "first" }}, {{ "id": "a", "text": "second" }} ],
                 {FINALS} }}"#
        ));

        assert_eq!(story.scene("a").unwrap().text, "first");
    }

    #[test]
    fn test_intro_is_not_addressable_by_id() {
        let story = story(&format!(
            r#"{{ "intro": {{ "id": "intro", "nextScene": "final" }}, "scenes": [], {FINALS} }}"#
        ));

        assert!(story.scene("intro").is_none());
        assert_eq!(story.resolve(&SceneRef::Intro).unwrap().id, "intro");
        assert!(matches!(story.intro().kind, SceneKind::Linear { .. }));
        assert_eq!(story.finals().neutral.title, "N");
    }

    #[test]
    fn test_require_reports_unknown_scene() {
        // Arrange
        let story = story(&format!(
            r#"{{ "intro": {{ "id": "intro" }}, "scenes": [ {{ "id": "a" }} ], {FINALS} }}"#
        ));

        // Act
        let found = story.require(&SceneRef::Named("a".to_owned()));
        let missing = story.require(&SceneRef::Named("gone".to_owned()));

        // Assert
        assert_eq!(found.unwrap().id, "a");
        match missing.unwrap_err() {
            DomainError::SceneNotFound(id) => assert_eq!(id, "gone"),
            other => panic!("expected SceneNotFound, got {other:?}"),
        }
    }
}
