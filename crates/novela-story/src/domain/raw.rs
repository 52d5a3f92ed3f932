//! Wire schema of the story document.
//!
//! Mirrors the JSON exactly as authored. Every field a scene may omit is
//! optional here; classification into [`SceneKind`](super::scene::SceneKind)
//! happens in [`Story::from_raw`](super::story::Story::from_raw).
//!
//! Scene fields are read leniently: a value of the wrong JSON type never
//! rejects the document. It reads as absent, or for displayed text as its
//! printed form, and the scene degrades to whatever its remaining fields
//! classify as.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level story document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStory {
    /// Entry scene, not part of `scenes`.
    pub intro: RawScene,
    /// Scenes addressable by id. Missing means empty.
    #[serde(default)]
    pub scenes: Vec<RawScene>,
    /// The three ending tiers.
    pub finals: RawFinals,
}

/// One scene as authored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScene {
    #[serde(default, deserialize_with = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub question: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "choices")]
    pub choices: Option<Vec<RawChoice>>,
    #[serde(default, deserialize_with = "string")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "steps")]
    pub steps: Option<Vec<String>>,
    /// Entries that are not non-negative integers read as `usize::MAX`,
    /// which no step index can match.
    #[serde(default, deserialize_with = "order")]
    pub correct_order: Option<Vec<usize>>,
    #[serde(default, deserialize_with = "string")]
    pub next_scene: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub transition_success: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub transition_fail: Option<String>,
}

/// One entry of a scene's `choices`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChoice {
    #[serde(default, deserialize_with = "label")]
    pub text: String,
    #[serde(default, deserialize_with = "string")]
    pub next_scene: Option<String>,
}

/// Endings keyed by tier.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFinals {
    pub good: RawEnding,
    pub neutral: RawEnding,
    pub bad: RawEnding,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnding {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub title: String,
}

fn printed(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(string(de)?.unwrap_or_default())
}

fn text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(printed(Value::deserialize(de)?))
}

fn label<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(text(de)?.unwrap_or_default())
}

fn steps<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| printed(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}

fn order<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Vec<usize>>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|n| usize::try_from(n).ok())
                        .unwrap_or(usize::MAX)
                })
                .collect(),
        ),
        _ => None,
    })
}

fn choices<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Vec<RawChoice>>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}
