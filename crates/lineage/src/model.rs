//! Records stored on the history graph and their JSON form.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Database id of one image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub i64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ImageId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// How far a recorded action can be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionCategory {
    /// Replaying the action with its parameters yields the identical result.
    #[default]
    Reproducible,
    /// Replayable, but the result may differ slightly (randomized or version dependent).
    Complex,
    /// Only documented; the action cannot be replayed.
    Documented,
}

/// One editing step applied while deriving an image version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterAction {
    pub identifier: String,
    pub version: u32,
    pub category: ActionCategory,
    pub params: BTreeMap<String, String>,
}

impl FilterAction {
    pub fn new(identifier: impl Into<String>, version: u32) -> Self {
        Self {
            identifier: identifier.into(),
            version,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: ActionCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn is_reproducible(&self) -> bool {
        self.category == ActionCategory::Reproducible
    }
}

/// A version of an image. Identical versions stored as several files share one vertex.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryVertex {
    pub image_ids: Vec<ImageId>,
}

impl HistoryVertex {
    pub fn new(id: ImageId) -> Self {
        Self {
            image_ids: vec![id],
        }
    }

    pub fn primary_id(&self) -> Option<ImageId> {
        self.image_ids.first().copied()
    }
}

impl PartialEq<ImageId> for HistoryVertex {
    fn eq(&self, other: &ImageId) -> bool {
        self.image_ids.contains(other)
    }
}

/// The actions that turned the parent version into the child version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEdge {
    pub actions: Vec<FilterAction>,
}

/// `subject` was derived from `object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageRelation {
    pub subject: ImageId,
    pub object: ImageId,
}

impl ImageRelation {
    pub fn derived(subject: impl Into<ImageId>, object: impl Into<ImageId>) -> Self {
        Self {
            subject: subject.into(),
            object: object.into(),
        }
    }
}

/// Parses a JSON array of `{"subject": <id>, "object": <id>}` records.
pub fn relations_from_json(text: &str) -> Result<Vec<ImageRelation>> {
    Ok(serde_json::from_str(text)?)
}

pub fn relations_to_json(relations: &[ImageRelation]) -> Result<String> {
    Ok(serde_json::to_string(relations)?)
}
