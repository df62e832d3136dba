use std::fmt;

use serde::{Deserialize, Serialize};

/// A single `id -> parent_id` edge of a serialized tree.
///
/// An empty `parent_id` marks the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: String,
    #[serde(default)]
    pub parent_id: String,
}

impl Relation {
    pub fn new(id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
        }
    }

    pub fn root(id: impl Into<String>) -> Self {
        Self::new(id, "")
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "{} (root)", self.id)
        } else {
            write!(f, "{} <- {}", self.id, self.parent_id)
        }
    }
}
