//! Diagram elements: nodes and the edges connecting them.

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// A labelled node of a diagram.
///
/// `level` only matters for tree-shaped diagrams, where it selects the row
/// the node is placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: Id,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<i32>,
}

impl Node {
    /// Create a node without a level.
    pub fn new(id: impl Into<Id>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            level: None,
        }
    }

    /// Set the tree level (builder style).
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn level(&self) -> Option<i32> {
        self.level
    }

    /// The tree level, with a missing level treated as the root row.
    pub fn level_or_default(&self) -> i32 {
        self.level.unwrap_or(0)
    }
}

/// A connection between two nodes, optionally labelled.
///
/// Nothing guarantees that `from` and `to` name existing nodes; consumers
/// skip such edges instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    from: Id,
    to: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<Id>, to: impl Into<Id>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    /// Set the edge label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Id of the node the edge starts at.
    pub fn source(&self) -> Id {
        self.from
    }

    /// Id of the node the edge points to.
    pub fn target(&self) -> Id {
        self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
