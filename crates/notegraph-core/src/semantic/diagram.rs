//! Core diagram structure types.
//!
//! - [`Diagram`] - A single diagram descriptor: title, kind, nodes and edges
//! - [`DiagramKind`] - The structural kind, which selects layout and edge direction
//! - [`LayoutFamily`] - Groups kinds that share a placement rule

use std::{
    collections::HashSet,
    fmt::{self, Display},
    str::FromStr,
};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    identifier::Id,
    semantic::element::{Edge, Node},
};

/// Error returned when parsing an unrecognised diagram kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown diagram kind `{0}`")]
pub struct UnknownDiagramKind(pub String);

/// Structural kind of a diagram.
///
/// The names match the analysis service payload (kebab-case). Unknown names
/// deserialize to [`DiagramKind::Graph`], the kind whose layout is the
/// general fallback.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum DiagramKind {
    BinaryTree,
    Tree,
    #[default]
    Graph,
    Directed,
    Flowchart,
    LinkedList,
}

/// Placement rule shared by a group of diagram kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutFamily {
    /// Nodes on one horizontal line, in input order.
    Linear,
    /// Nodes in rows by tree level.
    Layered,
    /// Nodes evenly spaced on a circle.
    Radial,
}

impl DiagramKind {
    /// All kinds, in the order they are documented.
    pub const ALL: [DiagramKind; 6] = [
        Self::BinaryTree,
        Self::Tree,
        Self::Graph,
        Self::Directed,
        Self::Flowchart,
        Self::LinkedList,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BinaryTree => "binary-tree",
            Self::Tree => "tree",
            Self::Graph => "graph",
            Self::Directed => "directed",
            Self::Flowchart => "flowchart",
            Self::LinkedList => "linked-list",
        }
    }

    /// Whether edges of this kind are drawn with arrowheads.
    pub fn is_directional(self) -> bool {
        matches!(self, Self::Directed | Self::Flowchart | Self::LinkedList)
    }

    /// The placement rule used to lay out this kind.
    pub fn family(self) -> LayoutFamily {
        match self {
            Self::LinkedList => LayoutFamily::Linear,
            Self::BinaryTree | Self::Tree => LayoutFamily::Layered,
            Self::Graph | Self::Directed | Self::Flowchart => LayoutFamily::Radial,
        }
    }
}

impl Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramKind {
    type Err = UnknownDiagramKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownDiagramKind(s.to_string()))
    }
}

impl From<String> for DiagramKind {
    fn from(name: String) -> Self {
        name.parse().unwrap_or_else(|err: UnknownDiagramKind| {
            warn!(kind = name; "{err}, falling back to graph");
            Self::Graph
        })
    }
}

/// Node and edge counts of a diagram, as shown under each rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramSummary {
    pub nodes: usize,
    pub edges: usize,
}

impl Display for DiagramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nodes: {}  Edges: {}", self.nodes, self.edges)
    }
}

/// A diagram descriptor.
///
/// Descriptors are immutable once loaded. Edges may reference node ids that
/// do not exist; [`Diagram::resolved_edges`] filters those out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    title: String,
    #[serde(rename = "type")]
    kind: DiagramKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Diagram {
    /// Create a new diagram descriptor.
    pub fn new(
        title: impl Into<String>,
        kind: DiagramKind,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            description: None,
            nodes,
            edges,
        }
    }

    /// Set the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Nodes in input order. For linked lists the order is the list order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up the first node with the given id.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.node(id).is_some()
    }

    /// Edges whose endpoints both name existing nodes, in input order.
    pub fn resolved_edges(&self) -> impl Iterator<Item = &Edge> {
        let ids = self.node_ids();
        self.edges
            .iter()
            .filter(move |edge| ids.contains(&edge.source()) && ids.contains(&edge.target()))
    }

    /// Edges with at least one endpoint that names no node, in input order.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        let ids = self.node_ids();
        self.edges
            .iter()
            .filter(move |edge| !ids.contains(&edge.source()) || !ids.contains(&edge.target()))
    }

    /// Ids that appear on more than one node, each reported once.
    pub fn duplicate_node_ids(&self) -> Vec<Id> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for node in &self.nodes {
            if !seen.insert(node.id()) && !duplicates.contains(&node.id()) {
                duplicates.push(node.id());
            }
        }
        duplicates
    }

    pub fn summary(&self) -> DiagramSummary {
        DiagramSummary {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
        }
    }

    fn node_ids(&self) -> HashSet<Id> {
        self.nodes.iter().map(Node::id).collect()
    }
}
