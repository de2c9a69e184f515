//! SciKG Graph - Combined knowledge graph
//!
//! Holds papers and extracted entities in a petgraph directed graph keyed
//! by string id, selects the most connected nodes, and exports the result
//! for the web UI and the static renderer.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use scikg_core::NodeKind;

pub mod builder;
pub mod export;
pub mod render;
pub mod select;

pub use builder::GraphBuilder;
pub use export::{to_export_format, ExportGraph, ExportLink, ExportNode};
pub use render::{render_hints, to_dot, write_dot, NodeStyle};
pub use select::{select_top_k, Subgraph};

/// Edge label connecting a paper to the entities it discusses
pub const MENTIONS: &str = "mentions";

/// Maximum number of title characters kept in a paper node id
pub const PAPER_TITLE_LIMIT: usize = 50;

/// Node id of a paper: `"Paper: "` + first 50 characters of the title + `"..."`
pub fn paper_node_id(title: &str) -> String {
    let truncated: String = title.chars().take(PAPER_TITLE_LIMIT).collect();
    format!("Paper: {truncated}...")
}

/// A node of the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
}

impl std::fmt::Display for GraphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A labeled edge of the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub label: String,
}

impl std::fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A directed knowledge graph of typed nodes and labeled edges.
///
/// At most one edge exists per ordered node pair; writing the same pair
/// again replaces its label.
///
/// # Example
///
/// ```rust
/// use scikg_core::NodeKind;
/// use scikg_graph::KnowledgeGraph;
///
/// let mut kg = KnowledgeGraph::new();
/// kg.upsert_edge("bone_density", NodeKind::Entity, "microgravity", NodeKind::Entity, "decrease");
/// kg.upsert_edge("bone_density", NodeKind::Entity, "microgravity", NodeKind::Entity, "reduce");
///
/// assert_eq!(kg.node_count(), 2);
/// assert_eq!(kg.edge_count(), 1);
/// assert_eq!(kg.edge_label("bone_density", "microgravity"), Some("reduce"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    /// The underlying directed graph; node and edge indices follow insertion order
    graph: DiGraph<GraphNode, GraphEdge>,

    /// Map from node id to node index
    node_index: HashMap<String, NodeIndex>,
}

impl KnowledgeGraph {
    /// Create an empty knowledge graph
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_petgraph(graph: DiGraph<GraphNode, GraphEdge>) -> Self {
        let node_index = graph
            .node_indices()
            .map(|idx| (graph[idx].id.clone(), idx))
            .collect();
        Self { graph, node_index }
    }

    /// Ensure a node exists. The kind given at first insertion is kept.
    pub fn ensure_node(&mut self, id: &str, kind: NodeKind) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }

        let idx = self.graph.add_node(GraphNode {
            id: id.to_string(),
            kind,
        });
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    /// Add an edge, or overwrite the label of the existing edge for this pair
    pub fn upsert_edge(
        &mut self,
        from: &str,
        from_kind: NodeKind,
        to: &str,
        to_kind: NodeKind,
        label: &str,
    ) {
        let from_idx = self.ensure_node(from, from_kind);
        let to_idx = self.ensure_node(to, to_kind);
        self.graph.update_edge(
            from_idx,
            to_idx,
            GraphEdge {
                label: label.to_string(),
            },
        );
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Whether a node with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Get a node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Kind of a node
    pub fn kind(&self, id: &str) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    /// Label of the edge `from -> to`
    pub fn edge_label(&self, from: &str, to: &str) -> Option<&str> {
        let from_idx = *self.node_index.get(from)?;
        let to_idx = *self.node_index.get(to)?;
        let edge = self.graph.find_edge(from_idx, to_idx)?;
        Some(self.graph[edge].label.as_str())
    }

    /// In-degree plus out-degree of a node
    pub fn degree(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).map(|&idx| self.degree_of(idx))
    }

    pub(crate) fn degree_of(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
            + self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Nodes with their degree, in insertion order
    pub fn degrees(&self) -> Vec<(&GraphNode, usize)> {
        self.graph
            .node_indices()
            .map(|idx| (&self.graph[idx], self.degree_of(idx)))
            .collect()
    }

    /// Edges as `(from, to, label)`, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
                edge.weight().label.as_str(),
            )
        })
    }

    /// Get the underlying petgraph for advanced operations
    pub fn as_petgraph(&self) -> &DiGraph<GraphNode, GraphEdge> {
        &self.graph
    }

    /// Compute statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let paper_count = self.nodes().filter(|n| n.kind == NodeKind::Paper).count();
        let mentions_count = self
            .graph
            .edge_references()
            .filter(|edge| self.graph[edge.source()].kind == NodeKind::Paper)
            .count();

        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            paper_count,
            entity_count: self.node_count() - paper_count,
            mentions_count,
            relation_count: self.edge_count() - mentions_count,
        }
    }
}

/// Statistics about a knowledge graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total nodes
    pub node_count: usize,
    /// Total edges
    pub edge_count: usize,
    /// Paper nodes
    pub paper_count: usize,
    /// Entity nodes
    pub entity_count: usize,
    /// Edges leaving a paper node
    pub mentions_count: usize,
    /// Entity -> entity edges
    pub relation_count: usize,
}
