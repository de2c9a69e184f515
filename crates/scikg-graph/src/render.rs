//! Render hints and Graphviz output for the static visualization.
//!
//! Only content and styling hints are produced here; layout and
//! rasterization belong to the external renderer.

use std::collections::HashMap;
use std::path::Path;

use petgraph::dot::Dot;
use serde::Serialize;
use tracing::info;

use scikg_core::{NodeKind, Result};

use crate::KnowledgeGraph;

/// Fill color of paper nodes
pub const PAPER_COLOR: &str = "lightgreen";
/// Fill color of entity nodes
pub const ENTITY_COLOR: &str = "skyblue";
/// Color of edge labels
pub const EDGE_LABEL_COLOR: &str = "red";

/// Styling of one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub id: String,
    pub color: &'static str,
    /// Marker area in points squared: `degree * 100 + 500`
    pub size: usize,
}

impl NodeStyle {
    fn new(id: &str, kind: NodeKind, degree: usize) -> Self {
        let color = match kind {
            NodeKind::Paper => PAPER_COLOR,
            NodeKind::Entity => ENTITY_COLOR,
        };
        Self {
            id: id.to_string(),
            color,
            size: degree * 100 + 500,
        }
    }

    /// Marker diameter in inches for an area given in points squared
    pub fn width_inches(&self) -> f64 {
        (self.size as f64).sqrt() / 72.0
    }
}

/// Per-node styling for `graph`, in insertion order
pub fn render_hints(graph: &KnowledgeGraph) -> Vec<NodeStyle> {
    graph
        .degrees()
        .into_iter()
        .map(|(node, degree)| NodeStyle::new(&node.id, node.kind, degree))
        .collect()
}

/// Graphviz DOT document with node colors, sizes and edge labels
pub fn to_dot(graph: &KnowledgeGraph) -> String {
    let styles: HashMap<String, NodeStyle> = render_hints(graph)
        .into_iter()
        .map(|style| (style.id.clone(), style))
        .collect();

    let dot = Dot::with_attr_getters(
        graph.as_petgraph(),
        &[],
        &|_, _| format!("fontcolor = {EDGE_LABEL_COLOR} fontsize = 8"),
        &|_, (_, node)| match styles.get(&node.id) {
            Some(style) => format!(
                "style = filled fillcolor = {} width = {:.2} fixedsize = false",
                style.color,
                style.width_inches()
            ),
            None => String::new(),
        },
    )
    .to_string();
    dot
}

/// Write the DOT document, creating parent directories as needed
pub fn write_dot(graph: &KnowledgeGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_dot(graph))?;

    info!(path = %path.display(), nodes = graph.node_count(), "graph DOT written");
    Ok(())
}
