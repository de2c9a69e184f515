//! Export adapter
//!
//! Serializes a (sub)graph into the `{nodes, links}` structure shared with
//! the web UI and the visualization renderer.

use std::path::Path;

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::info;

use scikg_core::{NodeKind, Result};

use crate::KnowledgeGraph;

/// Exported node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Degree within the exported graph
    pub degree: usize,
}

/// Exported edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLink {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// Node/link document consumed by the web UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportGraph {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<ExportLink>,
}

impl ExportGraph {
    /// Serialize to a JSON string
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the JSON document, creating parent directories as needed
    pub fn write_json(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json(pretty)?)?;

        info!(
            path = %path.display(),
            nodes = self.nodes.len(),
            links = self.links.len(),
            "graph JSON written"
        );
        Ok(())
    }
}

/// Convert a graph into its export form.
///
/// Degrees are computed on `graph` itself, so exporting a subgraph reports
/// the degrees of the visualized slice. Nodes and links follow insertion
/// order.
pub fn to_export_format(graph: &KnowledgeGraph) -> ExportGraph {
    let pg = graph.as_petgraph();

    let nodes = pg
        .node_indices()
        .map(|idx| ExportNode {
            id: pg[idx].id.clone(),
            kind: pg[idx].kind,
            degree: graph.degree_of(idx),
        })
        .collect();

    let links = pg
        .edge_references()
        .map(|edge| ExportLink {
            source: pg[edge.source()].id.clone(),
            target: pg[edge.target()].id.clone(),
            label: edge.weight().label.clone(),
        })
        .collect();

    ExportGraph { nodes, links }
}
