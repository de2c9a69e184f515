//! Top-K subgraph selection
//!
//! Keeps the most connected nodes and every edge between them.

use std::collections::HashSet;

use tracing::debug;

use crate::KnowledgeGraph;

/// An induced subgraph of a [`KnowledgeGraph`]
pub type Subgraph = KnowledgeGraph;

/// Induced subgraph of the `k` highest-degree nodes.
///
/// Degree is in-degree plus out-degree in `graph`. Ties keep insertion
/// order, so the selection is deterministic. `k == 0` yields an empty
/// graph and `k >= node_count` the whole graph. The source is not touched.
pub fn select_top_k(graph: &KnowledgeGraph, k: usize) -> Subgraph {
    let pg = graph.as_petgraph();

    let mut ranked: Vec<_> = pg
        .node_indices()
        .map(|idx| (idx, graph.degree_of(idx)))
        .collect();
    // Stable: equal degrees stay in insertion order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let keep: HashSet<_> = ranked.into_iter().take(k).map(|(idx, _)| idx).collect();

    let induced = pg.filter_map(
        |idx, node| keep.contains(&idx).then(|| node.clone()),
        |_, edge| Some(edge.clone()),
    );

    debug!(
        k,
        nodes = induced.node_count(),
        edges = induced.edge_count(),
        "selected top-k subgraph"
    );

    KnowledgeGraph::from_petgraph(induced)
}
