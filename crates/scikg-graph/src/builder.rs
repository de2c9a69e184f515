//! Graph assembly
//!
//! Folds per-paper triples into one combined graph. Papers are applied in
//! the order given, which fixes the outcome of label overwrites.

use std::collections::HashMap;

use scikg_core::{NodeKind, PaperTriples};
use tracing::{info, warn};

use crate::{paper_node_id, KnowledgeGraph, MENTIONS};

/// Builds a [`KnowledgeGraph`] from extracted triples
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: KnowledgeGraph,
    /// Paper node id -> first paper id that produced it
    paper_ids: HashMap<String, String>,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the combined graph for a whole corpus
    pub fn build(papers: &[PaperTriples]) -> KnowledgeGraph {
        let mut builder = Self::new();
        for paper in papers {
            builder.add_paper(paper);
        }
        builder.finish()
    }

    /// Add one paper node, its entities, relations and mentions edges
    pub fn add_paper(&mut self, paper: &PaperTriples) {
        let node_id = paper_node_id(&paper.title);

        match self.paper_ids.get(&node_id) {
            Some(first) if *first != paper.paper_id => {
                warn!(
                    node = %node_id,
                    first = %first,
                    paper = %paper.paper_id,
                    "truncated titles collide; papers share one node"
                );
            }
            Some(_) => {}
            None => {
                self.paper_ids.insert(node_id.clone(), paper.paper_id.clone());
            }
        }

        self.graph.ensure_node(&node_id, NodeKind::Paper);

        for triple in &paper.triples {
            self.graph.upsert_edge(
                &triple.subject,
                NodeKind::Entity,
                &triple.object,
                NodeKind::Entity,
                &triple.predicate,
            );
            self.graph.upsert_edge(
                &node_id,
                NodeKind::Paper,
                &triple.subject,
                NodeKind::Entity,
                MENTIONS,
            );
        }
    }

    /// Finish accumulation; the returned graph is read-only from here on
    pub fn finish(self) -> KnowledgeGraph {
        let stats = self.graph.stats();
        info!(
            nodes = stats.node_count,
            edges = stats.edge_count,
            papers = stats.paper_count,
            entities = stats.entity_count,
            "knowledge graph built"
        );
        self.graph
    }
}
