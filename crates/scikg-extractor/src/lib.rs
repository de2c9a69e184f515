//! SciKG Extractor - Knowledge extraction pipeline
//!
//! Implements dependency-based Relation Extraction (RE) over parsed
//! sentences, entity name normalization, and corpus-level extraction
//! for building the combined knowledge graph.

use scikg_core::{SentenceParse, Triple};

/// Trait for relation extractors
///
/// Extraction is infallible: a sentence without usable structure simply
/// contributes no triples.
pub trait RelationExtractor: Send + Sync {
    fn extract(&self, sentence: &dyn SentenceParse) -> Vec<Triple>;
}

pub mod corpus;
pub mod normalize;
pub mod relation;
pub mod stats;

pub use corpus::{CorpusExtraction, CorpusExtractor};
pub use normalize::normalize;
pub use relation::DependencyRe;
pub use stats::{ExtractionStats, SentenceOutcome};
