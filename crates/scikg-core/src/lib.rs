//! SciKG Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout SciKG:
//! - Paper summaries and per-paper extraction results
//! - Relation triples and node kinds of the knowledge graph
//! - The syntactic parse interface consumed by the extractor
//! - Common error types
//! - Configuration management

pub mod config;
pub mod parse;

pub use config::{
    AppConfig, ConfigError, ExportConfig, ExtractorConfig, LoggingConfig, SelectionConfig,
    MAX_ENTITY_TOKENS, MIN_ENTITY_LEN,
};
pub use parse::{ParsedPaper, ParsedSentence, PartOfSpeech, SentenceParse, SyntaxParser, Token};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for SciKG operations
#[derive(Error, Debug)]
pub enum SciKgError {
    #[error("Parser error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SciKgError>;

// ============================================================================
// Knowledge Graph Models
// ============================================================================

/// A relationship triple (Subject, Predicate, Object)
///
/// Subject and object are normalized entity identifiers; the predicate is the
/// free-text verb phrase it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// Subject entity ID
    pub subject: String,

    /// Predicate (relationship label)
    pub predicate: String,

    /// Object entity ID
    pub object: String,
}

impl Triple {
    /// Create a new triple
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// Kind of a node in the knowledge graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A source paper
    Paper,
    /// An extracted concept
    Entity,
}

impl NodeKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Entity => "entity",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Paper Models
// ============================================================================

/// Summarized text of one paper, as produced by the upstream summarizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperSummary {
    /// Paper title
    pub title: String,

    /// Summarized abstract
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Summarized conclusion
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl PaperSummary {
    /// Create a new summary
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            abstract_text: None,
            conclusion: None,
        }
    }

    /// Set the abstract
    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    /// Set the conclusion
    pub fn with_conclusion(mut self, text: impl Into<String>) -> Self {
        self.conclusion = Some(text.into());
        self
    }

    /// Text handed to the parser: abstract and conclusion joined by a space.
    /// Missing sections count as empty.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.abstract_text.as_deref().unwrap_or_default(),
            self.conclusion.as_deref().unwrap_or_default()
        )
    }
}

/// Triples extracted from a single paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperTriples {
    /// Caller-assigned paper identifier (corpus position by default)
    pub paper_id: String,

    /// Paper title
    pub title: String,

    /// Extracted triples, in sentence order
    pub triples: Vec<Triple>,
}

impl PaperTriples {
    /// Create a new per-paper result
    pub fn new(paper_id: impl Into<String>, title: impl Into<String>, triples: Vec<Triple>) -> Self {
        Self {
            paper_id: paper_id.into(),
            title: title.into(),
            triples,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
