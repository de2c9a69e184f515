//! Extraction statistics
//!
//! Counts what happened to every sentence and candidate pair so a corpus
//! run can report why sentences contributed nothing.

use serde::{Deserialize, Serialize};

/// Outcome of running the extractor on one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceOutcome {
    /// No token points at itself as the root
    NoRoot,
    /// Root is not a verb
    NonVerbRoot,
    /// Root lemma is a copular/auxiliary verb
    AuxiliaryRoot,
    /// No subject or no object survived the stop-word filter
    MissingArguments,
    /// Every candidate pair was rejected or filtered
    NoTriples,
    /// At least one triple was emitted
    Extracted,
}

/// Counters accumulated over sentences, papers or a whole corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Sentences seen
    pub sentences: usize,
    /// Sentences without a root
    pub no_root: usize,
    /// Sentences whose root is not a verb
    pub non_verb_root: usize,
    /// Sentences whose root is an auxiliary
    pub auxiliary_root: usize,
    /// Sentences lacking a subject or an object
    pub missing_arguments: usize,
    /// Subject/object pairs rejected because the object belongs to another clause
    pub pairs_out_of_clause: usize,
    /// Candidate triples dropped by the length/token-count filter
    pub triples_filtered: usize,
    /// Triples emitted
    pub triples_emitted: usize,
}

impl ExtractionStats {
    /// Record the outcome of one sentence
    pub fn record(&mut self, outcome: SentenceOutcome) {
        self.sentences += 1;
        match outcome {
            SentenceOutcome::NoRoot => self.no_root += 1,
            SentenceOutcome::NonVerbRoot => self.non_verb_root += 1,
            SentenceOutcome::AuxiliaryRoot => self.auxiliary_root += 1,
            SentenceOutcome::MissingArguments => self.missing_arguments += 1,
            SentenceOutcome::NoTriples | SentenceOutcome::Extracted => {}
        }
    }

    /// Fold another set of counters into this one
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.sentences += other.sentences;
        self.no_root += other.no_root;
        self.non_verb_root += other.non_verb_root;
        self.auxiliary_root += other.auxiliary_root;
        self.missing_arguments += other.missing_arguments;
        self.pairs_out_of_clause += other.pairs_out_of_clause;
        self.triples_filtered += other.triples_filtered;
        self.triples_emitted += other.triples_emitted;
    }

    /// Sentences rejected before pairing
    pub fn sentences_rejected(&self) -> usize {
        self.no_root + self.non_verb_root + self.auxiliary_root + self.missing_arguments
    }

    /// Average triples per sentence seen
    pub fn yield_rate(&self) -> f32 {
        if self.sentences == 0 {
            0.0
        } else {
            self.triples_emitted as f32 / self.sentences as f32
        }
    }
}
