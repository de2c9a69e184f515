//! Syntactic parse interface
//!
//! The extractor never parses raw text. It consumes dependency parses
//! produced by an external parser through [`SentenceParse`], which keeps
//! relation extraction testable with hand-built fixtures.

use serde::{Deserialize, Serialize};

use crate::{PaperSummary, Result};

/// Universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    /// Any tag outside the universal set
    #[serde(other)]
    Other,
}

/// One token of a parsed sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text
    pub text: String,

    /// Base (lemma) form
    pub lemma: String,

    /// Part of speech
    pub pos: PartOfSpeech,

    /// Dependency role label (e.g. "nsubj", "dobj", "advmod", "ROOT")
    pub dep: String,

    /// Index of the governor token within the sentence; the root points at itself
    pub head: usize,
}

impl Token {
    /// Create a new token
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: PartOfSpeech,
        dep: impl Into<String>,
        head: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            dep: dep.into(),
            head,
        }
    }

    /// Lower-cased surface text
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Read access to one dependency-parsed sentence.
///
/// Implementors provide the tokens and the root; governor, children and
/// subtree lookups have default implementations that tolerate malformed
/// links (out-of-range or cyclic heads never panic or loop).
pub trait SentenceParse {
    /// Tokens in sentence order
    fn tokens(&self) -> &[Token];

    /// Index of the syntactic root, if any
    fn root(&self) -> Option<usize>;

    /// Governor of token `i`; `None` for the root or a dangling link
    fn head(&self, i: usize) -> Option<usize> {
        let tokens = self.tokens();
        let head = tokens.get(i)?.head;
        (head != i && head < tokens.len()).then_some(head)
    }

    /// Direct dependents of token `i`, in sentence order
    fn children(&self, i: usize) -> Vec<usize> {
        (0..self.tokens().len())
            .filter(|&j| j != i && self.head(j) == Some(i))
            .collect()
    }

    /// Token `i` and all its transitive dependents, in sentence order
    fn subtree(&self, i: usize) -> Vec<usize> {
        let len = self.tokens().len();
        if i >= len {
            return Vec::new();
        }

        (0..len)
            .filter(|&j| {
                let mut current = j;
                // A well-formed chain reaches the root in fewer than `len` hops
                for _ in 0..len {
                    if current == i {
                        return true;
                    }
                    match self.head(current) {
                        Some(next) => current = next,
                        None => return false,
                    }
                }
                false
            })
            .collect()
    }
}

/// A dependency-parsed sentence as delivered by the external parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSentence {
    /// Tokens in sentence order
    pub tokens: Vec<Token>,
}

impl ParsedSentence {
    /// Create a sentence from tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl SentenceParse for ParsedSentence {
    fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The first token whose head points at itself
    fn root(&self) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .find(|(i, t)| t.head == *i)
            .map(|(i, _)| i)
    }
}

/// A paper summary together with the parse of its combined text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedPaper {
    #[serde(flatten)]
    pub summary: PaperSummary,

    /// Sentences of `summary.combined_text()`, in order
    #[serde(default)]
    pub sentences: Vec<ParsedSentence>,
}

impl ParsedPaper {
    /// Create a parsed paper
    pub fn new(summary: PaperSummary, sentences: Vec<ParsedSentence>) -> Self {
        Self { summary, sentences }
    }
}

/// Trait for external syntactic parsers
pub trait SyntaxParser: Send + Sync {
    /// Split `text` into sentences and dependency-parse each one
    fn parse(&self, text: &str) -> Result<Vec<ParsedSentence>>;

    /// Get parser name for logging
    fn name(&self) -> &str;
}
