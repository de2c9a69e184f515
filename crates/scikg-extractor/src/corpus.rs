//! Corpus-level extraction
//!
//! Runs the relation extractor over every sentence of every paper and
//! collects per-paper triples for the graph builder.

use scikg_core::{PaperSummary, PaperTriples, ParsedPaper, Result, SyntaxParser};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::relation::DependencyRe;
use crate::stats::ExtractionStats;

/// Result of extracting a whole corpus
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusExtraction {
    /// Per-paper triples, in corpus order
    pub papers: Vec<PaperTriples>,
    /// Aggregated counters
    pub stats: ExtractionStats,
}

impl CorpusExtraction {
    /// Total triples across all papers
    pub fn triple_count(&self) -> usize {
        self.papers.iter().map(|p| p.triples.len()).sum()
    }
}

/// Drives a [`DependencyRe`] over a corpus of papers
pub struct CorpusExtractor {
    re: DependencyRe,
}

impl CorpusExtractor {
    /// Create a corpus extractor
    pub fn new(re: DependencyRe) -> Self {
        Self { re }
    }

    /// Extract triples from papers whose sentences are already parsed.
    ///
    /// Papers are identified by their corpus position.
    pub fn extract_parsed(&self, papers: &[ParsedPaper]) -> CorpusExtraction {
        let mut result = CorpusExtraction::default();

        for (index, paper) in papers.iter().enumerate() {
            let mut stats = ExtractionStats::default();
            let triples: Vec<_> = paper
                .sentences
                .iter()
                .flat_map(|sentence| self.re.extract_with_stats(sentence, &mut stats))
                .collect();

            debug!(
                paper = index,
                title = %paper.summary.title,
                sentences = paper.sentences.len(),
                triples = triples.len(),
                "paper extracted"
            );

            result.stats.merge(&stats);
            result
                .papers
                .push(PaperTriples::new(index.to_string(), &paper.summary.title, triples));
        }

        info!(
            papers = result.papers.len(),
            sentences = result.stats.sentences,
            rejected = result.stats.sentences_rejected(),
            triples = result.stats.triples_emitted,
            "corpus extraction complete"
        );

        result
    }

    /// Parse each paper's combined text with `parser`, then extract.
    ///
    /// A parser failure aborts the run; an empty parse is a paper with no
    /// triples.
    pub fn extract_with_parser(
        &self,
        papers: &[PaperSummary],
        parser: &dyn SyntaxParser,
    ) -> Result<CorpusExtraction> {
        debug!(parser = parser.name(), papers = papers.len(), "parsing corpus");

        let parsed = papers
            .iter()
            .map(|paper| -> Result<ParsedPaper> {
                let sentences = parser.parse(&paper.combined_text())?;
                Ok(ParsedPaper::new(paper.clone(), sentences))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.extract_parsed(&parsed))
    }
}

impl Default for CorpusExtractor {
    fn default() -> Self {
        Self::new(DependencyRe::new())
    }
}
