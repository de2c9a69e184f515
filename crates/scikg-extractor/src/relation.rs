//! Relation Extraction (RE) module
//!
//! Extracts (subject, predicate, object) triples from dependency-parsed
//! sentences. The predicate is the sentence's main verb, the subject and
//! object are the full noun phrases of its arguments.

use std::collections::HashSet;

use scikg_core::{
    ExtractorConfig, PartOfSpeech, SentenceParse, Triple, MAX_ENTITY_TOKENS, MIN_ENTITY_LEN,
};
use tracing::debug;

use crate::normalize::{normalize, token_count};
use crate::stats::{ExtractionStats, SentenceOutcome};
use crate::RelationExtractor;

/// Dependency labels containing this marker are treated as subjects
const SUBJECT_MARKER: &str = "subj";
/// Dependency labels containing this marker are treated as objects
const OBJECT_MARKER: &str = "obj";
/// Dependency label of adverbs folded into the predicate
const ADVERB_MODIFIER: &str = "advmod";

// ============================================================================
// Dependency-based RE
// ============================================================================

/// Rule-based relation extractor over dependency parses
#[derive(Debug, Clone)]
pub struct DependencyRe {
    /// Lower-cased generic referents rejected as argument heads
    stop_words: HashSet<String>,
    /// Lower-cased root lemmas that reject the sentence
    skip_lemmas: HashSet<String>,
    /// Minimum entity length in characters
    min_entity_len: usize,
    /// Maximum underscore-separated tokens per entity
    max_entity_tokens: usize,
}

impl DependencyRe {
    /// Create an extractor with the default stop words and skipped lemmas
    pub fn new() -> Self {
        Self::with_config(&ExtractorConfig::default())
    }

    /// Create with custom config.
    ///
    /// Entity bounds can only be tightened: a looser `min_entity_len` or
    /// `max_entity_tokens` falls back to the built-in limit.
    pub fn with_config(config: &ExtractorConfig) -> Self {
        Self {
            stop_words: config.stop_words.iter().map(|w| w.to_lowercase()).collect(),
            skip_lemmas: config.skip_lemmas.iter().map(|l| l.to_lowercase()).collect(),
            min_entity_len: config.min_entity_len.max(MIN_ENTITY_LEN),
            max_entity_tokens: config.max_entity_tokens.min(MAX_ENTITY_TOKENS),
        }
    }

    /// Extract triples and count what happened along the way
    pub fn extract_with_stats(
        &self,
        sentence: &dyn SentenceParse,
        stats: &mut ExtractionStats,
    ) -> Vec<Triple> {
        let (triples, outcome) = self.extract_sentence(sentence, stats);
        debug!(?outcome, triples = triples.len(), "sentence processed");
        stats.record(outcome);
        triples
    }

    fn extract_sentence(
        &self,
        sentence: &dyn SentenceParse,
        stats: &mut ExtractionStats,
    ) -> (Vec<Triple>, SentenceOutcome) {
        let tokens = sentence.tokens();

        let Some(root) = sentence.root() else {
            return (Vec::new(), SentenceOutcome::NoRoot);
        };
        let Some(root_token) = tokens.get(root) else {
            return (Vec::new(), SentenceOutcome::NoRoot);
        };

        if root_token.pos != PartOfSpeech::Verb {
            return (Vec::new(), SentenceOutcome::NonVerbRoot);
        }
        if self.skip_lemmas.contains(&root_token.lemma.to_lowercase()) {
            return (Vec::new(), SentenceOutcome::AuxiliaryRoot);
        }

        let subjects = self.arguments(sentence, SUBJECT_MARKER);
        let objects = self.arguments(sentence, OBJECT_MARKER);
        if subjects.is_empty() || objects.is_empty() {
            return (Vec::new(), SentenceOutcome::MissingArguments);
        }

        let predicate = self.predicate(sentence, root);
        let mut triples = Vec::new();

        for &subject in &subjects {
            for &object in &objects {
                if !Self::same_clause(sentence, root, object) {
                    stats.pairs_out_of_clause += 1;
                    continue;
                }

                let subject_id = normalize(&Self::phrase(sentence, subject));
                let object_id = normalize(&Self::phrase(sentence, object));

                if self.is_valid_entity(&subject_id) && self.is_valid_entity(&object_id) {
                    stats.triples_emitted += 1;
                    triples.push(Triple::new(subject_id, predicate.clone(), object_id));
                } else {
                    stats.triples_filtered += 1;
                }
            }
        }

        let outcome = if triples.is_empty() {
            SentenceOutcome::NoTriples
        } else {
            SentenceOutcome::Extracted
        };
        (triples, outcome)
    }

    /// Tokens whose dependency role contains `marker`, minus stop words
    fn arguments(&self, sentence: &dyn SentenceParse, marker: &str) -> Vec<usize> {
        sentence
            .tokens()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.dep.contains(marker) && !self.stop_words.contains(&t.lower()))
            .map(|(i, _)| i)
            .collect()
    }

    /// The object must hang off the root directly or through one intermediate
    /// token (e.g. a preposition); deeper objects belong to another clause.
    fn same_clause(sentence: &dyn SentenceParse, root: usize, object: usize) -> bool {
        match sentence.head(object) {
            Some(head) if head == root => true,
            Some(head) => sentence.head(head) == Some(root),
            None => false,
        }
    }

    /// Lower-cased text of the token's subtree, in sentence order
    fn phrase(sentence: &dyn SentenceParse, head: usize) -> String {
        let tokens = sentence.tokens();
        sentence
            .subtree(head)
            .into_iter()
            .filter_map(|i| tokens.get(i))
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Adverbial modifiers of the root followed by its lemma
    fn predicate(&self, sentence: &dyn SentenceParse, root: usize) -> String {
        let tokens = sentence.tokens();
        let mut parts: Vec<String> = sentence
            .children(root)
            .into_iter()
            .filter_map(|i| tokens.get(i))
            .filter(|t| t.dep == ADVERB_MODIFIER)
            .map(|t| t.lower())
            .collect();
        if let Some(root_token) = tokens.get(root) {
            parts.push(root_token.lemma.clone());
        }
        parts.join(" ")
    }

    fn is_valid_entity(&self, id: &str) -> bool {
        id.chars().count() >= self.min_entity_len && token_count(id) <= self.max_entity_tokens
    }
}

impl Default for DependencyRe {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationExtractor for DependencyRe {
    fn extract(&self, sentence: &dyn SentenceParse) -> Vec<Triple> {
        let mut stats = ExtractionStats::default();
        self.extract_with_stats(sentence, &mut stats)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scikg_core::{ParsedSentence, PartOfSpeech::*, Token};

    fn tok(text: &str, lemma: &str, pos: PartOfSpeech, dep: &str, head: usize) -> Token {
        Token::new(text, lemma, pos, dep, head)
    }

    /// "Microgravity exposure significantly decreases bone density ."
    fn bone_sentence() -> ParsedSentence {
        ParsedSentence::new(vec![
            tok("Microgravity", "microgravity", Noun, "compound", 1),
            tok("exposure", "exposure", Noun, "nsubj", 3),
            tok("significantly", "significantly", Adv, "advmod", 3),
            tok("decreases", "decrease", Verb, "ROOT", 3),
            tok("bone", "bone", Noun, "compound", 5),
            tok("density", "density", Noun, "dobj", 3),
            tok(".", ".", Punct, "punct", 3),
        ])
    }

    #[test]
    fn test_extracts_full_phrases() {
        let re = DependencyRe::new();
        let triples = re.extract(&bone_sentence());

        assert_eq!(
            triples,
            vec![Triple::new(
                "microgravity_exposure",
                "significantly decrease",
                "bone_density"
            )]
        );
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let re = DependencyRe::new();
        let sentence = bone_sentence();
        assert_eq!(re.extract(&sentence), re.extract(&sentence));
    }

    #[test]
    fn test_rejects_auxiliary_root() {
        // "Bone density has several determinants ."
        let sentence = ParsedSentence::new(vec![
            tok("Bone", "bone", Noun, "compound", 1),
            tok("density", "density", Noun, "nsubj", 2),
            tok("has", "have", Verb, "ROOT", 2),
            tok("several", "several", Adj, "amod", 4),
            tok("determinants", "determinant", Noun, "dobj", 2),
        ]);
        let mut stats = ExtractionStats::default();
        let triples = DependencyRe::new().extract_with_stats(&sentence, &mut stats);

        assert!(triples.is_empty());
        assert_eq!(stats.auxiliary_root, 1);
    }

    #[test]
    fn test_rejects_non_verb_root() {
        let sentence = ParsedSentence::new(vec![
            tok("Results", "result", Noun, "ROOT", 0),
            tok("overview", "overview", Noun, "dobj", 0),
        ]);
        let mut stats = ExtractionStats::default();
        assert!(DependencyRe::new()
            .extract_with_stats(&sentence, &mut stats)
            .is_empty());
        assert_eq!(stats.non_verb_root, 1);
    }

    #[test]
    fn test_stop_word_subject_excluded() {
        // "We measured bone density ."
        let sentence = ParsedSentence::new(vec![
            tok("We", "we", Pron, "nsubj", 1),
            tok("measured", "measure", Verb, "ROOT", 1),
            tok("bone", "bone", Noun, "compound", 3),
            tok("density", "density", Noun, "dobj", 1),
        ]);
        let mut stats = ExtractionStats::default();
        let triples = DependencyRe::new().extract_with_stats(&sentence, &mut stats);

        assert!(triples.is_empty());
        assert_eq!(stats.missing_arguments, 1);

        // "It alters muscle fibers ."
        let sentence = ParsedSentence::new(vec![
            tok("It", "it", Pron, "nsubj", 1),
            tok("alters", "alter", Verb, "ROOT", 1),
            tok("muscle", "muscle", Noun, "compound", 3),
            tok("fibers", "fiber", Noun, "dobj", 1),
        ]);
        assert!(DependencyRe::new().extract(&sentence).is_empty());
    }

    #[test]
    fn test_prepositional_object_within_clause() {
        // "Astronauts rely on resistance exercise ."
        let sentence = ParsedSentence::new(vec![
            tok("Astronauts", "astronaut", Noun, "nsubj", 1),
            tok("rely", "rely", Verb, "ROOT", 1),
            tok("on", "on", Adp, "prep", 1),
            tok("resistance", "resistance", Noun, "compound", 4),
            tok("exercise", "exercise", Noun, "pobj", 2),
            tok(".", ".", Punct, "punct", 1),
        ]);
        let triples = DependencyRe::new().extract(&sentence);
        assert_eq!(
            triples,
            vec![Triple::new("astronauts", "rely", "resistance_exercise")]
        );
    }

    #[test]
    fn test_object_in_other_clause_rejected() {
        // "Cells divide because radiation damages their membranes ."
        let sentence = ParsedSentence::new(vec![
            tok("Cells", "cell", Noun, "nsubj", 1),
            tok("divide", "divide", Verb, "ROOT", 1),
            tok("because", "because", Sconj, "mark", 4),
            tok("radiation", "radiation", Noun, "nsubj", 4),
            tok("damages", "damage", Verb, "advcl", 1),
            tok("their", "their", Pron, "poss", 7),
            tok("cell", "cell", Noun, "compound", 7),
            tok("membranes", "membrane", Noun, "dobj", 8),
            tok("inside", "inside", Adp, "prep", 4),
        ]);
        // "membranes" hangs off "inside" -> "damages" -> root: three hops
        let mut stats = ExtractionStats::default();
        let triples = DependencyRe::new().extract_with_stats(&sentence, &mut stats);

        assert!(triples.is_empty());
        assert_eq!(stats.pairs_out_of_clause, 2);
    }

    #[test]
    fn test_length_and_token_filters() {
        // "UV alters the very long chain of many small fatty acid molecules ."
        let sentence = ParsedSentence::new(vec![
            tok("UV", "uv", Propn, "nsubj", 1),
            tok("alters", "alter", Verb, "ROOT", 1),
            tok("the", "the", Det, "det", 5),
            tok("very", "very", Adv, "advmod", 4),
            tok("long", "long", Adj, "amod", 5),
            tok("chain", "chain", Noun, "dobj", 1),
            tok("of", "of", Adp, "prep", 5),
            tok("many", "many", Adj, "amod", 11),
            tok("small", "small", Adj, "amod", 11),
            tok("fatty", "fatty", Adj, "amod", 11),
            tok("acid", "acid", Noun, "compound", 11),
            tok("molecules", "molecule", Noun, "pobj", 6),
        ]);
        let mut stats = ExtractionStats::default();
        let triples = DependencyRe::new().extract_with_stats(&sentence, &mut stats);

        // "uv" is too short; the object phrase is also too long
        assert!(triples.is_empty());
        assert_eq!(stats.triples_filtered, 1);
        assert_eq!(stats.pairs_out_of_clause, 1);
    }

    #[test]
    fn test_emitted_triples_respect_filters() {
        let re = DependencyRe::new();
        for triple in re.extract(&bone_sentence()) {
            for id in [&triple.subject, &triple.object] {
                assert!(id.chars().count() > 2);
                assert!(id.split('_').count() < 7);
            }
        }
    }

    #[test]
    fn test_malformed_sentences_yield_nothing() {
        let re = DependencyRe::new();
        assert!(re.extract(&ParsedSentence::default()).is_empty());

        let cyclic = ParsedSentence::new(vec![
            tok("cells", "cell", Noun, "nsubj", 1),
            tok("grow", "grow", Verb, "dobj", 0),
        ]);
        assert!(re.extract(&cyclic).is_empty());
    }

    #[test]
    fn test_config_cannot_loosen_entity_bounds() {
        // "... alters !!"
        let sentence = ParsedSentence::new(vec![
            tok("...", "...", Punct, "nsubj", 1),
            tok("alters", "alter", Verb, "ROOT", 1),
            tok("!!", "!!", Punct, "dobj", 1),
        ]);
        let config = ExtractorConfig {
            min_entity_len: 0,
            max_entity_tokens: 20,
            ..Default::default()
        };
        let mut stats = ExtractionStats::default();
        let triples = DependencyRe::with_config(&config).extract_with_stats(&sentence, &mut stats);

        assert!(triples.is_empty());
        assert_eq!(stats.triples_filtered, 1);
    }

    #[test]
    fn test_tighter_config_applies() {
        let config = ExtractorConfig {
            max_entity_tokens: 1,
            ..Default::default()
        };
        // both phrases have two tokens
        assert!(DependencyRe::with_config(&config)
            .extract(&bone_sentence())
            .is_empty());
    }

    /// Parse whose lookups report indices past the end of the sentence
    struct DanglingParse(ParsedSentence);

    impl SentenceParse for DanglingParse {
        fn tokens(&self) -> &[Token] {
            self.0.tokens()
        }

        fn root(&self) -> Option<usize> {
            self.0.root()
        }

        fn children(&self, i: usize) -> Vec<usize> {
            let mut children = self.0.children(i);
            children.push(usize::MAX);
            children
        }

        fn subtree(&self, i: usize) -> Vec<usize> {
            let mut subtree = self.0.subtree(i);
            subtree.push(self.0.len() + 3);
            subtree
        }
    }

    #[test]
    fn test_dangling_lookup_indices_are_skipped() {
        let re = DependencyRe::new();
        let dangling = DanglingParse(bone_sentence());
        assert_eq!(re.extract(&dangling), re.extract(&bone_sentence()));
    }

    #[test]
    fn test_custom_stop_words() {
        let config = ExtractorConfig {
            stop_words: vec!["microgravity".to_string(), "exposure".to_string()],
            ..Default::default()
        };
        let re = DependencyRe::with_config(&config);
        assert!(re.extract(&bone_sentence()).is_empty());
    }

    fn arb_token() -> impl Strategy<Value = Token> {
        (
            "[a-zA-Z .!_-]{0,10}",
            prop::sample::select(vec![Noun, Propn, Pron, Verb, Adv, Adp, Punct]),
            prop::sample::select(vec![
                "nsubj", "nsubjpass", "dobj", "pobj", "advmod", "compound", "prep", "ROOT",
            ]),
            0usize..12,
        )
            .prop_map(|(text, pos, dep, head)| {
                let lemma = if pos == Verb && head % 3 == 0 {
                    "be".to_string()
                } else {
                    text.to_lowercase()
                };
                Token::new(text, lemma, pos, dep, head)
            })
    }

    proptest! {
        // heads range past the sentence end and freely form cycles
        #[test]
        fn prop_random_parses_respect_entity_bounds(
            tokens in prop::collection::vec(arb_token(), 0..10),
            loose in any::<bool>(),
        ) {
            let config = if loose {
                ExtractorConfig { min_entity_len: 0, max_entity_tokens: 50, ..Default::default() }
            } else {
                ExtractorConfig::default()
            };
            let sentence = ParsedSentence::new(tokens);
            let mut stats = ExtractionStats::default();
            let triples = DependencyRe::with_config(&config).extract_with_stats(&sentence, &mut stats);

            prop_assert_eq!(stats.sentences, 1);
            prop_assert_eq!(stats.triples_emitted, triples.len());
            for triple in &triples {
                for id in [&triple.subject, &triple.object] {
                    prop_assert!(id.chars().count() > 2);
                    prop_assert!(id.split('_').count() < 7);
                    prop_assert_eq!(normalize(id), id.clone());
                }
            }
        }
    }
}
