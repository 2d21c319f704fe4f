//! TF-IDF intent matcher.
//!
//! Every intent is scored by the best cosine similarity between the utterance
//! and any of its example phrases. The best-scoring intent wins if its score
//! is strictly greater than the configured threshold; otherwise the answer is
//! `unknown`.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::{Result, StockbotError};
use crate::intent::classifier::IntentClassifier;
use crate::intent::knowledge_base::KnowledgeBase;
use crate::intent::tfidf::{TfIdfVectorizer, cosine_similarity};
use crate::intent::types::{Classification, Intent, IntentScore};

/// Default confidence threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Configuration for the TF-IDF matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Best score must be strictly greater than this to accept an intent.
    pub threshold: f64,
    /// Regex that extracts tokens from utterances and example phrases.
    pub token_pattern: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            threshold: DEFAULT_THRESHOLD,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
        }
    }
}

impl MatcherConfig {
    /// Check that the threshold lies in `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..1.0).contains(&self.threshold) {
            return Err(StockbotError::invalid_config(format!(
                "matcher threshold must be in [0, 1), got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Build the analyzer described by this configuration.
    pub fn analyzer(&self) -> Result<Arc<dyn Analyzer>> {
        Ok(Arc::new(StandardAnalyzer::with_token_pattern(
            &self.token_pattern,
        )?))
    }
}

/// Intent matcher over a fixed knowledge base.
///
/// The model (vocabulary, weights, example phrase vectors) is computed once
/// in [`IntentMatcher::new`] and never mutated, so a matcher can be shared
/// across threads freely.
#[derive(Debug)]
pub struct IntentMatcher {
    /// TF-IDF vectorizer fitted on every example phrase.
    vectorizer: TfIdfVectorizer,
    /// Example phrase vectors per intent, in knowledge base order.
    prototypes: Vec<(Intent, Vec<Vec<f64>>)>,
    config: MatcherConfig,
}

impl IntentMatcher {
    /// Fit a matcher on `knowledge_base`.
    pub fn new(knowledge_base: &KnowledgeBase, config: MatcherConfig) -> Result<Self> {
        let analyzer = config.analyzer()?;
        Self::with_analyzer(knowledge_base, analyzer, config)
    }

    /// Fit a matcher on the built-in knowledge base with default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&KnowledgeBase::builtin(), MatcherConfig::default())
    }

    /// Fit a matcher with an explicit analyzer; `config.token_pattern` is
    /// ignored.
    pub fn with_analyzer(
        knowledge_base: &KnowledgeBase,
        analyzer: Arc<dyn Analyzer>,
        config: MatcherConfig,
    ) -> Result<Self> {
        config.validate()?;
        // An intent whose phrases all analyze to nothing could never score.
        for definition in knowledge_base.definitions() {
            if definition
                .patterns
                .iter()
                .all(|pattern| analyzer.terms(pattern).is_empty())
            {
                return Err(StockbotError::knowledge_base(format!(
                    "intent {} has no example phrase with a usable token",
                    definition.intent
                )));
            }
        }
        let vectorizer = TfIdfVectorizer::fit(analyzer, &knowledge_base.all_patterns());

        let prototypes = knowledge_base
            .definitions()
            .iter()
            .map(|definition| {
                let vectors = definition
                    .patterns
                    .iter()
                    .map(|pattern| vectorizer.transform(pattern))
                    .collect();
                (definition.intent, vectors)
            })
            .collect();

        debug!(
            "fitted intent matcher: {} terms, {} phrases, threshold {}",
            vectorizer.vocabulary_size(),
            vectorizer.n_documents(),
            config.threshold
        );

        Ok(IntentMatcher {
            vectorizer,
            prototypes,
            config,
        })
    }

    /// Classify one utterance.
    pub fn classify(&self, utterance: &str) -> Classification {
        let query = self.vectorizer.transform(utterance);

        let scores: Vec<IntentScore> = self
            .prototypes
            .iter()
            .map(|(intent, vectors)| IntentScore {
                intent: *intent,
                score: vectors
                    .iter()
                    .map(|vector| cosine_similarity(&query, vector))
                    .fold(0.0, f64::max),
            })
            .collect();

        // Strictly greater: the earliest intent wins a tie.
        let best = scores.iter().fold(None::<IntentScore>, |best, candidate| {
            match best {
                Some(b) if candidate.score <= b.score => Some(b),
                _ => Some(*candidate),
            }
        });

        let (intent, confidence) = match best {
            Some(b) if b.score > self.config.threshold => (b.intent, b.score),
            Some(b) => (Intent::Unknown, b.score),
            None => (Intent::Unknown, 0.0),
        };

        Classification {
            intent,
            confidence,
            scores,
        }
    }

    /// Classify many utterances in parallel.
    ///
    /// Results come back in input order.
    pub fn classify_batch<S: AsRef<str> + Sync>(&self, utterances: &[S]) -> Vec<Classification> {
        utterances
            .par_iter()
            .map(|utterance| self.classify(utterance.as_ref()))
            .collect()
    }

    /// The confidence threshold in use.
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }
}

impl IntentClassifier for IntentMatcher {
    fn classify(&self, utterance: &str) -> Classification {
        IntentMatcher::classify(self, utterance)
    }

    fn classify_batch(&self, utterances: &[String]) -> Vec<Classification> {
        IntentMatcher::classify_batch(self, utterances)
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
