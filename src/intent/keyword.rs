//! Keyword-based intent classifier.
//!
//! A rule lists key phrases for one intent. A key phrase matches when its
//! analyzed tokens appear contiguously in the analyzed utterance, so "hi"
//! matches "hi there" but not "this". The intent with the most matching key
//! phrases wins; on a tie the earlier rule wins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::intent::classifier::IntentClassifier;
use crate::intent::types::{Classification, Intent, IntentScore};

/// Key phrases for one intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Intent selected by this rule.
    pub intent: Intent,
    /// Words or multi-word phrases.
    pub keywords: Vec<String>,
}

impl KeywordRule {
    /// Create a rule from borrowed keywords.
    pub fn new(intent: Intent, keywords: &[&str]) -> Self {
        KeywordRule {
            intent,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// The default rule set, most specific first.
    pub fn defaults() -> Vec<KeywordRule> {
        vec![
            KeywordRule::new(
                Intent::LowStock,
                &[
                    "low stock",
                    "restock",
                    "restocking",
                    "reorder",
                    "alert",
                    "running out",
                ],
            ),
            KeywordRule::new(
                Intent::ProductDetails,
                &["how many", "details", "tell me about", "stock level"],
            ),
            KeywordRule::new(Intent::InventoryStatus, &["inventory", "stock", "products"]),
            KeywordRule::new(Intent::Greet, &["hello", "hi", "hey"]),
            KeywordRule::new(Intent::Goodbye, &["bye", "goodbye"]),
        ]
    }
}

/// Keyword-based intent classifier.
pub struct KeywordIntentClassifier {
    /// Analyzed key phrases per intent, in rule order.
    rules: Vec<(Intent, Vec<Vec<String>>)>,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for KeywordIntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordIntentClassifier")
            .field("rules", &self.rules)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl KeywordIntentClassifier {
    /// Create a keyword classifier. Key phrases that analyze to no tokens
    /// are dropped.
    pub fn new(rules: Vec<KeywordRule>, analyzer: Arc<dyn Analyzer>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let phrases = rule
                    .keywords
                    .iter()
                    .map(|keyword| analyzer.terms(keyword))
                    .filter(|terms| !terms.is_empty())
                    .collect();
                (rule.intent, phrases)
            })
            .collect();

        KeywordIntentClassifier { rules, analyzer }
    }

    /// Create a keyword classifier with [`KeywordRule::defaults`].
    pub fn with_default_rules(analyzer: Arc<dyn Analyzer>) -> Self {
        Self::new(KeywordRule::defaults(), analyzer)
    }

    fn contains_phrase(terms: &[String], phrase: &[String]) -> bool {
        terms.windows(phrase.len()).any(|window| window == phrase)
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn classify(&self, utterance: &str) -> Classification {
        let terms = self.analyzer.terms(utterance);

        let scores: Vec<IntentScore> = self
            .rules
            .iter()
            .map(|(intent, phrases)| IntentScore {
                intent: *intent,
                score: phrases
                    .iter()
                    .filter(|phrase| Self::contains_phrase(&terms, phrase))
                    .count() as f64,
            })
            .collect();

        let mut best: Option<IntentScore> = None;
        for candidate in &scores {
            if candidate.score > best.map_or(0.0, |b| b.score) {
                best = Some(*candidate);
            }
        }

        match best {
            Some(b) => Classification {
                intent: b.intent,
                confidence: 1.0,
                scores,
            },
            None => Classification {
                scores,
                ..Classification::unknown()
            },
        }
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
