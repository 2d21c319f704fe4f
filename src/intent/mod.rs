//! Intent classification for inventory questions.
//!
//! Two interchangeable classifiers implement [`IntentClassifier`]:
//!
//! - [`IntentMatcher`]: TF-IDF vectors and cosine similarity against the
//!   example phrases of a [`KnowledgeBase`], with an `unknown` fallback below
//!   a confidence threshold.
//! - [`KeywordIntentClassifier`]: key phrase containment rules.
//!
//! # Example
//!
//! ```
//! use stockbot::intent::{Intent, IntentMatcher, KnowledgeBase, MatcherConfig};
//!
//! let matcher = IntentMatcher::new(&KnowledgeBase::builtin(), MatcherConfig::default()).unwrap();
//! assert_eq!(matcher.classify("what needs restocking").intent, Intent::LowStock);
//! assert_eq!(matcher.classify("zebra").intent, Intent::Unknown);
//! ```

mod classifier;
mod keyword;
mod knowledge_base;
mod matcher;
mod tfidf;
mod types;

pub use classifier::IntentClassifier;
pub use keyword::{KeywordIntentClassifier, KeywordRule};
pub use knowledge_base::{IntentDefinition, KnowledgeBase};
pub use matcher::{DEFAULT_THRESHOLD, IntentMatcher, MatcherConfig};
pub use tfidf::{TfIdfVectorizer, cosine_similarity};
pub use types::{Classification, Intent, IntentScore};
