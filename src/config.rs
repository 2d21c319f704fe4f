//! Chatbot configuration.
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default. Command line flags override what the file says.
//!
//! ```json
//! {
//!   "classifier": "tfidf",
//!   "matcher": { "threshold": 0.35 },
//!   "knowledge_base": "intents.json"
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StockbotError};
use crate::intent::{
    IntentClassifier, IntentMatcher, KeywordIntentClassifier, KeywordRule, KnowledgeBase,
    MatcherConfig,
};

/// Which interpreter maps utterances to intents.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// TF-IDF cosine similarity against example phrases
    #[default]
    Tfidf,
    /// Key phrase containment rules
    Keyword,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    pub classifier: ClassifierKind,
    pub matcher: MatcherConfig,
    /// Intent definitions file; the built-in knowledge base when absent.
    pub knowledge_base: Option<PathBuf>,
    /// Rules for the keyword classifier; the defaults when absent.
    pub keyword_rules: Option<Vec<KeywordRule>>,
}

impl ChatbotConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| StockbotError::invalid_config(format!("invalid configuration: {e}")))
    }

    /// Load a configuration file. A relative knowledge base path is resolved
    /// against the directory of the configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StockbotError::not_found(format!(
                "configuration file {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            StockbotError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_json(&content)?;

        if let (Some(kb), Some(dir)) = (config.knowledge_base.as_mut(), path.parent()) {
            if kb.is_relative() {
                *kb = dir.join(&*kb);
            }
        }
        Ok(config)
    }

    /// The configured knowledge base.
    pub fn knowledge_base(&self) -> Result<KnowledgeBase> {
        match &self.knowledge_base {
            Some(path) => KnowledgeBase::load(path),
            None => Ok(KnowledgeBase::builtin()),
        }
    }

    /// Build the configured classifier over `knowledge_base`.
    pub fn build_classifier(
        &self,
        knowledge_base: &KnowledgeBase,
    ) -> Result<Arc<dyn IntentClassifier>> {
        match self.classifier {
            ClassifierKind::Tfidf => Ok(Arc::new(IntentMatcher::new(
                knowledge_base,
                self.matcher.clone(),
            )?)),
            ClassifierKind::Keyword => {
                let rules = self
                    .keyword_rules
                    .clone()
                    .unwrap_or_else(KeywordRule::defaults);
                Ok(Arc::new(KeywordIntentClassifier::new(
                    rules,
                    self.matcher.analyzer()?,
                )))
            }
        }
    }
}
