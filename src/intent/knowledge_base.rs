//! Intent definitions: example phrases and response templates.
//!
//! The knowledge base is fixed for the lifetime of a process. It is either
//! the built-in one or loaded once from a JSON file of the form:
//!
//! ```json
//! [
//!   { "intent": "greet", "patterns": ["hello", "hi"], "response_template": "Hello!" }
//! ]
//! ```
//!
//! `{}` inside a pattern marks where a product name would go. The analyzer
//! drops it, so the pattern trains on its surrounding words only.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StockbotError};
use crate::intent::types::Intent;

/// Example phrases and optional response template of one intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    /// The intent being defined.
    pub intent: Intent,
    /// Example phrases, used only to train the matcher.
    pub patterns: Vec<String>,
    /// Reply text (or reply prefix) for this intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_template: Option<String>,
}

impl IntentDefinition {
    /// Create a definition from borrowed phrases.
    pub fn new(intent: Intent, patterns: &[&str], response_template: Option<&str>) -> Self {
        IntentDefinition {
            intent,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            response_template: response_template.map(str::to_string),
        }
    }
}

/// Validated, ordered set of intent definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    definitions: Vec<IntentDefinition>,
}

impl KnowledgeBase {
    /// Create a knowledge base, checking that:
    /// - there is at least one definition,
    /// - `unknown` is not defined (it is the fallback, never trained),
    /// - no intent is defined twice,
    /// - every definition has at least one non-blank pattern.
    pub fn new(definitions: Vec<IntentDefinition>) -> Result<Self> {
        if definitions.is_empty() {
            return Err(StockbotError::knowledge_base(
                "at least one intent must be defined",
            ));
        }

        let mut seen = HashSet::new();
        for definition in &definitions {
            if definition.intent == Intent::Unknown {
                return Err(StockbotError::knowledge_base(
                    "'unknown' is the fallback intent and cannot have patterns",
                ));
            }
            if !seen.insert(definition.intent) {
                return Err(StockbotError::knowledge_base(format!(
                    "intent '{}' is defined more than once",
                    definition.intent
                )));
            }
            if definition.patterns.iter().all(|p| p.trim().is_empty()) {
                return Err(StockbotError::knowledge_base(format!(
                    "intent '{}' needs at least one example phrase",
                    definition.intent
                )));
            }
        }

        Ok(KnowledgeBase { definitions })
    }

    /// The knowledge base shipped with the binary.
    pub fn builtin() -> Self {
        KnowledgeBase {
            definitions: vec![
                IntentDefinition::new(
                    Intent::InventoryStatus,
                    &[
                        "show all inventory",
                        "what's in stock",
                        "inventory status",
                        "list all products",
                    ],
                    Some("Here is the full inventory status:"),
                ),
                IntentDefinition::new(
                    Intent::LowStock,
                    &[
                        "low stock items",
                        "what needs restocking",
                        "show me low inventory",
                        "are we running out of anything",
                    ],
                    Some("Here are the items that are currently low on stock:"),
                ),
                IntentDefinition::new(
                    Intent::ProductDetails,
                    &[
                        "how many {} do we have",
                        "what is the stock level for {}",
                        "details for {}",
                        "tell me about {}",
                    ],
                    None,
                ),
                IntentDefinition::new(
                    Intent::Greet,
                    &["hello", "hi", "hey", "good morning"],
                    Some("Hello! How can I help you with your inventory today?"),
                ),
                IntentDefinition::new(
                    Intent::Goodbye,
                    &["bye", "goodbye", "see you later", "thanks bye"],
                    Some("Goodbye! Have a great day."),
                ),
            ],
        }
    }

    /// Parse and validate a knowledge base from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<IntentDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    /// Load and validate a knowledge base from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StockbotError::not_found(format!(
                "knowledge base file {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read knowledge base {}", path.display()))?;
        Self::from_json(&content)
    }

    /// All definitions, in declaration order.
    pub fn definitions(&self) -> &[IntentDefinition] {
        &self.definitions
    }

    /// Definition of `intent`, if it has one.
    pub fn get(&self, intent: Intent) -> Option<&IntentDefinition> {
        self.definitions.iter().find(|d| d.intent == intent)
    }

    /// Response template of `intent`, if it has one.
    pub fn template(&self, intent: Intent) -> Option<&str> {
        self.get(intent)
            .and_then(|d| d.response_template.as_deref())
    }

    /// Every example phrase of every intent, in declaration order.
    pub fn all_patterns(&self) -> Vec<String> {
        self.definitions
            .iter()
            .flat_map(|d| d.patterns.iter().cloned())
            .collect()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let builtin = KnowledgeBase::builtin();
        let validated = KnowledgeBase::new(builtin.definitions().to_vec()).unwrap();
        assert_eq!(validated, builtin);
        assert_eq!(builtin.all_patterns().len(), 20);
    }

    #[test]
    fn test_builtin_templates() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.template(Intent::Greet),
            Some("Hello! How can I help you with your inventory today?")
        );
        assert_eq!(kb.template(Intent::ProductDetails), None);
        assert_eq!(kb.template(Intent::Unknown), None);
    }

    #[test]
    fn test_rejects_unknown_definition() {
        let err = KnowledgeBase::new(vec![IntentDefinition::new(
            Intent::Unknown,
            &["huh"],
            None,
        )])
        .unwrap_err();
        assert!(matches!(err, StockbotError::KnowledgeBase(_)));
    }

    #[test]
    fn test_rejects_empty_patterns() {
        let err = KnowledgeBase::new(vec![IntentDefinition::new(Intent::Greet, &[], None)])
            .unwrap_err();
        assert!(err.to_string().contains("greet"));

        let err = KnowledgeBase::new(vec![IntentDefinition::new(Intent::Greet, &["  "], None)])
            .unwrap_err();
        assert!(matches!(err, StockbotError::KnowledgeBase(_)));
    }

    #[test]
    fn test_rejects_duplicates_and_empty_list() {
        let err = KnowledgeBase::new(vec![
            IntentDefinition::new(Intent::Greet, &["hello"], None),
            IntentDefinition::new(Intent::Greet, &["hi"], None),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));

        assert!(KnowledgeBase::new(Vec::new()).is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"intent": "greet", "patterns": ["hello", "howdy"], "response_template": "Howdy!"},
            {"intent": "check_low_stock", "patterns": ["anything low"]}
        ]"#;

        let kb = KnowledgeBase::from_json(json).unwrap();
        assert_eq!(kb.definitions().len(), 2);
        assert_eq!(kb.template(Intent::Greet), Some("Howdy!"));
        assert_eq!(kb.template(Intent::LowStock), None);
    }

    #[test]
    fn test_from_json_rejects_unknown_intent_name() {
        let json = r#"[{"intent": "get_top_sellers", "patterns": ["top"]}]"#;
        assert!(matches!(
            KnowledgeBase::from_json(json),
            Err(StockbotError::Json(_))
        ));
    }
}
