//! The chatbot: classifier, product name extractor and response composer
//! wired together behind one `respond` call.

use std::sync::Arc;

use log::debug;

use crate::config::ChatbotConfig;
use crate::entity::ProductNameExtractor;
use crate::error::Result;
use crate::intent::{Classification, IntentClassifier, IntentMatcher, KnowledgeBase};
use crate::response::ResponseComposer;
use crate::store::InventoryStore;

/// Answers inventory questions from a store.
#[derive(Debug, Clone)]
pub struct Chatbot {
    classifier: Arc<dyn IntentClassifier>,
    store: Arc<dyn InventoryStore>,
    extractor: ProductNameExtractor,
    composer: ResponseComposer,
}

impl Chatbot {
    /// Create a chatbot from its parts. Templates come from `knowledge_base`.
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        store: Arc<dyn InventoryStore>,
        knowledge_base: &KnowledgeBase,
    ) -> Self {
        Chatbot {
            composer: ResponseComposer::new(store.clone(), knowledge_base),
            extractor: ProductNameExtractor::new(),
            classifier,
            store,
        }
    }

    /// Create a chatbot with the built-in knowledge base and the default
    /// TF-IDF matcher.
    pub fn with_defaults(store: Arc<dyn InventoryStore>) -> Result<Self> {
        let knowledge_base = KnowledgeBase::builtin();
        let matcher = IntentMatcher::new(&knowledge_base, Default::default())?;
        Ok(Self::new(Arc::new(matcher), store, &knowledge_base))
    }

    /// Create a chatbot as described by `config`.
    pub fn from_config(config: &ChatbotConfig, store: Arc<dyn InventoryStore>) -> Result<Self> {
        let knowledge_base = config.knowledge_base()?;
        let classifier = config.build_classifier(&knowledge_base)?;
        Ok(Self::new(classifier, store, &knowledge_base))
    }

    /// Classify an utterance without answering it.
    pub fn classify(&self, utterance: &str) -> Classification {
        self.classifier.classify(utterance)
    }

    /// Classify many utterances, keeping input order.
    pub fn classify_batch(&self, utterances: &[String]) -> Vec<Classification> {
        self.classifier.classify_batch(utterances)
    }

    /// Answer one utterance. Only store failures are errors.
    pub fn respond(&self, utterance: &str) -> Result<String> {
        self.respond_with_classification(utterance)
            .map(|(_, response)| response)
    }

    /// Answer one utterance and return the classification the answer was
    /// built from.
    pub fn respond_with_classification(
        &self,
        utterance: &str,
    ) -> Result<(Classification, String)> {
        let classification = self.classify(utterance);
        debug!(
            "{} classified {:?} as {} ({:.3})",
            self.classifier.name(),
            utterance,
            classification.intent,
            classification.confidence
        );

        let product = if classification.intent.needs_entity() {
            self.extractor.extract(self.store.as_ref(), utterance)?
        } else {
            None
        };
        if let Some(name) = &product {
            debug!("extracted product {name:?}");
        }

        let response = self
            .composer
            .compose(classification.intent, product.as_deref())?;
        Ok((classification, response))
    }

    pub fn classifier(&self) -> &Arc<dyn IntentClassifier> {
        &self.classifier
    }

    pub fn store(&self) -> &Arc<dyn InventoryStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;
    use crate::store::{InventoryEditor, MemoryInventoryStore, ProductRecord};

    fn chatbot() -> Chatbot {
        let store = MemoryInventoryStore::new();
        store
            .add_product(ProductRecord::new("P1", "Desk Lamp", "Lighting", 2, 5).with_price(24.0))
            .unwrap();
        Chatbot::with_defaults(Arc::new(store)).unwrap()
    }

    #[test]
    fn test_respond() {
        let chatbot = chatbot();
        assert_eq!(
            chatbot.respond("hello").unwrap(),
            "Hello! How can I help you with your inventory today?"
        );
        assert_eq!(
            chatbot.respond("show all inventory").unwrap(),
            "There are 1 products in stock."
        );

        let details = chatbot.respond("how many desk lamp do we have").unwrap();
        assert!(details.starts_with("Here are the details for Desk Lamp:"));
        assert!(details.contains("- Price: $24.00"));
        assert!(details.ends_with("This item is low on stock."));
    }

    #[test]
    fn test_respond_with_classification() {
        let chatbot = chatbot();
        let (classification, response) = chatbot
            .respond_with_classification("what needs restocking")
            .unwrap();
        assert_eq!(classification.intent, Intent::LowStock);
        assert_eq!(classification, chatbot.classify("what needs restocking"));
        assert_eq!(
            response,
            chatbot.respond("what needs restocking").unwrap()
        );
    }

    #[test]
    fn test_classify_batch_keeps_order() {
        let chatbot = chatbot();
        let utterances = vec!["bye".to_string(), "zebra".to_string(), "hello".to_string()];
        let intents: Vec<Intent> = chatbot
            .classify_batch(&utterances)
            .into_iter()
            .map(|c| c.intent)
            .collect();
        assert_eq!(intents, vec![Intent::Goodbye, Intent::Unknown, Intent::Greet]);
    }

    #[test]
    fn test_entity_only_for_product_details() {
        let chatbot = chatbot();
        assert_eq!(chatbot.classify("desk lamp hello").intent, Intent::Greet);
        assert_eq!(
            chatbot.respond("desk lamp hello").unwrap(),
            "Hello! How can I help you with your inventory today?"
        );
    }
}
