use std::sync::Arc;

use chrono::{DateTime, Utc};

use stockbot::chatbot::Chatbot;
use stockbot::config::{ChatbotConfig, ClassifierKind};
use stockbot::error::{Result, StockbotError};
use stockbot::intent::{Intent, IntentClassifier, IntentMatcher, KnowledgeBase, MatcherConfig};
use stockbot::response::{ALL_GOOD_RESPONSE, UNKNOWN_RESPONSE};
use stockbot::store::{
    InventoryEditor, InventoryStore, LowStockItem, MemoryInventoryStore, ProductRecord,
    ReorderItem, TopSeller,
};

const GREETING: &str = "Hello! How can I help you with your inventory today?";
const FAREWELL: &str = "Goodbye! Have a great day.";

fn store_with(products: Vec<ProductRecord>) -> Result<Arc<MemoryInventoryStore>> {
    let store = MemoryInventoryStore::new();
    for product in products {
        store.add_product(product)?;
    }
    Ok(Arc::new(store))
}

fn lamp_store() -> Result<Arc<MemoryInventoryStore>> {
    store_with(vec![
        ProductRecord::new("PROD001", "Desk Lamp", "Lighting", 2, 5).with_price(29.99),
        ProductRecord::new("PROD002", "Office Chair", "Furniture", 15, 5).with_price(149.0),
    ])
}

#[test]
fn every_example_phrase_classifies_as_its_own_intent() -> Result<()> {
    let knowledge_base = KnowledgeBase::builtin();
    let matcher = IntentMatcher::new(&knowledge_base, MatcherConfig::default())?;

    for definition in knowledge_base.definitions() {
        for pattern in &definition.patterns {
            let classification = matcher.classify(pattern);
            assert_eq!(classification.intent, definition.intent, "{pattern}");
            assert!((classification.confidence - 1.0).abs() < 1e-9, "{pattern}");
        }
    }
    Ok(())
}

#[test]
fn out_of_vocabulary_utterances_are_unknown() -> Result<()> {
    let matcher = IntentMatcher::with_defaults()?;
    for utterance in ["zebra", "quantum flux capacitor", "", "!!! ???", "a b c"] {
        let classification = matcher.classify(utterance);
        assert_eq!(classification.intent, Intent::Unknown, "{utterance:?}");
        assert_eq!(classification.confidence, 0.0);
    }
    Ok(())
}

#[test]
fn greeting_and_farewell_are_verbatim() -> Result<()> {
    let chatbot = Chatbot::with_defaults(lamp_store()?)?;
    assert_eq!(chatbot.respond("hello")?, GREETING);
    assert_eq!(chatbot.respond("bye")?, FAREWELL);
    assert_eq!(chatbot.respond("zebra")?, UNKNOWN_RESPONSE);
    Ok(())
}

#[test]
fn nothing_low_gives_all_good_message() -> Result<()> {
    let store = store_with(vec![ProductRecord::new("P1", "Mug", "Kitchen", 10, 5)])?;
    let chatbot = Chatbot::with_defaults(store)?;
    assert_eq!(chatbot.respond("what needs restocking")?, ALL_GOOD_RESPONSE);
    Ok(())
}

#[test]
fn low_stock_lists_product_names() -> Result<()> {
    let chatbot = Chatbot::with_defaults(lamp_store()?)?;
    assert_eq!(
        chatbot.respond("low stock items")?,
        "Here are the items that are currently low on stock: Desk Lamp"
    );
    Ok(())
}

#[test]
fn product_details_include_low_stock_warning() -> Result<()> {
    let chatbot = Chatbot::with_defaults(lamp_store()?)?;
    let reply = chatbot.respond("how many desk lamp do we have")?;

    let lines: Vec<&str> = reply.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Here are the details for Desk Lamp:");
    assert!(lines.contains(&"- Stock Level: 2 units"));
    assert!(lines.contains(&"- Price: $29.99"));
    assert!(lines.contains(&"- Category: Lighting"));
    assert!(lines.contains(&"- Reorder Level: 5 units"));
    assert_eq!(lines[5], "- Status: This item is low on stock.");
    Ok(())
}

#[test]
fn filler_words_do_not_hide_the_product() -> Result<()> {
    let chatbot = Chatbot::with_defaults(lamp_store()?)?;
    let utterance = "um so like how many desk lamp do we have anyway";

    assert_eq!(chatbot.classify(utterance).intent, Intent::ProductDetails);
    assert!(
        chatbot
            .respond(utterance)?
            .starts_with("Here are the details for Desk Lamp:")
    );
    Ok(())
}

#[test]
fn unlisted_product_asks_which_one() -> Result<()> {
    let chatbot = Chatbot::with_defaults(lamp_store()?)?;
    assert_eq!(
        chatbot.respond("tell me about stapler")?,
        "I can help with that, but which product are you asking about?"
    );
    Ok(())
}

#[test]
fn classification_is_deterministic() -> Result<()> {
    let matcher = IntentMatcher::with_defaults()?;
    let utterances = [
        "show inventory please",
        "are we running low on lamps",
        "good morning team",
        "zebra",
    ];

    for utterance in utterances {
        assert_eq!(matcher.classify(utterance), matcher.classify(utterance));
    }

    let batch = matcher.classify_batch(&utterances);
    let sequential: Vec<_> = utterances.iter().map(|u| matcher.classify(u)).collect();
    assert_eq!(batch, sequential);
    Ok(())
}

#[test]
fn raising_the_threshold_turns_matches_into_unknown() -> Result<()> {
    let knowledge_base = KnowledgeBase::builtin();
    let lenient = IntentMatcher::new(&knowledge_base, MatcherConfig::default())?;
    let strict = IntentMatcher::new(
        &knowledge_base,
        MatcherConfig {
            threshold: 0.99,
            ..MatcherConfig::default()
        },
    )?;

    let utterance = "show inventory please";
    assert_eq!(lenient.classify(utterance).intent, Intent::InventoryStatus);
    let classification = strict.classify(utterance);
    assert_eq!(classification.intent, Intent::Unknown);
    assert!(classification.confidence > 0.0);
    Ok(())
}

#[test]
fn keyword_classifier_drives_the_chatbot() -> Result<()> {
    let config = ChatbotConfig {
        classifier: ClassifierKind::Keyword,
        ..ChatbotConfig::default()
    };
    let chatbot = Chatbot::from_config(&config, lamp_store()?)?;

    assert_eq!(chatbot.classifier().name(), "keyword");
    assert_eq!(chatbot.respond("hey")?, GREETING);
    assert!(
        chatbot
            .respond("details on the office chair please")?
            .starts_with("Here are the details for Office Chair:")
    );
    Ok(())
}

#[test]
fn custom_knowledge_base_templates_are_used() -> Result<()> {
    let knowledge_base = KnowledgeBase::from_json(
        r#"[
            {"intent": "greet", "patterns": ["ahoy"], "response_template": "Ahoy!"},
            {"intent": "check_low_stock", "patterns": ["what is low"], "response_template": "Low:"}
        ]"#,
    )?;
    let matcher = IntentMatcher::new(&knowledge_base, MatcherConfig::default())?;
    let chatbot = Chatbot::new(Arc::new(matcher), lamp_store()?, &knowledge_base);

    assert_eq!(chatbot.respond("ahoy")?, "Ahoy!");
    assert_eq!(chatbot.respond("what is low")?, "Low: Desk Lamp");
    assert_eq!(chatbot.respond("hello")?, UNKNOWN_RESPONSE);
    Ok(())
}

/// A store whose every query fails.
#[derive(Debug)]
struct FailingStore;

impl FailingStore {
    fn fail<T>() -> Result<T> {
        Err(StockbotError::store("connection lost"))
    }
}

impl InventoryStore for FailingStore {
    fn list_product_names(&self) -> Result<Vec<String>> {
        Self::fail()
    }

    fn count_products(&self) -> Result<usize> {
        Self::fail()
    }

    fn find_low_stock(&self) -> Result<Vec<LowStockItem>> {
        Self::fail()
    }

    fn find_product(&self, _name: &str) -> Result<Option<ProductRecord>> {
        Self::fail()
    }

    fn list_products(&self) -> Result<Vec<ProductRecord>> {
        Self::fail()
    }

    fn top_sellers(&self, _limit: usize, _since: DateTime<Utc>) -> Result<Vec<TopSeller>> {
        Self::fail()
    }

    fn reorder_list(&self) -> Result<Vec<ReorderItem>> {
        Self::fail()
    }
}

#[test]
fn store_failures_surface_from_respond() -> Result<()> {
    let chatbot = Chatbot::with_defaults(Arc::new(FailingStore))?;

    for utterance in [
        "show all inventory",
        "what needs restocking",
        "how many desk lamp do we have",
    ] {
        let err = chatbot.respond(utterance).unwrap_err();
        assert!(matches!(err, StockbotError::Store(_)), "{utterance}");
        assert_eq!(err.to_string(), "Store error: connection lost");
    }

    // Replies that need no store data still work.
    assert_eq!(chatbot.respond("hello")?, GREETING);
    assert_eq!(chatbot.respond("zebra")?, UNKNOWN_RESPONSE);
    Ok(())
}
