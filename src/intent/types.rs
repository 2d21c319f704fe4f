//! Common types for intent classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StockbotError;

/// The closed set of things a user can ask for.
///
/// The serialized form is the snake-case name used in knowledge base files
/// and in CLI output (`get_inventory_status`, `check_low_stock`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Summary of the whole inventory.
    #[serde(rename = "get_inventory_status")]
    InventoryStatus,
    /// Products whose stock dropped below their reorder threshold.
    #[serde(rename = "check_low_stock")]
    LowStock,
    /// Details about one product named in the utterance.
    #[serde(rename = "get_product_details")]
    ProductDetails,
    /// Greeting.
    #[serde(rename = "greet")]
    Greet,
    /// Farewell.
    #[serde(rename = "goodbye")]
    Goodbye,
    /// Nothing cleared the confidence threshold.
    #[serde(rename = "unknown")]
    Unknown,
}

impl Intent {
    /// Every intent, `Unknown` last.
    pub const ALL: [Intent; 6] = [
        Intent::InventoryStatus,
        Intent::LowStock,
        Intent::ProductDetails,
        Intent::Greet,
        Intent::Goodbye,
        Intent::Unknown,
    ];

    /// Canonical snake-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::InventoryStatus => "get_inventory_status",
            Intent::LowStock => "check_low_stock",
            Intent::ProductDetails => "get_product_details",
            Intent::Greet => "greet",
            Intent::Goodbye => "goodbye",
            Intent::Unknown => "unknown",
        }
    }

    /// Whether answering this intent needs a product name from the utterance.
    pub fn needs_entity(&self) -> bool {
        matches!(self, Intent::ProductDetails)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = StockbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| StockbotError::knowledge_base(format!("unknown intent name '{s}'")))
    }
}

/// Score of one intent for one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    /// The scored intent.
    pub intent: Intent,
    /// Similarity (TF-IDF matcher) or number of matched key phrases
    /// (keyword classifier).
    pub score: f64,
}

/// Outcome of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The chosen intent, `Unknown` when nothing cleared the threshold.
    pub intent: Intent,
    /// Best score seen across all intents.
    pub confidence: f64,
    /// Per-intent scores in knowledge base order.
    pub scores: Vec<IntentScore>,
}

impl Classification {
    /// A classification that matched nothing at all.
    pub fn unknown() -> Self {
        Classification {
            intent: Intent::Unknown,
            confidence: 0.0,
            scores: Vec::new(),
        }
    }

    /// Score recorded for `intent`, if it was scored.
    pub fn score_of(&self, intent: Intent) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.intent == intent)
            .map(|s| s.score)
    }
}
