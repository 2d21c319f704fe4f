//! Command line argument parsing for the stockbot CLI using clap.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierKind;

/// Stockbot - an inventory assistant you can chat with
#[derive(Parser, Debug, Clone)]
#[command(name = "stockbot")]
#[command(about = "Ask questions about your inventory and keep the catalog up to date")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct StockbotArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Inventory catalog file (JSON)
    #[arg(
        short,
        long,
        env = "STOCKBOT_CATALOG",
        default_value = "inventory.json",
        value_name = "FILE"
    )]
    pub catalog: PathBuf,

    /// Configuration file (JSON)
    #[arg(long, env = "STOCKBOT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Intent classifier (overrides the configuration file)
    #[arg(long)]
    pub classifier: Option<ClassifierKind>,

    /// Confidence threshold of the TF-IDF classifier (overrides the configuration file)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl StockbotArgs {
    /// Get the effective verbosity level: 1 by default, one more per `-v`
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Log level for the effective verbosity
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error, // Quiet mode
            1 => LevelFilter::Warn,  // Default
            2 => LevelFilter::Info,  // -v
            _ => LevelFilter::Debug, // -vv and up
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer one question
    Ask(AskArgs),

    /// Answer questions read line by line from stdin
    Chat,

    /// Show how utterances are classified
    Classify(ClassifyArgs),

    /// List all products
    Products,

    /// List products below their reorder threshold
    #[command(name = "low-stock")]
    LowStock,

    /// Show the best-selling products
    #[command(name = "top-sellers")]
    TopSellers(TopSellersArgs),

    /// List low-stock products with supplier and suggested quantity
    #[command(name = "reorder-list")]
    ReorderList,

    /// Add a product to the catalog
    #[command(name = "add-product")]
    AddProduct(AddProductArgs),

    /// Delete a product and its sales
    #[command(name = "delete-product")]
    DeleteProduct(DeleteProductArgs),

    /// Add stock to one or more products
    Restock(RestockArgs),

    /// Change the price of a product
    #[command(name = "set-price")]
    SetPrice(SetPriceArgs),

    /// Record a sale
    Sell(SellArgs),

    /// Add a supplier
    #[command(name = "add-supplier")]
    AddSupplier(AddSupplierArgs),
}

/// Arguments for asking a question
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// The question
    #[arg(value_name = "UTTERANCE", required = true, num_args = 1..)]
    pub utterance: Vec<String>,
}

impl AskArgs {
    /// The question with its words joined back together
    pub fn text(&self) -> String {
        self.utterance.join(" ")
    }
}

/// Arguments for classifying utterances
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Utterances to classify
    #[arg(value_name = "UTTERANCE", required_unless_present = "file")]
    pub utterances: Vec<String>,

    /// Read utterances from a file, one per line
    #[arg(long, value_name = "FILE", conflicts_with = "utterances")]
    pub file: Option<PathBuf>,

    /// Include the score of every intent
    #[arg(long)]
    pub scores: bool,
}

/// Arguments for the top-sellers report
#[derive(Parser, Debug, Clone)]
pub struct TopSellersArgs {
    /// Maximum number of products to show
    #[arg(short, long, default_value = "5")]
    pub limit: usize,

    /// Only count sales from the last N days
    #[arg(short, long, default_value = "30")]
    pub days: u32,
}

/// Arguments for adding a product
#[derive(Parser, Debug, Clone)]
pub struct AddProductArgs {
    /// Product id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Product name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Category
    #[arg(long, default_value = "General")]
    pub category: String,

    /// Units on hand
    #[arg(long, default_value = "0")]
    pub stock: u32,

    /// Reorder threshold
    #[arg(long, default_value = "10")]
    pub reorder_threshold: u32,

    /// Unit price
    #[arg(long, default_value = "0")]
    pub price: f64,

    /// Supplier id
    #[arg(long)]
    pub supplier: Option<String>,
}

/// Arguments for deleting a product
#[derive(Parser, Debug, Clone)]
pub struct DeleteProductArgs {
    /// Product id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for restocking
#[derive(Parser, Debug, Clone)]
pub struct RestockArgs {
    /// Products and quantities, e.g. P001=20
    #[arg(value_name = "ID=QTY", required = true, num_args = 1..)]
    pub items: Vec<RestockItem>,
}

/// One `ID=QTY` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockItem {
    pub product_id: String,
    pub quantity: u32,
}

impl FromStr for RestockItem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (id, quantity) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ID=QTY, got '{s}'"))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(format!("missing product id in '{s}'"));
        }
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid quantity in '{s}': {e}"))?;
        Ok(RestockItem {
            product_id: id.to_string(),
            quantity,
        })
    }
}

/// Arguments for changing a price
#[derive(Parser, Debug, Clone)]
pub struct SetPriceArgs {
    /// Product id
    #[arg(value_name = "ID")]
    pub id: String,

    /// New unit price
    #[arg(value_name = "PRICE")]
    pub price: f64,
}

/// Arguments for recording a sale
#[derive(Parser, Debug, Clone)]
pub struct SellArgs {
    /// Product id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Units sold
    #[arg(value_name = "QTY")]
    pub quantity: u32,

    /// Customer name
    #[arg(long)]
    pub customer: Option<String>,

    /// Payment method
    #[arg(long)]
    pub payment: Option<String>,
}

/// Arguments for adding a supplier
#[derive(Parser, Debug, Clone)]
pub struct AddSupplierArgs {
    /// Supplier id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Supplier name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
