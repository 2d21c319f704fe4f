//! Command implementations for the stockbot CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use log::{debug, info};

use crate::chatbot::Chatbot;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ChatbotConfig;
use crate::error::{Result, StockbotError};
use crate::store::{
    FileInventoryStore, InventoryEditor, InventoryStore, NewSale, ProductRecord, SupplierRecord,
};

/// Execute a CLI command.
pub fn execute_command(args: StockbotArgs) -> Result<()> {
    let store = Arc::new(FileInventoryStore::open(&args.catalog)?);

    match &args.command {
        Command::Ask(ask_args) => ask(ask_args, store, &args),
        Command::Chat => chat(store, &args),
        Command::Classify(classify_args) => classify(classify_args, store, &args),
        Command::Products => list_products(store.as_ref(), &args),
        Command::LowStock => low_stock(store.as_ref(), &args),
        Command::TopSellers(top_args) => top_sellers(top_args, store.as_ref(), &args),
        Command::ReorderList => reorder_list(store.as_ref(), &args),
        Command::AddProduct(add_args) => add_product(add_args, store.as_ref(), &args),
        Command::DeleteProduct(delete_args) => delete_product(delete_args, store.as_ref(), &args),
        Command::Restock(restock_args) => restock(restock_args, store.as_ref(), &args),
        Command::SetPrice(price_args) => set_price(price_args, store.as_ref(), &args),
        Command::Sell(sell_args) => sell(sell_args, store.as_ref(), &args),
        Command::AddSupplier(supplier_args) => add_supplier(supplier_args, store.as_ref(), &args),
    }
}

/// Load the configuration file, if any, and apply command line overrides.
pub fn load_config(args: &StockbotArgs) -> Result<ChatbotConfig> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            ChatbotConfig::load(path)?
        }
        None => ChatbotConfig::default(),
    };

    if let Some(kind) = args.classifier {
        config.classifier = kind;
    }
    if let Some(threshold) = args.threshold {
        config.matcher.threshold = threshold;
    }
    Ok(config)
}

fn build_chatbot(store: Arc<dyn InventoryStore>, args: &StockbotArgs) -> Result<Chatbot> {
    let config = load_config(args)?;
    Chatbot::from_config(&config, store)
}

fn answer(chatbot: &Chatbot, utterance: &str) -> Result<AnswerResult> {
    let (classification, response) = chatbot.respond_with_classification(utterance)?;
    Ok(AnswerResult {
        utterance: utterance.to_string(),
        intent: classification.intent,
        confidence: classification.confidence,
        response,
    })
}

/// Answer one question.
fn ask(ask_args: &AskArgs, store: Arc<FileInventoryStore>, args: &StockbotArgs) -> Result<()> {
    let chatbot = build_chatbot(store, args)?;
    let result = answer(&chatbot, &ask_args.text())?;
    output_result("Answer", &result, args)
}

/// Answer questions from stdin until `exit`, `quit` or end of input.
fn chat(store: Arc<FileInventoryStore>, args: &StockbotArgs) -> Result<()> {
    let chatbot = build_chatbot(store, args)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_chat(
        &chatbot,
        stdin.lock(),
        &mut stdout.lock(),
        args.output_format,
    )
}

/// Chat loop over arbitrary input and output.
pub fn run_chat<R: BufRead, W: Write>(
    chatbot: &Chatbot,
    input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }
        if utterance.eq_ignore_ascii_case("exit") || utterance.eq_ignore_ascii_case("quit") {
            break;
        }

        let result = answer(chatbot, utterance)?;
        match format {
            OutputFormat::Human => writeln!(output, "{}", result.response)?,
            OutputFormat::Json => writeln!(output, "{}", serde_json::to_string(&result)?)?,
        }
        output.flush()?;
    }
    Ok(())
}

/// Classify utterances given on the command line or in a file.
fn classify(
    classify_args: &ClassifyArgs,
    store: Arc<FileInventoryStore>,
    args: &StockbotArgs,
) -> Result<()> {
    let chatbot = build_chatbot(store, args)?;

    let utterances = match &classify_args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open utterance file {}", path.display()))?;
            read_utterances(BufReader::new(file))?
        }
        None => classify_args.utterances.clone(),
    };
    if utterances.is_empty() {
        return Err(StockbotError::invalid_argument("no utterances to classify"));
    }
    info!("Classifying {} utterance(s)", utterances.len());

    let report = classify_all(&chatbot, &utterances, classify_args.scores);
    output_result("Classification", &report, args)
}

/// Non-blank lines of `reader`, trimmed.
pub fn read_utterances<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut utterances = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            utterances.push(line.to_string());
        }
    }
    Ok(utterances)
}

fn classify_all(chatbot: &Chatbot, utterances: &[String], with_scores: bool) -> ClassificationReport {
    let results = utterances
        .iter()
        .zip(chatbot.classify_batch(utterances))
        .map(|(utterance, classification)| ClassifiedUtterance {
            utterance: utterance.clone(),
            intent: classification.intent,
            confidence: classification.confidence,
            scores: with_scores.then_some(classification.scores),
        })
        .collect();

    ClassificationReport {
        classifier: chatbot.classifier().name().to_string(),
        results,
    }
}

/// List all products.
fn list_products(store: &dyn InventoryStore, args: &StockbotArgs) -> Result<()> {
    let products = store.list_products()?;
    let total_value = products.iter().map(ProductRecord::total_value).sum();
    output_result(
        "Products",
        &ProductList {
            products,
            total_value,
        },
        args,
    )
}

/// List products below their reorder threshold.
fn low_stock(store: &dyn InventoryStore, args: &StockbotArgs) -> Result<()> {
    let items = store.find_low_stock()?;
    output_result("Low stock", &LowStockReport { items }, args)
}

/// Show the best sellers of the last few days.
fn top_sellers(
    top_args: &TopSellersArgs,
    store: &dyn InventoryStore,
    args: &StockbotArgs,
) -> Result<()> {
    let since = Utc::now() - Duration::days(i64::from(top_args.days));
    let items = store.top_sellers(top_args.limit, since)?;
    output_result(
        "Top sellers",
        &TopSellersReport {
            days: top_args.days,
            items,
        },
        args,
    )
}

/// List what to reorder and from whom.
fn reorder_list(store: &dyn InventoryStore, args: &StockbotArgs) -> Result<()> {
    let items = store.reorder_list()?;
    output_result("Reorder list", &ReorderReport { items }, args)
}

/// Add a product.
fn add_product(
    add_args: &AddProductArgs,
    store: &dyn InventoryEditor,
    args: &StockbotArgs,
) -> Result<()> {
    let mut product = ProductRecord::new(
        add_args.id.as_str(),
        add_args.name.as_str(),
        add_args.category.as_str(),
        add_args.stock,
        add_args.reorder_threshold,
    )
    .with_price(add_args.price);
    if let Some(supplier) = &add_args.supplier {
        product = product.with_supplier(supplier.as_str());
    }
    product.updated_at = Some(Utc::now());

    store.add_product(product.clone())?;
    output_result(
        "Product added",
        &ProductUpdate {
            products: vec![product],
        },
        args,
    )
}

/// Delete a product and its sales.
fn delete_product(
    delete_args: &DeleteProductArgs,
    store: &dyn InventoryEditor,
    args: &StockbotArgs,
) -> Result<()> {
    let deleted = store.delete_product(&delete_args.id)?;
    output_result(
        "Product deletion",
        &DeletionResult {
            product_id: delete_args.id.clone(),
            deleted,
        },
        args,
    )
}

/// Add stock to products.
fn restock(restock_args: &RestockArgs, store: &dyn InventoryEditor, args: &StockbotArgs) -> Result<()> {
    let items: Vec<(String, u32)> = restock_args
        .items
        .iter()
        .map(|item| (item.product_id.clone(), item.quantity))
        .collect();
    let products = store.restock(&items)?;
    output_result("Restocked", &ProductUpdate { products }, args)
}

/// Change a price.
fn set_price(price_args: &SetPriceArgs, store: &dyn InventoryEditor, args: &StockbotArgs) -> Result<()> {
    let product = store.set_price(&price_args.id, price_args.price)?;
    output_result(
        "Price updated",
        &ProductUpdate {
            products: vec![product],
        },
        args,
    )
}

/// Record a sale.
fn sell(sell_args: &SellArgs, store: &dyn InventoryEditor, args: &StockbotArgs) -> Result<()> {
    let sale = store.record_sale(NewSale {
        customer_name: sell_args.customer.clone(),
        payment_method: sell_args.payment.clone(),
        ..NewSale::new(sell_args.id.as_str(), sell_args.quantity)
    })?;
    output_result("Sale recorded", &SaleResult { sale }, args)
}

/// Add a supplier.
fn add_supplier(
    supplier_args: &AddSupplierArgs,
    store: &dyn InventoryEditor,
    args: &StockbotArgs,
) -> Result<()> {
    let supplier = SupplierRecord {
        contact_email: supplier_args.email.clone(),
        phone: supplier_args.phone.clone(),
        ..SupplierRecord::new(supplier_args.id.as_str(), supplier_args.name.as_str())
    };
    store.add_supplier(supplier.clone())?;
    output_result("Supplier added", &SupplierResult { supplier }, args)
}
