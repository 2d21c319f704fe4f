//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, StockbotArgs};
use crate::error::Result;
use crate::intent::{Intent, IntentScore};
use crate::store::{LowStockItem, ProductRecord, ReorderItem, SaleRecord, SupplierRecord, TopSeller};

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Result structure for a question.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResult {
    pub utterance: String,
    pub intent: Intent,
    pub confidence: f64,
    pub response: String,
}

/// One classified utterance.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifiedUtterance {
    pub utterance: String,
    pub intent: Intent,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<IntentScore>>,
}

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classifier: String,
    pub results: Vec<ClassifiedUtterance>,
}

/// Result structure for the product listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<ProductRecord>,
    pub total_value: f64,
}

/// Result structure for the low-stock report.
#[derive(Debug, Serialize, Deserialize)]
pub struct LowStockReport {
    pub items: Vec<LowStockItem>,
}

/// Result structure for the top-sellers report.
#[derive(Debug, Serialize, Deserialize)]
pub struct TopSellersReport {
    pub days: u32,
    pub items: Vec<TopSeller>,
}

/// Result structure for the reorder list.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderReport {
    pub items: Vec<ReorderItem>,
}

/// Result structure for commands that change products.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub products: Vec<ProductRecord>,
}

/// Result structure for product deletion.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletionResult {
    pub product_id: String,
    pub deleted: bool,
}

/// Result structure for a recorded sale.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaleResult {
    pub sale: SaleRecord,
}

/// Result structure for an added supplier.
#[derive(Debug, Serialize, Deserialize)]
pub struct SupplierResult {
    pub supplier: SupplierRecord,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &StockbotArgs,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 && !message.is_empty() {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(&mut out)?;
        }
        OutputFormat::Json => output_json(&mut out, result, args.pretty)?,
    }
    out.flush()?;
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(out: &mut dyn Write, result: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

impl HumanOutput for AnswerResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.response)
    }
}

impl HumanOutput for ClassificationReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for result in &self.results {
            writeln!(
                out,
                "{:<22} {:.3}  {}",
                result.intent.as_str(),
                result.confidence,
                result.utterance
            )?;
            if let Some(scores) = &result.scores {
                for score in scores {
                    writeln!(out, "    {:<22} {:.3}", score.intent.as_str(), score.score)?;
                }
            }
        }
        Ok(())
    }
}

impl HumanOutput for ProductList {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.products.is_empty() {
            return writeln!(out, "No products.");
        }
        writeln!(
            out,
            "{:<10} {:<24} {:<14} {:>7} {:>8} {:>10}",
            "ID", "NAME", "CATEGORY", "STOCK", "REORDER", "PRICE"
        )?;
        for p in &self.products {
            writeln!(
                out,
                "{:<10} {:<24} {:<14} {:>7} {:>8} {:>10}",
                p.id,
                p.name,
                p.category,
                p.stock,
                p.reorder_threshold,
                format_money(p.unit_price)
            )?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{} products, stock value {}",
            self.products.len(),
            format_money(self.total_value)
        )
    }
}

impl HumanOutput for LowStockReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.items.is_empty() {
            return writeln!(out, "No items are low on stock.");
        }
        for item in &self.items {
            writeln!(
                out,
                "{}: {} in stock (reorder at {})",
                item.name, item.stock, item.reorder_threshold
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for TopSellersReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.items.is_empty() {
            return writeln!(out, "No sales in the last {} days.", self.days);
        }
        for (rank, item) in self.items.iter().enumerate() {
            writeln!(out, "{}. {} ({} sold)", rank + 1, item.name, item.units_sold)?;
        }
        Ok(())
    }
}

impl HumanOutput for ReorderReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.items.is_empty() {
            return writeln!(out, "Nothing needs reordering.");
        }
        for item in &self.items {
            let supplier = match (&item.supplier_name, &item.contact_email) {
                (Some(name), Some(email)) => format!("{name} <{email}>"),
                (Some(name), None) => name.clone(),
                _ => "no supplier".to_string(),
            };
            writeln!(
                out,
                "{} {}: order {} (stock {}, reorder at {}) from {}",
                item.product_id,
                item.name,
                item.restock_quantity,
                item.stock,
                item.reorder_threshold,
                supplier
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for ProductUpdate {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for p in &self.products {
            writeln!(
                out,
                "{} {}: {} in stock at {}",
                p.id,
                p.name,
                p.stock,
                format_money(p.unit_price)
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for DeletionResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.deleted {
            writeln!(out, "Deleted {}", self.product_id)
        } else {
            writeln!(out, "No product {}", self.product_id)
        }
    }
}

impl HumanOutput for SaleResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let sale = &self.sale;
        writeln!(
            out,
            "Sale #{}: {} x {} = {}",
            sale.id,
            sale.quantity,
            sale.product_id,
            format_money(sale.total_amount)
        )
    }
}

impl HumanOutput for SupplierResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} {}", self.supplier.id, self.supplier.name)
    }
}

/// Format an amount of money.
fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}
