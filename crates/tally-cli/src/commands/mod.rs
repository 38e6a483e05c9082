//! Subcommands and the helpers they share.

pub mod batch;
pub mod categories;
pub mod classify;
pub mod config;
pub mod parse;

use std::path::{Path, PathBuf};

use tally_core::{CategoryTable, ReceiptParseResult, TallyConfig};
use tracing::debug;

/// Output format for parse results.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
        .join("config.json")
}

/// Config from `--config`, else the default location, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TallyConfig> {
    if let Some(path) = config_path {
        return Ok(TallyConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(TallyConfig::from_file(&path)?)
    } else {
        Ok(TallyConfig::default())
    }
}

pub fn load_table(config: &TallyConfig) -> anyhow::Result<CategoryTable> {
    if let Some(path) = &config.categories.table_path {
        debug!("Loading category table from {}", path.display());
    }
    Ok(config.load_category_table()?)
}

pub fn format_result(
    result: &ReceiptParseResult,
    table: &CategoryTable,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result, table)),
    }
}

fn format_csv(result: &ReceiptParseResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "merchant_name",
        "category",
        "amount",
        "date",
        "date_detected",
        "confidence",
    ])?;

    wtr.write_record([
        &result.merchant_name,
        &result.category,
        &result.amount.map(|a| a.to_string()).unwrap_or_default(),
        &result.date.to_string(),
        &result.date_detected.to_string(),
        &format!("{:.1}", result.confidence),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ReceiptParseResult, table: &CategoryTable) -> String {
    let mut output = String::new();

    let merchant = if result.merchant_name.is_empty() {
        "(unknown)"
    } else {
        result.merchant_name.as_str()
    };
    output.push_str(&format!("Merchant: {}\n", merchant));

    let category_name = table
        .get(&result.category)
        .map(|c| c.name.as_str())
        .unwrap_or(&result.category);
    output.push_str(&format!("Category: {} ({})\n", result.category, category_name));

    match result.amount {
        Some(amount) => output.push_str(&format!("Amount:   {}\n", amount)),
        None => output.push_str("Amount:   not found\n"),
    }

    let source = if result.date_detected { "from receipt" } else { "today" };
    output.push_str(&format!("Date:     {} ({})\n", result.date, source));

    output
}
