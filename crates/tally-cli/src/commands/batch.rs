//! Batch command - parse many receipt text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use tally_core::analytics::{category_breakdown, summarize};
use tally_core::{
    CategoryTable, MemoryStore, NewTransaction, ReceiptParseResult, ReceiptParser, TallyConfig,
    TransactionQuery, TransactionStore,
};

use super::{format_result, load_config, load_table, OutputFormat};

/// Owner id for transactions collected during a batch run.
const BATCH_USER: &str = "local";

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching receipt .txt files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Date used when a receipt has none (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Also write a summary CSV and print spending per category
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of parsing a single file.
struct FileResult {
    path: PathBuf,
    receipt: Option<ReceiptParseResult>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let table = load_table(&config)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = ReceiptParser::with_table(&table);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match parse_file(&path, &parser, today) {
            Ok(receipt) => results.push(FileResult {
                path,
                receipt: Some(receipt),
                error: None,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to parse {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        receipt: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to parse {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.receipt.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(receipt) = &result.receipt {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_result(receipt, &table, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );

        print_spending(&results, &table, &config)?;
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn parse_file(
    path: &Path,
    parser: &ReceiptParser,
    today: NaiveDate,
) -> anyhow::Result<ReceiptParseResult> {
    let text = fs::read_to_string(path)?;

    match parser.parse_at(&text, today) {
        Some(receipt) => Ok(receipt),
        None => anyhow::bail!("nothing to parse"),
    }
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "merchant_name",
        "category",
        "amount",
        "date",
        "confidence",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(receipt) = &result.receipt {
            wtr.write_record([
                filename,
                "success",
                &receipt.merchant_name,
                &receipt.category,
                &receipt.amount.map(|a| a.to_string()).unwrap_or_default(),
                &receipt.date.to_string(),
                &format!("{:.1}", receipt.confidence),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Record every receipt with an amount as a transaction and print totals
/// per category.
fn print_spending(
    results: &[FileResult],
    table: &CategoryTable,
    config: &TallyConfig,
) -> anyhow::Result<()> {
    let store = MemoryStore::with_table(table.clone());
    let kind = config.receipt.default_transaction_type;

    let receipts = results.iter().filter_map(|r| r.receipt.as_ref());
    for receipt in receipts.filter(|r| r.has_amount()) {
        let draft = NewTransaction::from_receipt(receipt, kind);
        if let Err(e) = store.add(BATCH_USER, draft) {
            debug!("Skipping {:?}: {}", receipt.merchant_name, e);
        }
    }

    // Totals cover the whole batch, not just the default page of results.
    let query = TransactionQuery::new().with_limit(store.len());
    let transactions = store.list(BATCH_USER, &query)?;
    if transactions.is_empty() {
        return Ok(());
    }

    let totals = summarize(&transactions);

    println!();
    println!("{}", style("Spending by category:").bold());
    for entry in category_breakdown(&transactions, table) {
        println!(
            "  {:<24} {:>10} {:>5.1}%",
            entry.name, entry.total, entry.percentage
        );
    }
    println!("  {:<24} {:>10}", "Total", totals.total_expenses);

    Ok(())
}
