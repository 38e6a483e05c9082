//! Classify command - categorize a merchant name.

use clap::Args;

use tally_core::MerchantClassifier;

use super::{load_config, load_table};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Merchant name or receipt line
    merchant: String,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let table = load_table(&config)?;

    match MerchantClassifier::with_table(&table).classify(&args.merchant) {
        Some(category) => println!("{}", category),
        None => println!("no input"),
    }

    Ok(())
}
