//! Categories command - list the active category table.

use clap::{Args, ValueEnum};
use console::style;

use tally_core::{Category, TransactionType};

use super::{load_config, load_table};

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Only list categories of this kind
    #[arg(short, long, value_enum)]
    kind: Option<Kind>,

    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    /// Expense categories
    Expense,
    /// Income categories
    Income,
}

impl From<Kind> for TransactionType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Expense => TransactionType::Expense,
            Kind::Income => TransactionType::Income,
        }
    }
}

pub async fn run(args: CategoriesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let table = load_table(&config)?;

    if args.json {
        let json = match args.kind {
            Some(kind) => serde_json::to_string_pretty(table.for_type(kind.into()))?,
            None => serde_json::to_string_pretty(&table)?,
        };
        println!("{}", json);
        return Ok(());
    }

    let kinds = match args.kind {
        Some(kind) => vec![TransactionType::from(kind)],
        None => vec![TransactionType::Expense, TransactionType::Income],
    };

    for (i, kind) in kinds.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let title = match kind {
            TransactionType::Expense => "Expense categories:",
            TransactionType::Income => "Income categories:",
        };
        println!("{}", style(title).bold());
        for category in table.for_type(kind) {
            print_category(category);
        }
    }

    Ok(())
}

fn print_category(category: &Category) {
    if category.keywords.is_empty() {
        println!("  {:<14} {}", category.id, category.name);
    } else {
        println!(
            "  {:<14} {:<20} {}",
            category.id,
            category.name,
            style(category.keywords.join(", ")).dim()
        );
    }
}
