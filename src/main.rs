use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use card_registry::{import_csv, logging, luhn, CardRegistry};

#[derive(Parser, Debug)]
#[command(name = "card-registry", about = "Credit card registry tools", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a card number against the Luhn algorithm
    Check { number: String },

    /// Load cards from a CSV file (name,card_number,limit) and list them
    Import { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(if cli.verbose {
        "card_registry=debug"
    } else {
        "card_registry=warn"
    });

    match cli.command {
        Command::Check { number } => run_check(&number),
        Command::Import { path } => run_import(&path)?,
    }

    Ok(())
}

fn run_check(number: &str) {
    if luhn::check(number) {
        println!("✓ {} passes the Luhn check", number.trim());
    } else {
        println!("✗ {} is not a valid card number", number.trim());
    }
}

fn run_import(path: &Path) -> Result<()> {
    println!("📂 Importing cards from {}", path.display());

    let registry = CardRegistry::new();
    let report = import_csv(path, &registry)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    for rejected in &report.rejected {
        eprintln!("✗ line {}: {}", rejected.line, rejected.reason);
    }

    println!("\n{:<24} {:<8} {:>14} {:>10}  VALID", "NAME", "NUMBER", "LIMIT", "BALANCE");
    for card in registry.list_cards() {
        println!(
            "{:<24} {:<8} {:>14} {:>10}  {}",
            card.holder_name(),
            card.masked_number(),
            card.credit_limit(),
            card.balance(),
            if card.is_valid() { "yes" } else { "no" },
        );
    }

    println!("\n✓ {}", report.summary());
    Ok(())
}
