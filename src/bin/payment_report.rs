//! Payment status listing across all shares
//!
//! Loads a JSON ledger, evaluates every share's expectation as of a given
//! date and reports who is ahead or behind. Optionally writes the full
//! listing as CSV.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use rust_decimal::Decimal;

use csa_system::share::load_ledger;
use csa_system::{payment_status, PaymentStatus};

#[derive(Parser)]
#[command(about = "Reconcile deposits against expected payments per share")]
struct Args {
    /// JSON ledger holding all shares
    ledger: PathBuf,

    /// Evaluate as of this date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Write the listing as CSV to this path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Include archived shares in the listing
    #[arg(long)]
    include_archived: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let mut shares = load_ledger(&args.ledger)
        .with_context(|| format!("failed to load ledger {}", args.ledger.display()))?;
    if !args.include_archived {
        shares.retain(|share| !share.archived);
    }
    println!("Loaded {} shares in {:?}", shares.len(), start.elapsed());

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let listing = payment_status(&shares, as_of);

    if let Some(path) = &args.output {
        write_csv(path, &listing)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("Listing written to {}", path.display());
    }

    print_summary(&listing, as_of);
    Ok(())
}

fn write_csv(path: &PathBuf, listing: &[PaymentStatus]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in listing {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(listing: &[PaymentStatus], as_of: NaiveDate) {
    let total_expected: Decimal = listing.iter().map(|row| row.expected_today).sum();
    let total_deposits: Decimal = listing.iter().map(|row| row.total_deposits).sum();
    let behind: Vec<&PaymentStatus> = listing
        .iter()
        .filter(|row| row.difference_today < Decimal::ZERO)
        .collect();

    println!("\nPayment status as of {as_of}:");
    println!("  Shares:         {}", listing.len());
    println!("  Expected total: {total_expected}");
    println!("  Deposited:      {total_deposits}");
    println!(
        "  Difference:     {}",
        total_deposits - total_expected
    );
    println!("  Shares behind:  {}", behind.len());

    for row in behind {
        println!("    {:<40} {:>10}", row.name, row.difference_today);
    }
}
