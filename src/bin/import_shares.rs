//! Import a sign-up CSV into a JSON ledger
//!
//! Reads a semicolon-delimited share list (member names, station, monthly
//! value per row) and writes the resulting shares as a ledger file, each
//! with one open commitment starting at the season start.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use csa_system::share::{load_shares_from_csv, write_ledger, DecimalFormat};

#[derive(Parser)]
#[command(about = "Create a share ledger from a sign-up CSV")]
struct Args {
    /// Semicolon-delimited CSV of shares
    input: PathBuf,

    /// Start date for the imported commitments (YYYY-MM-DD)
    #[arg(long)]
    season_start: NaiveDate,

    /// Where to write the JSON ledger
    #[arg(long, short, default_value = "ledger.json")]
    output: PathBuf,

    /// Amounts use English formatting (1,234.56) instead of German (1.234,56)
    #[arg(long)]
    english_amounts: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let format = if args.english_amounts {
        DecimalFormat::english()
    } else {
        DecimalFormat::german()
    };

    let shares = load_shares_from_csv(&args.input, &format, args.season_start)
        .with_context(|| format!("failed to import {}", args.input.display()))?;

    write_ledger(&args.output, &shares)
        .with_context(|| format!("failed to write ledger {}", args.output.display()))?;

    println!(
        "Imported {} shares into {}",
        shares.len(),
        args.output.display()
    );
    Ok(())
}
