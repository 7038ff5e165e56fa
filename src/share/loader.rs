//! Share list import and ledger persistence
//!
//! The cooperative's sign-up sheets arrive as semicolon-delimited CSV, one
//! share per row: member names, then the pickup station, then the monthly
//! value. Amounts are formatted per locale (German sheets use `1.234,56`),
//! so parsing takes an explicit [`DecimalFormat`] rather than touching any
//! process-wide locale state.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{CsaError, Result};
use crate::share::{Commitment, Member, Share};

/// How decimal amounts are written in an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormat {
    pub decimal_separator: char,
    pub thousands_separator: Option<char>,
}

impl DecimalFormat {
    /// `1.234,56`
    pub fn german() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: Some('.'),
        }
    }

    /// `1,234.56`
    pub fn english() -> Self {
        Self {
            decimal_separator: '.',
            thousands_separator: Some(','),
        }
    }

    /// Parse an amount written in this format.
    pub fn parse_amount(&self, input: &str) -> Result<Decimal> {
        let mut normalized = String::with_capacity(input.len());
        for c in input.trim().chars() {
            if Some(c) == self.thousands_separator {
                continue;
            }
            normalized.push(if c == self.decimal_separator { '.' } else { c });
        }
        Decimal::from_str(&normalized).map_err(|_| CsaError::ParseAmount {
            input: input.to_string(),
        })
    }
}

impl Default for DecimalFormat {
    fn default() -> Self {
        Self::german()
    }
}

/// Load shares from a sign-up CSV file. Each share gets one open commitment
/// starting at `season_start`.
pub fn load_shares_from_csv(
    path: impl AsRef<Path>,
    format: &DecimalFormat,
    season_start: NaiveDate,
) -> Result<Vec<Share>> {
    let file = File::open(path)?;
    load_shares_from_reader(BufReader::new(file), format, season_start)
}

/// Same as [`load_shares_from_csv`] but from any reader.
pub fn load_shares_from_reader(
    reader: impl Read,
    format: &DecimalFormat,
    season_start: NaiveDate,
) -> Result<Vec<Share>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut shares = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.len() < 3 {
            log::warn!("skipping short row with {} fields", record.len());
            continue;
        }

        // Layout: name fields, station, value.
        let value = format.parse_amount(&record[record.len() - 1])?;
        let station = record[record.len() - 2].trim();
        let members: Vec<Member> = record
            .iter()
            .take(record.len() - 2)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Member::new)
            .collect();

        shares.push(Share {
            members,
            commitments: vec![Commitment::open(value, season_start)],
            deposits: Vec::new(),
            station: (!station.is_empty()).then(|| station.to_string()),
            note: None,
            archived: false,
        });
    }

    log::info!("imported {} shares", shares.len());
    Ok(shares)
}

/// Load the full dataset from a JSON ledger file.
pub fn load_ledger(path: impl AsRef<Path>) -> Result<Vec<Share>> {
    let file = File::open(path)?;
    let shares = serde_json::from_reader(BufReader::new(file))?;
    Ok(shares)
}

/// Write the full dataset to a JSON ledger file.
pub fn write_ledger(path: impl AsRef<Path>, shares: &[Share]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), shares)?;
    Ok(())
}
