//! Per-share payment status
//!
//! Sums the proration engine's output across a share's commitments and
//! reconciles it against recorded deposits. One malformed commitment is
//! excluded with a warning rather than zeroing out or crashing the whole
//! share computation.

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::share::{Commitment, Share};

/// Sum of expected amounts over every commitment of a share, each evaluated
/// independently. Commitments failing validation are skipped with a
/// data-integrity warning.
pub fn share_expected_today(commitments: &[Commitment], reference_date: NaiveDate) -> Decimal {
    commitments
        .iter()
        .filter(|commitment| match commitment.validate() {
            Ok(()) => true,
            Err(e) => {
                log::warn!(
                    "excluding commitment starting {} from expectation: {e}",
                    commitment.start_date
                );
                false
            }
        })
        .map(|commitment| commitment.expected_at(reference_date))
        .sum()
}

/// `total_deposits - expected_today`. Negative means the share is behind.
pub fn share_difference_today(total_deposits: Decimal, expected_today: Decimal) -> Decimal {
    total_deposits - expected_today
}

/// One row of the payment-status listing.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatus {
    pub name: String,
    pub station: String,
    pub archived: bool,
    pub note: Option<String>,
    pub expected_today: Decimal,
    pub total_deposits: Decimal,
    pub total_security: Decimal,
    pub number_of_deposits: usize,
    pub difference_today: Decimal,
}

impl PaymentStatus {
    pub fn for_share(share: &Share, reference_date: NaiveDate) -> Self {
        let expected_today = share_expected_today(&share.commitments, reference_date);
        let total_deposits = share.total_deposits();
        Self {
            name: share.name(),
            station: share.station.clone().unwrap_or_default(),
            archived: share.archived,
            note: share.note.clone(),
            expected_today,
            total_deposits,
            total_security: share.total_security(),
            number_of_deposits: share.number_of_deposits(),
            difference_today: share_difference_today(total_deposits, expected_today),
        }
    }
}

/// Evaluate every share as of `reference_date`. Shares are independent, so
/// the listing runs in parallel.
pub fn payment_status(shares: &[Share], reference_date: NaiveDate) -> Vec<PaymentStatus> {
    shares
        .par_iter()
        .map(|share| PaymentStatus::for_share(share, reference_date))
        .collect()
}
