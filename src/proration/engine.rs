//! Core proration algorithm
//!
//! Computes the cumulative amount a commitment should have generated by a
//! reference date. Calendar-month based with two policy adjustments: the
//! grace-day rule (payments land by the 27th) and the mid-month start rule
//! (commitments starting on the 15th or later skip half a month).
//!
//! All arithmetic is exact decimal so repeated summation across shares does
//! not accumulate rounding error.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::{GRACE_DAY, MID_MONTH_DAY};

/// Number of months owed between `start_date` and the evaluation horizon,
/// in multiples of 0.5, never negative.
///
/// The evaluation horizon is `end_date` when the commitment is closed (its
/// expectation is frozen at closure and no longer depends on the reference
/// date), otherwise `reference_date`.
pub fn months_owed(
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    reference_date: NaiveDate,
) -> Decimal {
    let eval_date = end_date.unwrap_or(reference_date);

    // Whole calendar-month difference, signed. Fractional days are handled
    // by the policy rules below, not by this subtraction.
    let whole_months = (eval_date.year() - start_date.year()) * 12
        + eval_date.month() as i32
        - start_date.month() as i32;
    let mut months = Decimal::from(whole_months);

    // Payments are due by the grace day; from then on the month about to
    // start counts as owed.
    if eval_date.day() >= GRACE_DAY {
        months += Decimal::ONE;
    }

    // An open commitment runs one month ahead: the upcoming month is already
    // due. Evaluations before the start date are caught by the final clamp.
    if end_date.is_none() {
        months += Decimal::ONE;
    }

    // The first half-month is free for commitments starting mid-month.
    if start_date.day() >= MID_MONTH_DAY {
        months -= Decimal::new(5, 1);
    }

    months.max(Decimal::ZERO)
}

/// Cumulative amount expected from `start_date` through `reference_date`
/// (or through `end_date` for a closed commitment).
///
/// Pure function: identical inputs always yield the identical decimal.
/// `value` is assumed validated upstream (see `Commitment::validate`); only
/// the month count is clamped, never the value.
pub fn expected_amount(
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    value: Decimal,
    reference_date: NaiveDate,
) -> Decimal {
    months_owed(start_date, end_date, reference_date) * value
}
