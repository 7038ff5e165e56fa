//! Entity types: commitments, deposits, members, shares
//!
//! A share is the billing unit: the group of members whose combined deposits
//! and commitments are reconciled together. Expected amounts are derived on
//! read and never stored on the entities.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CsaError, Result};
use crate::proration::expected_amount;

/// A member's pledge to pay a fixed amount per month over an open or closed
/// date range. Historically called a "bet".
///
/// A member who renegotiates their pledge gets the old commitment closed and
/// a new one opened; the share's expectation is the sum over all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    /// Amount owed per elapsed month.
    pub value: Decimal,
    pub start_date: NaiveDate,
    /// `None` means still active, open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Commitment {
    pub fn open(value: Decimal, start_date: NaiveDate) -> Self {
        Self {
            value,
            start_date,
            end_date: None,
        }
    }

    pub fn closed(value: Decimal, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            value,
            start_date,
            end_date: Some(end_date),
        }
    }

    /// Check domain invariants. Violations are data errors from the caller
    /// and are surfaced, not coerced.
    pub fn validate(&self) -> Result<()> {
        if self.value < Decimal::ZERO {
            return Err(CsaError::InvalidCommitment {
                reason: format!("monthly value {} is negative", self.value),
            });
        }
        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(CsaError::InvalidCommitment {
                    reason: format!(
                        "end date {end_date} precedes start date {}",
                        self.start_date
                    ),
                });
            }
        }
        Ok(())
    }

    /// Cumulative amount this commitment should have generated by `reference_date`.
    pub fn expected_at(&self, reference_date: NaiveDate) -> Decimal {
        expected_amount(self.start_date, self.end_date, self.value, reference_date)
    }

    /// [`Commitment::expected_at`] evaluated at the current local date.
    pub fn expected_today(&self) -> Decimal {
        self.expected_at(Local::now().date_naive())
    }

    /// Open-ended, or closing on/after `as_of`.
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        match self.end_date {
            None => true,
            Some(end_date) => end_date >= as_of,
        }
    }
}

/// An incoming payment record from the bank import or manual entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub amount: Decimal,
    pub timestamp: NaiveDateTime,
    pub title: String,
    /// Name of the person the transfer came from.
    pub person: String,
    /// Excluded from all totals (e.g. a mis-matched transfer).
    #[serde(default)]
    pub ignore: bool,
    /// Security deposits do not count toward recurring-payment totals.
    #[serde(default)]
    pub is_security: bool,
}

impl Deposit {
    /// Counts toward the recurring-payment total.
    pub fn is_valid(&self) -> bool {
        !(self.ignore || self.is_security)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
        }
    }
}

/// A group of members pooling contributions: the aggregation boundary for
/// deposits and commitments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Share {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub deposits: Vec<Deposit>,
    /// Pickup station the share collects from.
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl Share {
    /// Display name: member names, alphabetical, joined with `" & "`.
    pub fn name(&self) -> String {
        let mut names: Vec<&str> = self.members.iter().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names.join(" & ")
    }

    /// Deposits counting toward the recurring-payment total.
    pub fn valid_deposits(&self) -> impl Iterator<Item = &Deposit> {
        self.deposits.iter().filter(|d| d.is_valid())
    }

    pub fn total_deposits(&self) -> Decimal {
        self.valid_deposits().map(|d| d.amount).sum()
    }

    pub fn number_of_deposits(&self) -> usize {
        self.valid_deposits().count()
    }

    /// Sum of security deposits (ignored ones excluded).
    pub fn total_security(&self) -> Decimal {
        self.deposits
            .iter()
            .filter(|d| d.is_security && !d.ignore)
            .map(|d| d.amount)
            .sum()
    }

    /// Earliest commitment start, i.e. when the share joined the cooperative.
    pub fn join_date(&self) -> Option<NaiveDate> {
        self.commitments.iter().map(|c| c.start_date).min()
    }

    /// Whether any commitment is still running at `as_of`.
    pub fn currently_active(&self, as_of: NaiveDate) -> bool {
        self.commitments.iter().any(|c| c.is_active(as_of))
    }

    /// Fold a duplicate share into this one. Members, commitments and
    /// deposits are appended; the station is kept unless absent; notes are
    /// concatenated.
    pub fn merge(&mut self, other: Share) {
        self.members.extend(other.members);
        self.commitments.extend(other.commitments);
        self.deposits.extend(other.deposits);
        if self.station.is_none() {
            self.station = other.station;
        }
        self.note = match (self.note.take(), other.note) {
            (Some(a), Some(b)) => Some(format!("{a} \n --- \n {b}")),
            (note, None) | (None, note) => note,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn deposit(amount: Decimal) -> Deposit {
        Deposit {
            amount,
            timestamp: date(2018, 1, 1).and_hms_opt(12, 0, 0).unwrap(),
            title: "monthly payment".into(),
            person: "Firstname Lastname".into(),
            ignore: false,
            is_security: false,
        }
    }

    #[test]
    fn share_name_sorts_members() {
        let share = Share {
            members: vec![Member::new("Bob"), Member::new("Anna")],
            ..Default::default()
        };
        assert_eq!(share.name(), "Anna & Bob");
    }

    #[test]
    fn share_name_without_members_is_empty() {
        assert_eq!(Share::default().name(), "");
    }

    #[test]
    fn ignored_and_security_deposits_are_excluded() {
        let mut share = Share {
            deposits: vec![deposit(dec!(63)), deposit(dec!(100)), deposit(dec!(200))],
            ..Default::default()
        };
        share.deposits[1].ignore = true;
        share.deposits[2].is_security = true;

        assert_eq!(share.total_deposits(), dec!(63));
        assert_eq!(share.number_of_deposits(), 1);
        assert_eq!(share.total_security(), dec!(200));
    }

    #[test]
    fn ignored_security_deposit_counts_nowhere() {
        let mut share = Share {
            deposits: vec![deposit(dec!(500))],
            ..Default::default()
        };
        share.deposits[0].is_security = true;
        share.deposits[0].ignore = true;

        assert_eq!(share.total_deposits(), Decimal::ZERO);
        assert_eq!(share.total_security(), Decimal::ZERO);
    }

    #[test]
    fn join_date_is_earliest_commitment_start() {
        let share = Share {
            commitments: vec![
                Commitment::open(dec!(90), date(2019, 1, 1)),
                Commitment::closed(dec!(90), date(2018, 1, 1), date(2018, 12, 31)),
            ],
            ..Default::default()
        };
        assert_eq!(share.join_date(), Some(date(2018, 1, 1)));
    }

    #[test]
    fn active_when_any_commitment_is_open() {
        let closed = Share {
            commitments: vec![Commitment::closed(dec!(90), date(2018, 1, 1), date(2018, 12, 31))],
            ..Default::default()
        };
        assert!(!closed.currently_active(date(2020, 6, 1)));
        assert!(closed.currently_active(date(2018, 6, 1)));

        let open = Share {
            commitments: vec![Commitment::open(dec!(90), date(2018, 1, 1))],
            ..Default::default()
        };
        assert!(open.currently_active(date(2030, 1, 1)));
    }

    #[test]
    fn validate_rejects_negative_value() {
        let commitment = Commitment::open(dec!(-10), date(2018, 1, 1));
        assert!(commitment.validate().is_err());
    }

    #[test]
    fn validate_rejects_end_before_start() {
        let commitment = Commitment::closed(dec!(10), date(2018, 5, 1), date(2018, 1, 1));
        assert!(commitment.validate().is_err());
    }

    #[test]
    fn validate_accepts_zero_value() {
        let commitment = Commitment::open(Decimal::ZERO, date(2018, 1, 1));
        assert!(commitment.validate().is_ok());
    }

    #[test]
    fn merge_folds_second_share_into_first() {
        let mut first = Share {
            members: vec![Member::new("Anna")],
            commitments: vec![Commitment::open(dec!(50), date(2019, 1, 1))],
            note: Some("pays quarterly".into()),
            station: None,
            ..Default::default()
        };
        let second = Share {
            members: vec![Member::new("Bob")],
            deposits: vec![deposit(dec!(150))],
            note: Some("duplicate entry".into()),
            station: Some("North Station".into()),
            ..Default::default()
        };

        first.merge(second);

        assert_eq!(first.name(), "Anna & Bob");
        assert_eq!(first.commitments.len(), 1);
        assert_eq!(first.total_deposits(), dec!(150));
        assert_eq!(first.station.as_deref(), Some("North Station"));
        assert_eq!(
            first.note.as_deref(),
            Some("pays quarterly \n --- \n duplicate entry")
        );
    }

    #[test]
    fn commitment_expected_at_delegates_to_engine() {
        let commitment = Commitment::closed(dec!(100), date(2017, 1, 1), date(2017, 3, 31));
        assert_eq!(commitment.expected_at(date(2020, 1, 1)), dec!(300));
    }

    #[test]
    fn decimal_amounts_serialize_as_strings() {
        let commitment = Commitment::open(dec!(97.17), date(2017, 1, 1));
        let json = serde_json::to_value(&commitment).unwrap();
        assert_eq!(json["value"], serde_json::json!("97.17"));
    }
}
