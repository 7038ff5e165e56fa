//! Contribution tracking for a community-supported agriculture cooperative
//!
//! Members pledge a fixed monthly amount (a [`Commitment`]) and pay by
//! irregular bank transfer. This crate computes, for any commitment and any
//! reference date, how much should have been collected so far, and reconciles
//! that against recorded deposits per [`Share`].
//!
//! The expected amount is always derived on read, never stored: the proration
//! engine is a pure function of the commitment's dates, its monthly value and
//! the reference date.

pub mod aggregate;
pub mod error;
pub mod proration;
pub mod share;

pub use aggregate::{payment_status, share_difference_today, share_expected_today, PaymentStatus};
pub use error::{CsaError, Result};
pub use proration::{expected_amount, months_owed, GRACE_DAY, MID_MONTH_DAY};
pub use share::{Commitment, Deposit, Member, Share};
