//! Prorated payment expectation engine

mod engine;

pub use engine::{expected_amount, months_owed};

// ============================================================================
// Payment Policy Constants
// ============================================================================
// These are cooperative business policy, not derived values. They have been
// renegotiated in the past; keep them named so a policy change does not
// require re-deriving the algorithm.

/// Day of month by which a payment is conventionally expected to have landed.
/// From this day on, the upcoming month already counts as owed.
pub const GRACE_DAY: u32 = 27;

/// Commitments starting on or after this day of month are charged half a
/// month less for their first month.
pub const MID_MONTH_DAY: u32 = 15;
