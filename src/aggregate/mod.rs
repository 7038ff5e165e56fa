//! Aggregation of expectations and deposits per share

mod status;

pub use status::{payment_status, share_difference_today, share_expected_today, PaymentStatus};
