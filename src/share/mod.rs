//! Share domain model and ledger loading

mod data;
pub mod loader;

pub use data::{Commitment, Deposit, Member, Share};
pub use loader::{load_ledger, load_shares_from_csv, write_ledger, DecimalFormat};
