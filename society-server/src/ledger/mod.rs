//! Ledger - balance computation and adjustment
//!
//! - [`money`] - major/minor unit conversion
//! - [`compute`] - pure balance arithmetic and back-solving
//! - [`service`] - transactional reads and writes against the store

pub mod compute;
pub mod money;
pub mod service;

pub use compute::{BalanceSheet, LedgerSums, TargetTotals};
pub use service::{apply_targets, read_balances};
