//! Data models
//!
//! Shared between society-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY); money is stored as
//! integer minor units (`*_paise`).

pub mod balance;
pub mod expense;
pub mod receipt;
pub mod user;

// Re-exports
pub use balance::*;
pub use expense::*;
pub use receipt::*;
pub use user::*;
