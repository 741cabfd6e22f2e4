//! Shared types for the society ledger
//!
//! Common types used by the server and its clients: domain models,
//! the unified error system, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
