//! Balance Models
//!
//! `BalanceAdjustment` is the stored singleton row; `Balances` is the
//! derived view in major currency units.

use serde::{Deserialize, Serialize};

/// Balance adjustment singleton (id is always 1)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BalanceAdjustment {
    pub id: i64,
    /// Signed delta added to the approved-receipt sum (minor units)
    pub received_adjustment_paise: i64,
    /// Signed delta added to the expense sum (minor units)
    pub expense_adjustment_paise: i64,
    pub updated_at: i64,
}

/// Adjustment deltas in major units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AdjustmentAmounts {
    pub received: f64,
    pub expense: f64,
}

/// Effective balances in major units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Balances {
    pub received: f64,
    pub expense: f64,
    /// received - expense
    pub total: f64,
    pub adjustments: AdjustmentAmounts,
}

/// Admin balance write: the desired effective totals in major units.
///
/// Missing or malformed values read as zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTargets {
    #[serde(default, deserialize_with = "crate::util::lenient_f64")]
    pub target_received: f64,
    #[serde(default, deserialize_with = "crate::util::lenient_f64")]
    pub target_expense: f64,
}
