//! Expense Model

use serde::{Deserialize, Serialize};

/// Expense entity (society outflow, admin-recorded)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub amount_paise: i64,
    pub description: Option<String>,
    pub cheque_no: Option<String>,
    pub attachment_path: Option<String>,
    /// Expense date, `YYYY-MM-DD`
    pub date: String,
    pub created_at: i64,
}

/// Create expense payload (amount already in minor units)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub name: String,
    pub amount_paise: i64,
    pub description: Option<String>,
    pub cheque_no: Option<String>,
    pub attachment_path: Option<String>,
    pub date: String,
}

/// Expense as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    #[serde(flatten)]
    pub expense: Expense,
    pub amount: f64,
    pub attachment_url: Option<String>,
}
