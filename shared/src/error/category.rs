//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Receipt errors
/// - 4xxx: Expense errors
/// - 5xxx: Ledger errors
/// - 6xxx: Attachment errors
/// - 7xxx..: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Receipt errors (3xxx)
    Receipt,
    /// Expense errors (4xxx)
    Expense,
    /// Ledger errors (5xxx)
    Ledger,
    /// Attachment errors (6xxx)
    Attachment,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Receipt,
            4000..5000 => Self::Expense,
            5000..6000 => Self::Ledger,
            6000..7000 => Self::Attachment,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Receipt => "receipt",
            Self::Expense => "expense",
            Self::Ledger => "ledger",
            Self::Attachment => "attachment",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Receipt);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Expense);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Ledger);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Attachment);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::AdminRequired.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::ReceiptAlreadyDecided.category(),
            ErrorCategory::Receipt
        );
        assert_eq!(ErrorCode::ExpenseNotFound.category(), ErrorCategory::Expense);
        assert_eq!(ErrorCode::AdjustmentFailed.category(), ErrorCategory::Ledger);
        assert_eq!(ErrorCode::FileTooLarge.category(), ErrorCategory::Attachment);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Receipt).unwrap();
        assert_eq!(json, "\"receipt\"");

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
    }
}
