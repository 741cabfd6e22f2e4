//! Unified error codes for the society ledger
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Receipt errors
//! - 4xxx: Expense errors
//! - 5xxx: Ledger errors
//! - 6xxx: Attachment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend can match
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (name/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1003,
    /// Session token is invalid
    SessionInvalid = 1004,
    /// Login name already taken
    NameAlreadyInUse = 1005,
    /// Password too short
    PasswordTooShort = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Receipt ====================
    /// Receipt not found
    ReceiptNotFound = 3001,
    /// Receipt was already approved or rejected
    ReceiptAlreadyDecided = 3002,
    /// Receipt amount is invalid
    ReceiptInvalidAmount = 3003,

    // ==================== 4xxx: Expense ====================
    /// Expense not found
    ExpenseNotFound = 4001,
    /// Expense amount is invalid
    ExpenseInvalidAmount = 4002,

    // ==================== 5xxx: Ledger ====================
    /// Balance adjustment could not be applied
    AdjustmentFailed = 5001,

    // ==================== 6xxx: Attachment ====================
    /// File too large
    FileTooLarge = 6001,
    /// No file provided in request
    NoFileProvided = 6002,
    /// Empty file provided
    EmptyFile = 6003,
    /// File storage failed
    FileStorageFailed = 6004,
    /// Attachment link is invalid or expired
    AttachmentLinkInvalid = 6005,
    /// Attachment not found
    AttachmentNotFound = 6006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Timeout
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Missing required fields",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::SessionInvalid => "Session is invalid",
            ErrorCode::NameAlreadyInUse => "Name already in use",
            ErrorCode::PasswordTooShort => "Password is too short",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Admin role required",

            // Receipt
            ErrorCode::ReceiptNotFound => "Receipt not found",
            ErrorCode::ReceiptAlreadyDecided => "Receipt has already been decided",
            ErrorCode::ReceiptInvalidAmount => "Receipt amount is invalid",

            // Expense
            ErrorCode::ExpenseNotFound => "Expense not found",
            ErrorCode::ExpenseInvalidAmount => "Expense amount is invalid",

            // Ledger
            ErrorCode::AdjustmentFailed => "Balance adjustment failed",

            // Attachment
            ErrorCode::FileTooLarge => "File is too large",
            ErrorCode::NoFileProvided => "Upload is required",
            ErrorCode::EmptyFile => "Uploaded file is empty",
            ErrorCode::FileStorageFailed => "Failed to store file",
            ErrorCode::AttachmentLinkInvalid => "Attachment link is invalid or expired",
            ErrorCode::AttachmentNotFound => "Attachment not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::SessionExpired),
            1004 => Ok(ErrorCode::SessionInvalid),
            1005 => Ok(ErrorCode::NameAlreadyInUse),
            1006 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Receipt
            3001 => Ok(ErrorCode::ReceiptNotFound),
            3002 => Ok(ErrorCode::ReceiptAlreadyDecided),
            3003 => Ok(ErrorCode::ReceiptInvalidAmount),

            // Expense
            4001 => Ok(ErrorCode::ExpenseNotFound),
            4002 => Ok(ErrorCode::ExpenseInvalidAmount),

            // Ledger
            5001 => Ok(ErrorCode::AdjustmentFailed),

            // Attachment
            6001 => Ok(ErrorCode::FileTooLarge),
            6002 => Ok(ErrorCode::NoFileProvided),
            6003 => Ok(ErrorCode::EmptyFile),
            6004 => Ok(ErrorCode::FileStorageFailed),
            6005 => Ok(ErrorCode::AttachmentLinkInvalid),
            6006 => Ok(ErrorCode::AttachmentNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
