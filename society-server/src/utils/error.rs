//! 统一错误处理
//!
//! 错误类型统一来自 `shared::error`，这里补充服务端特有的转换：
//! - 仓储层 [`RepoError`] → [`AppError`]
//! - 附件存储错误 [`StorageError`] / 签名错误 [`SignatureError`] → [`AppError`]
//! - multipart 解析错误 → [`AppError`]
//!
//! # 使用示例
//!
//! ```ignore
//! let receipt = receipt::find_by_id(&pool, id)
//!     .await?
//!     .ok_or_else(|| AppError::new(ErrorCode::ReceiptNotFound))?;
//! ```

use axum::extract::multipart::MultipartError;

pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;
use crate::storage::{SignatureError, StorageError};

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                // 详细信息只写日志，不返回给客户端
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TooLarge { .. } => {
                AppError::with_message(ErrorCode::FileTooLarge, err.to_string())
            }
            StorageError::Empty => AppError::new(ErrorCode::EmptyFile),
            StorageError::InvalidPath(_) => {
                AppError::with_message(ErrorCode::InvalidRequest, err.to_string())
            }
            StorageError::NotFound(_) => AppError::new(ErrorCode::AttachmentNotFound),
            StorageError::Io(e) => {
                tracing::error!(target: "attachments", error = %e, "Attachment storage failed");
                AppError::new(ErrorCode::FileStorageFailed)
            }
        }
    }
}

impl From<SignatureError> for AppError {
    fn from(err: SignatureError) -> Self {
        AppError::with_message(ErrorCode::AttachmentLinkInvalid, err.to_string())
    }
}

/// multipart 解析失败 (请求体格式错误或超出大小限制)
pub fn multipart_error(e: MultipartError) -> AppError {
    let status = e.status();
    if status == http::StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::new(ErrorCode::FileTooLarge);
    }
    AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
}
