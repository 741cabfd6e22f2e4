//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ErrorBody`] - 错误响应体 (from shared::error)
//! - 日志、输入校验

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode, multipart_error};
