//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、登录、会话
//! - [`receipts`] - 收据提交与审核
//! - [`expenses`] - 支出登记
//! - [`balances`] - 余额查询与调整
//! - [`attachments`] - 附件签名下载

pub mod attachments;
pub mod auth;
pub mod balances;
pub mod expenses;
pub mod form;
pub mod health;
pub mod receipts;

use axum::Router;
use serde::Serialize;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// `{"ok": true}` acknowledgement
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// 注册全部路由 (无中间件、无状态)
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(receipts::router())
        .merge(expenses::router())
        .merge(balances::router())
        .merge(attachments::router())
}
