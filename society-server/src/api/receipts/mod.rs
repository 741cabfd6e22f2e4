//! Receipt API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/receipts | GET | 列表 (成员仅见自己的) | 登录 |
//! | /api/receipts | POST | 提交收据 (multipart) | 登录 |
//! | /api/receipts/{id}/approve | POST | 批准 | 管理员 |
//! | /api/receipts/{id}/reject | POST | 拒绝 | 管理员 |
//! | /api/receipts/{id} | DELETE | 删除 | 管理员 |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/receipts", routes())
}

fn routes() -> Router<ServerState> {
    // 成员路由：任意登录用户
    let member_routes = Router::new().route("/", get(handler::list).post(handler::create));

    // 审核路由：仅管理员
    let admin_routes = Router::new()
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/reject", post(handler::reject))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    member_routes.merge(admin_routes)
}
