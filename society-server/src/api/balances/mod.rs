//! Balance API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/balances | GET | 当前余额 | 登录 |
//! | /api/balances | POST | 按目标总额调整 | 管理员 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/balances", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::get));

    let manage_routes = Router::new()
        .route("/", post(handler::adjust))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
