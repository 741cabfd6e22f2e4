//! Expense API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/expenses", routes())
}

fn routes() -> Router<ServerState> {
    // 读取路由：任意登录用户
    let read_routes = Router::new().route("/", get(handler::list));

    // 管理路由：仅管理员
    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
