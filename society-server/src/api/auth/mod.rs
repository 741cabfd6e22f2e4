//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - signup / signin / admin-signin: public
/// - me: public (anonymous callers get `null`)
/// - signout: session required (global require_auth)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/signin", post(handler::signin))
        .route("/admin-signin", post(handler::admin_signin))
        .route("/me", get(handler::me))
        .route("/signout", post(handler::signout))
}
