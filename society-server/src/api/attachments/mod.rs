//! Attachment download (signed URL)
//!
//! `GET /api/attachments/{subdir}/{name}?expires=<ms>&sig=<hex>`. Public at the
//! session layer; the signature is the credential.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/attachments/{subdir}/{name}", get(handler::download))
}
