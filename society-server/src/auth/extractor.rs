//! Session Extractor
//!
//! Handlers take [`CurrentUser`] (required) or `Option<CurrentUser>` (for
//! routes that answer anonymous callers too, like `/api/auth/me`).

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::AppError;
use crate::auth::{CurrentUser, session};
use crate::core::ServerState;
use crate::security_log;

async fn lookup(parts: &mut Parts, state: &ServerState) -> Result<Option<CurrentUser>, AppError> {
    // Already resolved by require_auth
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        return Ok(Some(user.clone()));
    }

    let Some(token) = session::token_from_headers(&parts.headers) else {
        return Ok(None);
    };

    let user = session::resolve(state.pool(), &token).await?;
    if let Some(user) = &user {
        parts.extensions.insert(user.clone());
    }
    Ok(user)
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match lookup(parts, state).await? {
            Some(user) => Ok(user),
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                Err(AppError::unauthorized())
            }
        }
    }
}

/// Missing, unknown and expired sessions all extract as `None`.
impl OptionalFromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Option<Self>, Self::Rejection> {
        lookup(parts, state).await
    }
}
