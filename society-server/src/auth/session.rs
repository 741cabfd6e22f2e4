//! Opaque session tokens
//!
//! A token is 32 random bytes, hex-encoded. The client holds the token; the
//! store holds only its SHA-256, so a leaked database cannot be replayed.
//!
//! Token sources, in order: `Authorization: Bearer <token>`, then the
//! `tv_session` cookie.

use http::HeaderMap;
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{RepoResult, session};

/// Session cookie name
pub const SESSION_COOKIE: &str = "tv_session";

const TOKEN_BYTES: usize = 32;

/// New random session token (64 hex chars)
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Storage key for a token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract token from `Authorization: Bearer <token>`
pub fn extract_from_header(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extract token from a `Cookie` header value
pub fn extract_from_cookie(cookie_header: &str) -> Option<&str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|v| !v.is_empty())
}

/// Token carried by a request, if any
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_from_header)
    {
        return Some(token.to_string());
    }

    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(extract_from_cookie)
        .map(str::to_string)
}

/// `Set-Cookie` value opening a session
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}{secure}")
}

/// `Set-Cookie` value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Open a session for `user_id`. Returns `(token, expires_at)`.
pub async fn open(pool: &SqlitePool, user_id: i64, ttl_millis: i64) -> RepoResult<(String, i64)> {
    let token = generate_token();
    let expires_at = shared::util::now_millis() + ttl_millis;
    session::create(pool, &hash_token(&token), user_id, expires_at).await?;
    Ok((token, expires_at))
}

/// Resolve a token to its user. Unknown and expired tokens resolve to None.
pub async fn resolve(pool: &SqlitePool, token: &str) -> RepoResult<Option<CurrentUser>> {
    let now = shared::util::now_millis();
    let user = session::find_user(pool, &hash_token(token), now).await?;
    Ok(user.map(|u| CurrentUser::from(&u)))
}

/// Close the session behind a token. Returns whether one existed.
pub async fn close(pool: &SqlitePool, token: &str) -> RepoResult<bool> {
    session::delete(pool, &hash_token(token)).await
}
