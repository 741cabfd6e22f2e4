//! Session Repository
//!
//! Only the SHA-256 of a session token is stored; lookups hash first.

use super::RepoResult;
use shared::models::{Session, User};
use sqlx::SqlitePool;

pub async fn create(
    pool: &SqlitePool,
    token_hash: &str,
    user_id: i64,
    expires_at: i64,
) -> RepoResult<Session> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, Session>(
        "INSERT INTO session (token_hash, user_id, expires_at, created_at) VALUES (?1, ?2, ?3, ?4) RETURNING token_hash, user_id, expires_at, created_at",
    )
    .bind(token_hash)
    .bind(user_id)
    .bind(expires_at)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Resolve the user owning an unexpired session.
pub async fn find_user(pool: &SqlitePool, token_hash: &str, now: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.id, u.name, u.email, u.password_hash, u.role, u.rh_no, u.created_at FROM session s JOIN user u ON u.id = s.user_id WHERE s.token_hash = ?1 AND s.expires_at > ?2",
    )
    .bind(token_hash)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn delete(pool: &SqlitePool, token_hash: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM session WHERE token_hash = ?")
        .bind(token_hash)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Remove every session that expired at or before `now`.
pub async fn purge_expired(pool: &SqlitePool, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM session WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
