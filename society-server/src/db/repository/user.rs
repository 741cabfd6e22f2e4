//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserCreate, UserRole};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, rh_no, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM user WHERE id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM user WHERE name = ? LIMIT 1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a user. A taken name surfaces as [`RepoError::Duplicate`].
pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let id = sqlx::query(
        "INSERT INTO user (name, email, password_hash, role, rh_no, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.password_hash)
    .bind(data.role)
    .bind(&data.rh_no)
    .bind(now)
    .execute(pool)
    .await
    .map(|done| done.last_insert_rowid())
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("User name {} already exists", data.name)),
        other => other,
    })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn count_by_role(pool: &SqlitePool, role: UserRole) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user WHERE role = ?")
        .bind(role)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
