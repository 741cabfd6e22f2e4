//! Balance Adjustment Repository (Singleton)
//!
//! Every function takes a connection so the caller can run it inside its
//! own transaction next to the aggregate reads.

use super::RepoResult;
use shared::models::BalanceAdjustment;
use sqlx::SqliteConnection;

pub const SINGLETON_ID: i64 = 1;

const SELECT_ADJUSTMENT: &str = "SELECT id, received_adjustment_paise, expense_adjustment_paise, updated_at FROM balance_adjustment WHERE id = ?";

/// Return the singleton, creating it with zero deltas when missing.
pub async fn ensure(conn: &mut SqliteConnection) -> RepoResult<BalanceAdjustment> {
    let now = shared::util::now_millis();
    let inserted = sqlx::query(
        "INSERT OR IGNORE INTO balance_adjustment (id, received_adjustment_paise, expense_adjustment_paise, updated_at) VALUES (?, 0, 0, ?)",
    )
    .bind(SINGLETON_ID)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    if inserted.rows_affected() > 0 {
        tracing::info!(target: "ledger", "Balance adjustment row created with zero deltas");
    }

    let row = sqlx::query_as::<_, BalanceAdjustment>(SELECT_ADJUSTMENT)
        .bind(SINGLETON_ID)
        .fetch_one(&mut *conn)
        .await?;
    Ok(row)
}

/// Replace both deltas. The row must already exist (see [`ensure`]).
pub async fn overwrite(
    conn: &mut SqliteConnection,
    received_adjustment_paise: i64,
    expense_adjustment_paise: i64,
) -> RepoResult<BalanceAdjustment> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, BalanceAdjustment>(
        "UPDATE balance_adjustment SET received_adjustment_paise = ?1, expense_adjustment_paise = ?2, updated_at = ?3 WHERE id = ?4 RETURNING id, received_adjustment_paise, expense_adjustment_paise, updated_at",
    )
    .bind(received_adjustment_paise)
    .bind(expense_adjustment_paise)
    .bind(now)
    .bind(SINGLETON_ID)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row)
}

/// Zero both deltas, creating the row if needed.
pub async fn reset(conn: &mut SqliteConnection) -> RepoResult<BalanceAdjustment> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, BalanceAdjustment>(
        "INSERT INTO balance_adjustment (id, received_adjustment_paise, expense_adjustment_paise, updated_at) VALUES (?1, 0, 0, ?2) \
         ON CONFLICT(id) DO UPDATE SET received_adjustment_paise = 0, expense_adjustment_paise = 0, updated_at = ?2 \
         RETURNING id, received_adjustment_paise, expense_adjustment_paise, updated_at",
    )
    .bind(SINGLETON_ID)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row)
}
