//! Data maintenance
//!
//! Full data reset used by `society-server --reset-data`.

use serde::Serialize;
use sqlx::SqlitePool;

use super::repository::{RepoResult, balance_adjustment};

/// Rows removed by [`clear_all`]
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ClearReport {
    pub sessions: u64,
    pub receipts: u64,
    pub expenses: u64,
    pub users: u64,
}

/// Delete all sessions, receipts, expenses and users, and zero the balance
/// adjustment. Runs in one transaction: either everything is cleared or
/// nothing is.
pub async fn clear_all(pool: &SqlitePool) -> RepoResult<ClearReport> {
    let mut tx = pool.begin().await?;

    let sessions = sqlx::query("DELETE FROM session")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let receipts = sqlx::query("DELETE FROM receipt")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let expenses = sqlx::query("DELETE FROM expense")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let users = sqlx::query("DELETE FROM user")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    balance_adjustment::reset(&mut *tx).await?;

    tx.commit().await?;

    let report = ClearReport {
        sessions,
        receipts,
        expenses,
        users,
    };
    tracing::warn!(
        sessions = report.sessions,
        receipts = report.receipts,
        expenses = report.expenses,
        users = report.users,
        "All society data cleared"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{expense, receipt};
    use shared::models::{ExpenseCreate, ReceiptCreate};

    #[tokio::test]
    async fn test_clear_all_resets_everything() {
        let db = DbService::in_memory().await.unwrap();
        sqlx::query("INSERT INTO user (id, name, password_hash, role, created_at) VALUES (1, 'asha', 'x', 'MEMBER', 0)")
            .execute(&db.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO session (token_hash, user_id, expires_at, created_at) VALUES ('h', 1, 10, 0)")
            .execute(&db.pool)
            .await
            .unwrap();
        receipt::create(
            &db.pool,
            ReceiptCreate {
                name: "Asha".into(),
                rh_no: "A-1".into(),
                amount_paise: 500,
                description: None,
                attachment_path: None,
                date: "2024-01-01".into(),
                member_id: Some(1),
            },
        )
        .await
        .unwrap();
        expense::create(
            &db.pool,
            ExpenseCreate {
                name: "Paint".into(),
                amount_paise: 200,
                description: None,
                cheque_no: None,
                attachment_path: None,
                date: "2024-01-02".into(),
            },
        )
        .await
        .unwrap();
        {
            let mut conn = db.pool.acquire().await.unwrap();
            balance_adjustment::ensure(&mut conn).await.unwrap();
            balance_adjustment::overwrite(&mut conn, 900, 100).await.unwrap();
        }

        let report = clear_all(&db.pool).await.unwrap();
        assert_eq!(
            report,
            ClearReport {
                sessions: 1,
                receipts: 1,
                expenses: 1,
                users: 1,
            }
        );

        let mut conn = db.pool.acquire().await.unwrap();
        let adj = balance_adjustment::ensure(&mut conn).await.unwrap();
        assert_eq!(adj.received_adjustment_paise, 0);
        assert_eq!(adj.expense_adjustment_paise, 0);
    }
}
