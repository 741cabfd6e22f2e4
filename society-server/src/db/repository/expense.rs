//! Expense Repository

use super::{RepoError, RepoResult};
use shared::models::{Expense, ExpenseCreate};
use sqlx::{SqliteConnection, SqlitePool};

const EXPENSE_COLUMNS: &str =
    "id, name, amount_paise, description, cheque_no, attachment_path, date, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Expense>> {
    let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expense ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Expense>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Expense>> {
    let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = ?");
    let row = sqlx::query_as::<_, Expense>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ExpenseCreate) -> RepoResult<Expense> {
    let now = shared::util::now_millis();
    let id = sqlx::query(
        "INSERT INTO expense (name, amount_paise, description, cheque_no, attachment_path, date, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&data.name)
    .bind(data.amount_paise)
    .bind(&data.description)
    .bind(&data.cheque_no)
    .bind(&data.attachment_path)
    .bind(&data.date)
    .bind(now)
    .execute(pool)
    .await?
    .last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create expense".into()))
}

/// Delete an expense, returning the removed row (None if it did not exist).
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<Option<Expense>> {
    let sql = format!("DELETE FROM expense WHERE id = ? RETURNING {EXPENSE_COLUMNS}");
    let row = sqlx::query_as::<_, Expense>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Sum of all expense amounts in minor units (0 when none)
pub async fn sum_all(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let sum = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(amount_paise), 0) FROM expense")
        .fetch_one(&mut *conn)
        .await?;
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn expense_input(amount_paise: i64) -> ExpenseCreate {
        ExpenseCreate {
            name: "Lift maintenance".into(),
            amount_paise,
            description: Some("Quarterly AMC".into()),
            cheque_no: Some("004512".into()),
            attachment_path: None,
            date: "2024-05-10".into(),
        }
    }

    #[tokio::test]
    async fn test_create_and_sum() {
        let db = DbService::in_memory().await.unwrap();
        let e = create(&db.pool, expense_input(3_000)).await.unwrap();
        assert_eq!(e.cheque_no.as_deref(), Some("004512"));
        create(&db.pool, expense_input(1_250)).await.unwrap();

        let mut conn = db.pool.acquire().await.unwrap();
        assert_eq!(sum_all(&mut conn).await.unwrap(), 4_250);
    }

    #[tokio::test]
    async fn test_delete_then_sum_drops() {
        let db = DbService::in_memory().await.unwrap();
        let e = create(&db.pool, expense_input(3_000)).await.unwrap();
        assert!(delete(&db.pool, e.id).await.unwrap().is_some());
        assert!(delete(&db.pool, e.id).await.unwrap().is_none());

        let mut conn = db.pool.acquire().await.unwrap();
        assert_eq!(sum_all(&mut conn).await.unwrap(), 0);
    }
}
