//! Receipt Repository

use super::{RepoError, RepoResult};
use shared::models::{Receipt, ReceiptCreate, ReceiptStatus};
use sqlx::{SqliteConnection, SqlitePool};

const RECEIPT_COLUMNS: &str = "id, name, rh_no, amount_paise, description, attachment_path, status, date, member_id, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Receipt>> {
    let sql = format!("SELECT {RECEIPT_COLUMNS} FROM receipt ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Receipt>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Receipts a member may see: their own, plus unowned receipts filed
/// against their RH no.
pub async fn find_for_member(
    pool: &SqlitePool,
    member_id: i64,
    rh_no: Option<&str>,
) -> RepoResult<Vec<Receipt>> {
    let sql = format!(
        "SELECT {RECEIPT_COLUMNS} FROM receipt WHERE member_id = ?1 OR (member_id IS NULL AND ?2 IS NOT NULL AND rh_no = ?2) ORDER BY created_at DESC, id DESC"
    );
    let rows = sqlx::query_as::<_, Receipt>(&sql)
        .bind(member_id)
        .bind(rh_no)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Receipt>> {
    let sql = format!("SELECT {RECEIPT_COLUMNS} FROM receipt WHERE id = ?");
    let row = sqlx::query_as::<_, Receipt>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ReceiptCreate) -> RepoResult<Receipt> {
    let now = shared::util::now_millis();
    let id = sqlx::query(
        "INSERT INTO receipt (name, rh_no, amount_paise, description, attachment_path, status, date, member_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(&data.name)
    .bind(&data.rh_no)
    .bind(data.amount_paise)
    .bind(&data.description)
    .bind(&data.attachment_path)
    .bind(ReceiptStatus::Pending)
    .bind(&data.date)
    .bind(data.member_id)
    .bind(now)
    .execute(pool)
    .await?
    .last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create receipt".into()))
}

/// Record the admin decision. Only a PENDING receipt can move, and only once:
/// the status guard sits in the UPDATE itself so two concurrent decisions
/// cannot both succeed.
pub async fn decide(pool: &SqlitePool, id: i64, decision: ReceiptStatus) -> RepoResult<Receipt> {
    if !decision.is_decided() {
        return Err(RepoError::Validation(
            "Decision must be APPROVED or REJECTED".into(),
        ));
    }

    let now = shared::util::now_millis();
    let sql = format!(
        "UPDATE receipt SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4 RETURNING {RECEIPT_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Receipt>(&sql)
        .bind(decision)
        .bind(now)
        .bind(id)
        .bind(ReceiptStatus::Pending)
        .fetch_optional(pool)
        .await?;

    if let Some(receipt) = updated {
        return Ok(receipt);
    }

    match find_by_id(pool, id).await? {
        None => Err(RepoError::NotFound(format!("Receipt {id} not found"))),
        Some(existing) => Err(RepoError::Conflict(format!(
            "Receipt {id} is already {}",
            existing.status.as_str()
        ))),
    }
}

/// Delete a receipt, returning the removed row (None if it did not exist).
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<Option<Receipt>> {
    let sql = format!("DELETE FROM receipt WHERE id = ? RETURNING {RECEIPT_COLUMNS}");
    let row = sqlx::query_as::<_, Receipt>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Sum of APPROVED receipt amounts in minor units (0 when none)
pub async fn sum_approved(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let sum = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(amount_paise), 0) FROM receipt WHERE status = ?",
    )
    .bind(ReceiptStatus::Approved)
    .fetch_one(&mut *conn)
    .await?;
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn receipt_input(rh_no: &str, amount_paise: i64, member_id: Option<i64>) -> ReceiptCreate {
        ReceiptCreate {
            name: "Resident".into(),
            rh_no: rh_no.into(),
            amount_paise,
            description: None,
            attachment_path: None,
            date: "2024-04-01".into(),
            member_id,
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let db = DbService::in_memory().await.unwrap();
        let r = create(&db.pool, receipt_input("A-1", 10_000, None))
            .await
            .unwrap();
        assert_eq!(r.status, ReceiptStatus::Pending);
        assert_eq!(r.amount_paise, 10_000);
        assert_eq!(r.created_at, r.updated_at);
    }

    #[tokio::test]
    async fn test_decide_only_once() {
        let db = DbService::in_memory().await.unwrap();
        let r = create(&db.pool, receipt_input("A-1", 10_000, None))
            .await
            .unwrap();

        let approved = decide(&db.pool, r.id, ReceiptStatus::Approved).await.unwrap();
        assert_eq!(approved.status, ReceiptStatus::Approved);

        let again = decide(&db.pool, r.id, ReceiptStatus::Rejected).await;
        assert!(matches!(again, Err(RepoError::Conflict(_))));

        let stored = find_by_id(&db.pool, r.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReceiptStatus::Approved);
    }

    #[tokio::test]
    async fn test_decide_missing_and_invalid() {
        let db = DbService::in_memory().await.unwrap();
        assert!(matches!(
            decide(&db.pool, 42, ReceiptStatus::Approved).await,
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(
            decide(&db.pool, 42, ReceiptStatus::Pending).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_sum_approved_ignores_other_statuses() {
        let db = DbService::in_memory().await.unwrap();
        let a = create(&db.pool, receipt_input("A-1", 10_000, None)).await.unwrap();
        create(&db.pool, receipt_input("A-2", 5_000, None)).await.unwrap();
        let c = create(&db.pool, receipt_input("A-3", 2_500, None)).await.unwrap();
        decide(&db.pool, a.id, ReceiptStatus::Approved).await.unwrap();
        decide(&db.pool, c.id, ReceiptStatus::Rejected).await.unwrap();

        let mut conn = db.pool.acquire().await.unwrap();
        assert_eq!(sum_approved(&mut conn).await.unwrap(), 10_000);
    }

    #[tokio::test]
    async fn test_sum_approved_empty_is_zero() {
        let db = DbService::in_memory().await.unwrap();
        let mut conn = db.pool.acquire().await.unwrap();
        assert_eq!(sum_approved(&mut conn).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_member_scope() {
        let db = DbService::in_memory().await.unwrap();
        sqlx::query("INSERT INTO user (id, name, password_hash, role, rh_no, created_at) VALUES (7, 'asha', 'x', 'MEMBER', 'B-2', 0), (8, 'ravi', 'x', 'MEMBER', 'B-2', 0)")
            .execute(&db.pool)
            .await
            .unwrap();

        create(&db.pool, receipt_input("B-2", 100, Some(7))).await.unwrap();
        create(&db.pool, receipt_input("B-2", 200, None)).await.unwrap();
        create(&db.pool, receipt_input("C-9", 300, None)).await.unwrap();
        create(&db.pool, receipt_input("B-2", 400, Some(8))).await.unwrap();

        let mut amounts: Vec<i64> = find_for_member(&db.pool, 7, Some("B-2"))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.amount_paise)
            .collect();
        amounts.sort();
        assert_eq!(amounts, vec![100, 200]);

        let own_only = find_for_member(&db.pool, 7, None).await.unwrap();
        assert_eq!(own_only.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_returns_row_once() {
        let db = DbService::in_memory().await.unwrap();
        let r = create(&db.pool, receipt_input("A-1", 1, None)).await.unwrap();
        assert!(delete(&db.pool, r.id).await.unwrap().is_some());
        assert!(delete(&db.pool, r.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_burst_of_creates_gets_distinct_ids() {
        let db = DbService::in_memory().await.unwrap();
        let mut ids = Vec::new();
        for i in 0..300 {
            let r = create(&db.pool, receipt_input("A-1", i + 1, None)).await.unwrap();
            ids.push(r.id);
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        // 删除后的 id 不复用
        let last = *ids.last().unwrap();
        delete(&db.pool, last).await.unwrap();
        let next = create(&db.pool, receipt_input("A-1", 1, None)).await.unwrap();
        assert!(next.id > last);
    }
}
