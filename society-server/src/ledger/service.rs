//! Store-backed ledger operations
//!
//! Both operations run in a single transaction:
//! - read: ensure singleton, sum approved receipts, sum expenses
//! - write: ensure singleton, re-read raw sums, overwrite both deltas
//!
//! `ensure` starts with an `INSERT OR IGNORE`, so each transaction takes
//! the SQLite write lock up front and the sums cannot shift underneath it.

use shared::models::BalanceTargets;
use sqlx::{SqliteConnection, SqlitePool};

use super::compute::{self, BalanceSheet, LedgerSums, TargetTotals};
use super::money::major_to_minor;
use crate::db::repository::{RepoResult, balance_adjustment, expense, receipt};

async fn read_sums(conn: &mut SqliteConnection) -> RepoResult<LedgerSums> {
    Ok(LedgerSums {
        approved_receipts: receipt::sum_approved(conn).await?,
        expenses: expense::sum_all(conn).await?,
    })
}

/// Current effective balances.
pub async fn read_balances(pool: &SqlitePool) -> RepoResult<BalanceSheet> {
    let mut tx = pool.begin().await?;
    let adjustment = balance_adjustment::ensure(&mut *tx).await?;
    let sums = read_sums(&mut *tx).await?;
    tx.commit().await?;

    Ok(compute::compute(sums, &adjustment))
}

/// Make the effective totals equal the admin's targets by overwriting the
/// stored deltas. Returns the balances as of the commit.
pub async fn apply_targets(pool: &SqlitePool, targets: BalanceTargets) -> RepoResult<BalanceSheet> {
    let targets = TargetTotals {
        received: major_to_minor(targets.target_received),
        expense: major_to_minor(targets.target_expense),
    };

    let mut tx = pool.begin().await?;
    let previous = balance_adjustment::ensure(&mut *tx).await?;
    let sums = read_sums(&mut *tx).await?;
    let (received_delta, expense_delta) = compute::back_solve(targets, sums);
    let adjustment = balance_adjustment::overwrite(&mut *tx, received_delta, expense_delta).await?;
    tx.commit().await?;

    tracing::info!(
        target: "ledger",
        target_received = targets.received,
        target_expense = targets.expense,
        approved_receipts = sums.approved_receipts,
        expenses = sums.expenses,
        previous_received_adjustment = previous.received_adjustment_paise,
        previous_expense_adjustment = previous.expense_adjustment_paise,
        received_adjustment = adjustment.received_adjustment_paise,
        expense_adjustment = adjustment.expense_adjustment_paise,
        "Balance adjustment overwritten"
    );

    Ok(compute::compute(sums, &adjustment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{ExpenseCreate, ReceiptCreate, ReceiptStatus};

    async fn add_receipt(pool: &SqlitePool, amount_paise: i64, status: ReceiptStatus) -> i64 {
        let r = receipt::create(
            pool,
            ReceiptCreate {
                name: "Resident".into(),
                rh_no: "A-101".into(),
                amount_paise,
                description: None,
                attachment_path: None,
                date: "2024-04-01".into(),
                member_id: None,
            },
        )
        .await
        .unwrap();
        if status.is_decided() {
            receipt::decide(pool, r.id, status).await.unwrap();
        }
        r.id
    }

    async fn add_expense(pool: &SqlitePool, amount_paise: i64) {
        expense::create(
            pool,
            ExpenseCreate {
                name: "Security".into(),
                amount_paise,
                description: None,
                cheque_no: None,
                attachment_path: None,
                date: "2024-04-02".into(),
            },
        )
        .await
        .unwrap();
    }

    /// receipts [{100, APPROVED}, {50, PENDING}, {25, REJECTED}], expenses [{30}]
    async fn scenario_pool() -> SqlitePool {
        let db = DbService::in_memory().await.unwrap();
        add_receipt(&db.pool, 10_000, ReceiptStatus::Approved).await;
        add_receipt(&db.pool, 5_000, ReceiptStatus::Pending).await;
        add_receipt(&db.pool, 2_500, ReceiptStatus::Rejected).await;
        add_expense(&db.pool, 3_000).await;
        db.pool
    }

    fn targets(received: f64, expense: f64) -> BalanceTargets {
        BalanceTargets {
            target_received: received,
            target_expense: expense,
        }
    }

    #[tokio::test]
    async fn test_empty_ledger_reads_zero_and_creates_singleton() {
        let db = DbService::in_memory().await.unwrap();
        let sheet = read_balances(&db.pool).await.unwrap();
        assert_eq!(sheet, BalanceSheet::default());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM balance_adjustment")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_scenario_mixed_statuses() {
        let pool = scenario_pool().await;
        let balances = read_balances(&pool).await.unwrap().to_balances();
        assert_eq!(balances.received, 100.0);
        assert_eq!(balances.expense, 30.0);
        assert_eq!(balances.total, 70.0);
        assert_eq!(balances.adjustments.received, 0.0);
        assert_eq!(balances.adjustments.expense, 0.0);
    }

    #[tokio::test]
    async fn test_scenario_target_received() {
        let pool = scenario_pool().await;
        let written = apply_targets(&pool, targets(500.0, 30.0)).await.unwrap();
        assert_eq!(written.received_adjustment, 40_000);
        assert_eq!(written.expense_adjustment, 0);
        assert_eq!(written.received, 50_000);

        let read = read_balances(&pool).await.unwrap().to_balances();
        assert_eq!(read.received, 500.0);
        assert_eq!(read.adjustments.received, 400.0);
        assert_eq!(read.total, 470.0);
    }

    #[tokio::test]
    async fn test_read_is_idempotent() {
        let pool = scenario_pool().await;
        apply_targets(&pool, targets(123.45, 67.89)).await.unwrap();
        let first = read_balances(&pool).await.unwrap();
        let second = read_balances(&pool).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_write_overwrites_not_accumulates() {
        let pool = scenario_pool().await;
        let once = apply_targets(&pool, targets(500.0, 80.0)).await.unwrap();
        let twice = apply_targets(&pool, targets(500.0, 80.0)).await.unwrap();
        assert_eq!(once.received_adjustment, twice.received_adjustment);
        assert_eq!(once.expense_adjustment, twice.expense_adjustment);
        assert_eq!(twice.received, 50_000);
        assert_eq!(twice.expense, 8_000);
    }

    #[tokio::test]
    async fn test_adjustment_drifts_with_new_approvals() {
        let db = DbService::in_memory().await.unwrap();
        apply_targets(&db.pool, targets(1000.0, 0.0)).await.unwrap();

        let id = add_receipt(&db.pool, 5_000, ReceiptStatus::Pending).await;
        receipt::decide(&db.pool, id, ReceiptStatus::Approved)
            .await
            .unwrap();

        let balances = read_balances(&db.pool).await.unwrap().to_balances();
        assert_eq!(balances.received, 1050.0);
    }

    #[tokio::test]
    async fn test_rejected_never_counts() {
        let db = DbService::in_memory().await.unwrap();
        let id = add_receipt(&db.pool, 50_000, ReceiptStatus::Pending).await;
        assert_eq!(read_balances(&db.pool).await.unwrap().received, 0);

        receipt::decide(&db.pool, id, ReceiptStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(read_balances(&db.pool).await.unwrap().received, 0);
    }

    #[tokio::test]
    async fn test_target_rounds_to_minor_unit() {
        let pool = scenario_pool().await;
        let sheet = apply_targets(&pool, targets(200.125, -0.125)).await.unwrap();
        assert_eq!(sheet.received, 20_013);
        assert_eq!(sheet.expense, -13);
        assert_eq!(sheet.expense_adjustment, -3_013);
    }

    #[tokio::test]
    async fn test_zero_targets_from_malformed_input() {
        let pool = scenario_pool().await;
        let parsed: BalanceTargets =
            serde_json::from_str(r#"{"targetReceived": "garbage"}"#).unwrap();
        let sheet = apply_targets(&pool, parsed).await.unwrap();
        assert_eq!(sheet.received, 0);
        assert_eq!(sheet.expense, 0);
        assert_eq!(sheet.received_adjustment, -10_000);
        assert_eq!(sheet.expense_adjustment, -3_000);
    }
}
