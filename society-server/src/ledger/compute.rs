//! Pure balance arithmetic, in minor units.
//!
//! received = Σ approved receipts + received adjustment
//! expense  = Σ expenses + expense adjustment
//! net      = received - expense
//!
//! The adjustment is a delta on top of the raw sums, never a pinned total:
//! approvals and expenses recorded after an admin write still move the
//! balances.

use shared::models::{AdjustmentAmounts, BalanceAdjustment, Balances};

use super::money::minor_to_major;

/// Raw aggregates straight from the store, before any adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerSums {
    pub approved_receipts: i64,
    pub expenses: i64,
}

/// Admin-declared effective totals, in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetTotals {
    pub received: i64,
    pub expense: i64,
}

/// Effective balances plus the deltas that produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BalanceSheet {
    pub received: i64,
    pub expense: i64,
    pub net: i64,
    pub received_adjustment: i64,
    pub expense_adjustment: i64,
}

impl BalanceSheet {
    /// Major-unit view for the API
    pub fn to_balances(&self) -> Balances {
        Balances {
            received: minor_to_major(self.received),
            expense: minor_to_major(self.expense),
            total: minor_to_major(self.net),
            adjustments: AdjustmentAmounts {
                received: minor_to_major(self.received_adjustment),
                expense: minor_to_major(self.expense_adjustment),
            },
        }
    }
}

pub fn compute(sums: LedgerSums, adjustment: &BalanceAdjustment) -> BalanceSheet {
    let received = sums
        .approved_receipts
        .saturating_add(adjustment.received_adjustment_paise);
    let expense = sums
        .expenses
        .saturating_add(adjustment.expense_adjustment_paise);
    BalanceSheet {
        received,
        expense,
        net: received.saturating_sub(expense),
        received_adjustment: adjustment.received_adjustment_paise,
        expense_adjustment: adjustment.expense_adjustment_paise,
    }
}

/// Deltas that make the effective totals equal `targets` against the
/// current raw sums. Returns `(received_adjustment, expense_adjustment)`.
pub fn back_solve(targets: TargetTotals, sums: LedgerSums) -> (i64, i64) {
    (
        targets.received.saturating_sub(sums.approved_receipts),
        targets.expense.saturating_sub(sums.expenses),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjustment(received: i64, expense: i64) -> BalanceAdjustment {
        BalanceAdjustment {
            id: 1,
            received_adjustment_paise: received,
            expense_adjustment_paise: expense,
            updated_at: 0,
        }
    }

    #[test]
    fn test_zero_adjustment_is_raw_sums() {
        let sums = LedgerSums {
            approved_receipts: 10_000,
            expenses: 3_000,
        };
        let sheet = compute(sums, &adjustment(0, 0));
        assert_eq!(sheet.received, 10_000);
        assert_eq!(sheet.expense, 3_000);
        assert_eq!(sheet.net, 7_000);
    }

    #[test]
    fn test_adjustment_added_to_sums() {
        let sums = LedgerSums {
            approved_receipts: 10_000,
            expenses: 3_000,
        };
        let sheet = compute(sums, &adjustment(40_000, -1_000));
        assert_eq!(sheet.received, 50_000);
        assert_eq!(sheet.expense, 2_000);
        assert_eq!(sheet.net, 48_000);
        assert_eq!(sheet.received_adjustment, 40_000);
    }

    #[test]
    fn test_negative_totals_allowed() {
        let sheet = compute(LedgerSums::default(), &adjustment(-500, 0));
        assert_eq!(sheet.received, -500);
        assert_eq!(sheet.net, -500);
    }

    #[test]
    fn test_back_solve_hits_target() {
        let sums = LedgerSums {
            approved_receipts: 10_000,
            expenses: 3_000,
        };
        let targets = TargetTotals {
            received: 50_000,
            expense: 0,
        };
        let (r, e) = back_solve(targets, sums);
        assert_eq!((r, e), (40_000, -3_000));

        let sheet = compute(sums, &adjustment(r, e));
        assert_eq!(sheet.received, targets.received);
        assert_eq!(sheet.expense, targets.expense);
    }

    #[test]
    fn test_to_balances_major_units() {
        let sheet = BalanceSheet {
            received: 50_000,
            expense: 3_050,
            net: 46_950,
            received_adjustment: 40_000,
            expense_adjustment: 0,
        };
        let b = sheet.to_balances();
        assert_eq!(b.received, 500.0);
        assert_eq!(b.expense, 30.5);
        assert_eq!(b.total, 469.5);
        assert_eq!(b.adjustments.received, 400.0);
        assert_eq!(b.adjustments.expense, 0.0);
    }
}
