//! Balance API Handlers

use axum::{Json, extract::State};
use shared::models::{BalanceTargets, Balances};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::ledger;
use crate::utils::AppResult;

/// Effective received/expense totals with the stored adjustment applied
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Balances>> {
    let sheet = ledger::read_balances(state.pool()).await?;
    Ok(Json(sheet.to_balances()))
}

/// Overwrite the adjustment so the totals equal the given targets.
///
/// Malformed target values read as zero.
pub async fn adjust(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(targets): Json<BalanceTargets>,
) -> AppResult<Json<Balances>> {
    let sheet = ledger::apply_targets(state.pool(), targets).await?;
    tracing::info!(
        admin_id = current.id,
        received = sheet.received,
        expense = sheet.expense,
        "Balances adjusted"
    );
    Ok(Json(sheet.to_balances()))
}
