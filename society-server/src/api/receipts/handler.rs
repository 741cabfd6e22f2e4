//! Receipt API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use shared::models::{Receipt, ReceiptCreate, ReceiptStatus, ReceiptView};

use crate::api::OkResponse;
use crate::api::form::UploadForm;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, receipt};
use crate::ledger::money::{minor_to_major, parse_major};
use crate::storage::AttachmentKind;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_date, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn to_view(state: &ServerState, receipt: Receipt) -> ReceiptView {
    ReceiptView {
        amount: minor_to_major(receipt.amount_paise),
        attachment_url: state.attachment_url(receipt.attachment_path.as_deref()),
        receipt,
    }
}

/// Receipts visible to the caller, newest first
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<ReceiptView>>> {
    let receipts = if current.is_admin() {
        receipt::find_all(state.pool()).await?
    } else {
        receipt::find_for_member(state.pool(), current.id, current.rh_no.as_deref()).await?
    };
    Ok(Json(
        receipts.into_iter().map(|r| to_view(&state, r)).collect(),
    ))
}

/// Submit a receipt with its proof-of-payment upload
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ReceiptView>)> {
    let mut form = UploadForm::read(&mut multipart).await?;

    let name = form.required("name")?;
    let rh_no = form.required("rhNo")?;
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    validate_required_text(&rh_no, "rhNo", MAX_SHORT_TEXT_LEN)?;

    let amount_text = form.required("amount")?;
    let amount_paise = parse_major(&amount_text)
        .filter(|p| *p > 0)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ReceiptInvalidAmount,
                format!("Invalid receipt amount: {amount_text}"),
            )
        })?;

    let description = form.text("description");
    validate_optional_text(&description, "description", MAX_NOTE_LEN)?;
    let date = form.text("date").unwrap_or_else(shared::util::today_utc);
    validate_date(&date, "date")?;

    let file = form.take_file()?;
    let attachment_path = state
        .attachments
        .save(AttachmentKind::Receipt, &file.file_name, &file.data)
        .await?;

    let created = receipt::create(
        state.pool(),
        ReceiptCreate {
            name,
            rh_no,
            amount_paise,
            description,
            attachment_path: Some(attachment_path.clone()),
            date,
            member_id: current.member_id(),
        },
    )
    .await;

    let created = match created {
        Ok(r) => r,
        Err(e) => {
            state.attachments.delete(&attachment_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        receipt_id = created.id,
        amount_paise = created.amount_paise,
        rh_no = %created.rh_no,
        submitted_by = current.id,
        "Receipt submitted"
    );

    Ok((StatusCode::CREATED, Json(to_view(&state, created))))
}

async fn decide(
    state: &ServerState,
    current: &CurrentUser,
    id: i64,
    decision: ReceiptStatus,
) -> AppResult<Json<ReceiptView>> {
    let decided = receipt::decide(state.pool(), id, decision)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::ReceiptNotFound, msg),
            RepoError::Conflict(msg) => {
                AppError::with_message(ErrorCode::ReceiptAlreadyDecided, msg)
            }
            other => other.into(),
        })?;

    tracing::info!(
        receipt_id = decided.id,
        status = decided.status.as_str(),
        amount_paise = decided.amount_paise,
        decided_by = current.id,
        "Receipt decided"
    );

    Ok(Json(to_view(state, decided)))
}

pub async fn approve(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ReceiptView>> {
    decide(&state, &current, id, ReceiptStatus::Approved).await
}

pub async fn reject(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ReceiptView>> {
    decide(&state, &current, id, ReceiptStatus::Rejected).await
}

/// Delete a receipt; a missing id is not an error
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OkResponse>> {
    if let Some(removed) = receipt::delete(state.pool(), id).await? {
        if let Some(path) = removed.attachment_path.as_deref() {
            state.attachments.delete(path).await;
        }
        tracing::info!(
            receipt_id = removed.id,
            status = removed.status.as_str(),
            deleted_by = current.id,
            "Receipt deleted"
        );
    }
    Ok(Json(OkResponse::ok()))
}
