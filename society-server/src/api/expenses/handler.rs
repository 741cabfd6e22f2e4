//! Expense API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use shared::models::{Expense, ExpenseCreate, ExpenseView};

use crate::api::OkResponse;
use crate::api::form::UploadForm;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::expense;
use crate::ledger::money::{minor_to_major, parse_major};
use crate::storage::AttachmentKind;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_date, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn to_view(state: &ServerState, expense: Expense) -> ExpenseView {
    ExpenseView {
        amount: minor_to_major(expense.amount_paise),
        attachment_url: state.attachment_url(expense.attachment_path.as_deref()),
        expense,
    }
}

/// All expenses, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ExpenseView>>> {
    let expenses = expense::find_all(state.pool()).await?;
    Ok(Json(
        expenses.into_iter().map(|e| to_view(&state, e)).collect(),
    ))
}

/// Record an expense with its bill/voucher upload
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ExpenseView>)> {
    let mut form = UploadForm::read(&mut multipart).await?;

    let name = form.required("name")?;
    validate_required_text(&name, "name", MAX_NAME_LEN)?;

    let amount_text = form.required("amount")?;
    let amount_paise = parse_major(&amount_text)
        .filter(|p| *p > 0)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ExpenseInvalidAmount,
                format!("Invalid expense amount: {amount_text}"),
            )
        })?;

    let cheque_no = form.text("chequeNo");
    validate_optional_text(&cheque_no, "chequeNo", MAX_SHORT_TEXT_LEN)?;
    let description = form.text("description");
    validate_optional_text(&description, "description", MAX_NOTE_LEN)?;
    let date = form.text("date").unwrap_or_else(shared::util::today_utc);
    validate_date(&date, "date")?;

    let file = form.take_file()?;
    let attachment_path = state
        .attachments
        .save(AttachmentKind::Expense, &file.file_name, &file.data)
        .await?;

    let created = match expense::create(
        state.pool(),
        ExpenseCreate {
            name,
            amount_paise,
            description,
            cheque_no,
            attachment_path: Some(attachment_path.clone()),
            date,
        },
    )
    .await
    {
        Ok(e) => e,
        Err(e) => {
            state.attachments.delete(&attachment_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        expense_id = created.id,
        amount_paise = created.amount_paise,
        recorded_by = current.id,
        "Expense recorded"
    );

    Ok((StatusCode::CREATED, Json(to_view(&state, created))))
}

/// Delete an expense; a missing id is not an error
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OkResponse>> {
    if let Some(removed) = expense::delete(state.pool(), id).await? {
        if let Some(path) = removed.attachment_path.as_deref() {
            state.attachments.delete(path).await;
        }
        tracing::info!(expense_id = removed.id, deleted_by = current.id, "Expense deleted");
    }
    Ok(Json(OkResponse::ok()))
}
