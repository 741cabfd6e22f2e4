use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct SignedQuery {
    pub expires: Option<i64>,
    pub sig: Option<String>,
}

pub async fn download(
    State(state): State<ServerState>,
    Path((subdir, name)): Path<(String, String)>,
    Query(query): Query<SignedQuery>,
) -> AppResult<impl IntoResponse> {
    let reference = format!("{subdir}/{name}");
    // 先校验路径，非法路径直接 400
    state.attachments.resolve(&reference)?;

    let (Some(expires), Some(sig)) = (query.expires, query.sig.as_deref()) else {
        return Err(AppError::with_message(
            ErrorCode::AttachmentLinkInvalid,
            "Link is missing its signature",
        ));
    };

    if let Err(e) = state
        .signer
        .verify(&reference, expires, sig, shared::util::now_millis())
    {
        security_log!(
            "WARN",
            "attachment_link_rejected",
            reference = reference.clone(),
            reason = e.to_string()
        );
        return Err(e.into());
    }

    let (data, mime) = state.attachments.read(&reference).await?;
    Ok((
        [
            (header::CONTENT_TYPE, mime),
            (header::CACHE_CONTROL, "private, max-age=300".to_string()),
        ],
        data,
    ))
}
