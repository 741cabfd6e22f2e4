//! Authentication Handlers
//!
//! Handles signup, signin, admin signin and signout

use std::time::Duration;

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, http::header};
use shared::models::{
    AdminSigninRequest, AuthResponse, SigninRequest, SignupRequest, User, UserCreate, UserInfo,
    UserRole,
};

use crate::api::OkResponse;
use crate::auth::{CurrentUser, hash_password, session, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, MIN_PASSWORD_LEN, non_empty,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

type SessionResponse = (StatusCode, [(header::HeaderName, String); 1], Json<AuthResponse>);

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Open a session for `user` and build the response carrying its cookie.
async fn start_session(
    state: &ServerState,
    user: &User,
    status: StatusCode,
) -> AppResult<SessionResponse> {
    let ttl = state.session_ttl_millis();
    let (token, expires_at) = session::open(state.pool(), user.id, ttl).await?;
    let cookie = session::session_cookie(&token, ttl / 1000, state.config.is_production());

    tracing::info!(
        user_id = user.id,
        username = %user.name,
        role = user.role.as_str(),
        "Session opened"
    );

    Ok((
        status,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            token,
            expires_at,
            user: UserInfo::from(user),
        }),
    ))
}

/// Member self-registration
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<SessionResponse> {
    let name = req.name.trim().to_string();
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if req.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    let email = non_empty(req.email);
    let rh_no = non_empty(req.rh_no);
    validate_optional_text(&email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&rh_no, "rhNo", MAX_SHORT_TEXT_LEN)?;

    let created = user::create(
        state.pool(),
        UserCreate {
            name: name.clone(),
            email,
            password_hash: hash(&req.password)?,
            role: UserRole::Member,
            rh_no,
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::NameAlreadyInUse),
        other => other.into(),
    })?;

    tracing::info!(user_id = created.id, username = %created.name, "Member signed up");
    start_session(&state, &created, StatusCode::CREATED).await
}

/// Name + password signin
pub async fn signin(
    State(state): State<ServerState>,
    Json(req): Json<SigninRequest>,
) -> AppResult<SessionResponse> {
    let name = req.name.trim();
    let found = user::find_by_name(state.pool(), name).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent name enumeration
    let found = match found {
        Some(u) if verify_password(&req.password, &u.password_hash) => u,
        Some(_) => {
            security_log!("WARN", "signin_failed", username = name.to_string(), reason = "bad_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "signin_failed", username = name.to_string(), reason = "unknown_user");
            return Err(AppError::invalid_credentials());
        }
    };

    start_session(&state, &found, StatusCode::OK).await
}

/// Administrator signin against the configured credentials
///
/// The ADMIN account is created on the first successful admin signin.
pub async fn admin_signin(
    State(state): State<ServerState>,
    Json(req): Json<AdminSigninRequest>,
) -> AppResult<SessionResponse> {
    let username = req.username.trim();

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if username != state.config.admin_username || req.password != state.config.admin_password {
        security_log!("WARN", "admin_signin_failed", username = username.to_string());
        return Err(AppError::invalid_credentials());
    }

    let admin = match user::find_by_name(state.pool(), username).await? {
        Some(existing) if existing.role == UserRole::Admin => existing,
        Some(existing) => {
            security_log!(
                "WARN",
                "admin_signin_denied",
                user_id = existing.id,
                username = username.to_string()
            );
            return Err(AppError::permission_denied(
                "Account is not an administrator",
            ));
        }
        None => {
            let created = user::create(
                state.pool(),
                UserCreate {
                    name: username.to_string(),
                    email: None,
                    password_hash: hash(&req.password)?,
                    role: UserRole::Admin,
                    rh_no: None,
                },
            )
            .await?;
            tracing::info!(user_id = created.id, username = %created.name, "Administrator account created");
            created
        }
    };

    start_session(&state, &admin, StatusCode::OK).await
}

/// Current user info, or `null` for anonymous callers
pub async fn me(
    State(state): State<ServerState>,
    current: Option<CurrentUser>,
) -> AppResult<Json<Option<UserInfo>>> {
    let Some(current) = current else {
        return Ok(Json(None));
    };
    let info = user::find_by_id(state.pool(), current.id)
        .await?
        .map(|u| UserInfo::from(&u));
    Ok(Json(info))
}

/// Close the caller's session and clear the cookie
pub async fn signout(
    State(state): State<ServerState>,
    current: CurrentUser,
    headers: HeaderMap,
) -> AppResult<([(header::HeaderName, String); 1], Json<OkResponse>)> {
    if let Some(token) = session::token_from_headers(&headers) {
        session::close(state.pool(), &token).await?;
    }

    tracing::info!(user_id = current.id, username = %current.name, "User signed out");

    Ok((
        [(header::SET_COOKIE, session::clear_session_cookie())],
        Json(OkResponse::ok()),
    ))
}
