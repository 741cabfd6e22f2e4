//! 认证中间件
//!
//! 为会话认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, session};
use crate::core::ServerState;
use crate::security_log;

/// 无需登录的 API 路径
///
/// `/api/auth/me` 自行处理未登录情况 (返回 `user: null`)；
/// 附件下载由签名 URL 保护。
fn is_public_api_route(path: &str) -> bool {
    matches!(
        path,
        "/api/auth/signup" | "/api/auth/signin" | "/api/auth/admin-signin" | "/api/auth/me"
    ) || path.starts_with("/api/attachments/")
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头或 `tv_session` cookie 提取会话令牌并查库验证。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展 (`req.extensions_mut().insert(user)`)。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/health` 等)
/// - 注册/登录接口、`/api/auth/me`、`/api/attachments/*`
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无令牌 | 401 NotAuthenticated |
/// | 令牌未知或已过期 | 401 SessionInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let Some(token) = session::token_from_headers(req.headers()) else {
        security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
        return Err(AppError::unauthorized());
    };

    match session::resolve(state.pool(), &token).await? {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            security_log!("WARN", "auth_failed", uri = format!("{:?}", req.uri()));
            Err(AppError::session_invalid("Session is invalid or expired"))
        }
    }
}

/// 管理员中间件 - 要求管理员角色
///
/// 必须位于 [`require_auth`] 之后
///
/// # 错误
///
/// 非管理员返回 403 AdminRequired
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            username = user.name.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
