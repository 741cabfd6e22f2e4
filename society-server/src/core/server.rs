//! Server Implementation
//!
//! HTTP 服务器组装、启动和优雅关闭

use std::time::Duration;

use axum::{Router, extract::Request, middleware, middleware::Next, response::Response};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::require_auth;
use crate::core::{Result, ServerError, ServerState};

/// multipart 编码开销余量
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// 构建完整应用路由 (含全局中间件)
///
/// 层顺序 (外 → 内)：log_request → Trace → CORS → Timeout → BodyLimit → require_auth → 路由
pub fn build_app(state: &ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    let body_limit = state.config.max_upload_bytes.saturating_add(BODY_LIMIT_SLACK);

    api::router()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
        .with_state(state.clone())
}

/// 访问日志
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        target: "http_access",
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "HTTP request"
    );
    response
}

/// HTTP Server
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn run(&self) -> Result<()> {
        self.state.start_background_tasks();

        let app = build_app(&self.state);
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Society server listening on http://{}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}
