//! HTTP 라우트.
//!
//! - `POST /webhook/ctrader` (및 기존 경로 `/.netlify/functions/ctrader`)
//! - `GET /health`, `GET /health/ready`

pub mod health;
pub mod webhook;

pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use webhook::{relay_webhook, WebhookAccepted};

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, middleware, routing::any, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::error::panic_response;
use crate::middleware::metrics_layer;
use crate::state::AppState;

/// 웹훅 경로.
pub const WEBHOOK_PATH: &str = "/webhook/ctrader";

/// 기존 배포와 호환되는 웹훅 경로.
pub const LEGACY_WEBHOOK_PATH: &str = "/.netlify/functions/ctrader";

/// 요청 본문 최대 크기 (6 MiB, 기존 서버리스 함수의 페이로드 한도).
///
/// 초과하면 본문을 읽지 못해 `server_error`로 응답합니다.
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// 웹훅과 헬스 체크 라우터 생성.
///
/// 웹훅 경로는 모든 메서드를 받아 `POST`가 아니면 JSON 405로 응답합니다.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, any(relay_webhook))
        .route(LEGACY_WEBHOOK_PATH, any(relay_webhook))
        .nest("/health", health_router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(metrics_layer))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}
