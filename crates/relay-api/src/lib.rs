//! cTrader 웹훅 릴레이 HTTP 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 웹훅 엔드포인트
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: 웹훅 및 헬스 체크 엔드포인트
//! - [`error`]: 웹훅 에러 응답
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어

pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{WebhookError, WebhookErrorResponse};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::*;
pub use state::AppState;
