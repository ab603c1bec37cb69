//! 헬스 체크 endpoint.
//!
//! 서버 상태 확인을 위한 헬스 체크 엔드포인트를 제공합니다.
//! 설정 누락은 웹훅 처리 시점에 보고되므로 readiness도 항상 200을 반환하고
//! `status`로만 구분합니다.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use relay_core::TelegramTarget;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,

    /// 서버 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 개별 컴포넌트 상태
    pub components: ComponentHealth,
}

/// 개별 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Zone 봇 (`TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`)
    pub zone_bot: ComponentStatus,

    /// Cross 봇 (`TELEGRAM_BOT_TOKEN1` / `TELEGRAM_CHAT_ID1`)
    pub cross_bot: ComponentStatus,

    /// 설정된 웹훅 시크릿 개수
    pub secrets: usize,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// 상태 ("configured" | "not_configured")
    pub status: String,

    /// 추가 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    /// 설정 완료 상태.
    pub fn configured() -> Self {
        Self {
            status: "configured".to_string(),
            message: None,
        }
    }

    /// 미설정 상태 (누락된 환경 변수 안내 포함).
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self {
            status: "not_configured".to_string(),
            message: Some(message.into()),
        }
    }

    fn from_target(target: &TelegramTarget) -> Self {
        match target.resolve() {
            Ok(_) => Self::configured(),
            Err(missing) => Self::not_configured(format!("missing {}", missing.join(", "))),
        }
    }
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// 두 봇 대상과 웹훅 시크릿의 설정 여부를 보고합니다.
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = &state.config;

    let healthy = config.zone_target.is_configured()
        && config.cross_target.is_configured()
        && !config.secrets.is_empty();

    let status = if healthy { "healthy" } else { "degraded" };

    let response = HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        components: ComponentHealth {
            zone_bot: ComponentStatus::from_target(&config.zone_target),
            cross_bot: ComponentStatus::from_target(&config.cross_target),
            secrets: config.secrets.len(),
        },
    };

    (StatusCode::OK, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use relay_core::{DispatchTarget, FormattedMessage, RelayConfig};
    use relay_notification::{NotificationResult, NotificationSender};
    use tower::ServiceExt;

    struct NoopSender;

    #[async_trait]
    impl NotificationSender for NoopSender {
        async fn send(
            &self,
            _target: DispatchTarget<'_>,
            _message: &FormattedMessage,
        ) -> NotificationResult<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "noop"
        }
    }

    fn state(pairs: &[(&str, &str)]) -> Arc<AppState> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = RelayConfig::from_source(vars).unwrap();
        Arc::new(AppState::new(config, Arc::new(NoopSender)))
    }

    async fn ready_json(state: Arc<AppState>) -> serde_json::Value {
        let app = Router::new()
            .route("/health/ready", get(health_ready))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        let app = Router::new().route("/health", get(health_check));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_healthy() {
        let json = ready_json(state(&[
            ("TELEGRAM_BOT_TOKEN", "zone-token"),
            ("TELEGRAM_CHAT_ID", "1"),
            ("TELEGRAM_BOT_TOKEN1", "cross-token"),
            ("TELEGRAM_CHAT_ID1", "2"),
            ("WEBHOOK_SECRET", "s3cret"),
        ]))
        .await;

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["components"]["zone_bot"]["status"], "configured");
        assert_eq!(json["components"]["cross_bot"]["status"], "configured");
        assert_eq!(json["components"]["secrets"], 1);
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn test_health_ready_degraded_without_cross_bot() {
        let json = ready_json(state(&[
            ("TELEGRAM_BOT_TOKEN", "zone-token"),
            ("TELEGRAM_CHAT_ID", "1"),
            ("WEBHOOK_SECRET", "s3cret"),
        ]))
        .await;

        assert_eq!(json["status"], "degraded");
        assert_eq!(json["components"]["zone_bot"]["status"], "configured");
        assert_eq!(json["components"]["cross_bot"]["status"], "not_configured");
        assert_eq!(
            json["components"]["cross_bot"]["message"],
            "missing TELEGRAM_BOT_TOKEN1, TELEGRAM_CHAT_ID1"
        );
    }

    #[tokio::test]
    async fn test_health_ready_degraded_without_secrets() {
        let json = ready_json(state(&[
            ("TELEGRAM_BOT_TOKEN", "zone-token"),
            ("TELEGRAM_CHAT_ID", "1"),
            ("TELEGRAM_BOT_TOKEN1", "cross-token"),
            ("TELEGRAM_CHAT_ID1", "2"),
        ]))
        .await;

        assert_eq!(json["status"], "degraded");
        assert_eq!(json["components"]["secrets"], 0);
    }
}
