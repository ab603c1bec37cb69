//! 웹훅 응답 에러 타입.
//!
//! 모든 실패 분기는 `ok: false`와 기계 판독용 `error` 코드를 가진 JSON을 반환합니다.
//!
//! | 코드 | HTTP | 추가 필드 |
//! |------|------|-----------|
//! | `method_not_allowed` | 405 | |
//! | `unauthorized` | 401 | |
//! | `invalid_json` | 400 | |
//! | `missing_env_vars` | 500 | `missing`, `target` |
//! | `telegram_failed` | 500 | `details` (텔레그램 응답 본문) |
//! | `server_error` | 500 | `details` (에러 설명) |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::AlertFamily;
use relay_notification::NotificationError;
use serde::Serialize;

/// 웹훅 에러 응답 본문.
///
/// # 예시
///
/// ```json
/// {
///   "ok": false,
///   "error": "missing_env_vars",
///   "missing": ["TELEGRAM_BOT_TOKEN1"],
///   "target": "threshold_bot"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct WebhookErrorResponse {
    /// 항상 `false`
    pub ok: bool,
    /// 에러 코드
    pub error: &'static str,
    /// 추가 에러 상세 정보
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// 누락된 환경 변수 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<&'static str>>,
    /// 설정이 누락된 대상 봇
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static str>,
}

/// 웹훅 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("허용되지 않은 HTTP 메서드")]
    MethodNotAllowed,

    #[error("웹훅 시크릿이 없거나 유효하지 않음")]
    Unauthorized,

    #[error("요청 본문이 유효한 JSON이 아님")]
    InvalidJson,

    #[error("환경 변수 누락: {}", .missing.join(", "))]
    MissingEnvVars {
        missing: Vec<&'static str>,
        family: AlertFamily,
    },

    #[error("텔레그램 전송 실패: {0}")]
    TelegramFailed(String),

    #[error("서버 에러: {0}")]
    ServerError(String),
}

impl WebhookError {
    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidJson => StatusCode::BAD_REQUEST,
            Self::MissingEnvVars { .. } | Self::TelegramFailed(_) | Self::ServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 응답 `error` 코드.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Unauthorized => "unauthorized",
            Self::InvalidJson => "invalid_json",
            Self::MissingEnvVars { .. } => "missing_env_vars",
            Self::TelegramFailed(_) => "telegram_failed",
            Self::ServerError(_) => "server_error",
        }
    }

    /// 응답 본문.
    pub fn to_response_body(&self) -> WebhookErrorResponse {
        let mut body = WebhookErrorResponse {
            ok: false,
            error: self.code(),
            details: None,
            missing: None,
            target: None,
        };

        match self {
            Self::MissingEnvVars { missing, family } => {
                body.missing = Some(missing.clone());
                body.target = Some(family.config_target());
            }
            Self::TelegramFailed(details) | Self::ServerError(details) => {
                body.details = Some(details.clone());
            }
            Self::MethodNotAllowed | Self::Unauthorized | Self::InvalidJson => {}
        }

        body
    }
}

impl From<NotificationError> for WebhookError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::SendFailed { .. } => Self::TelegramFailed(err.details()),
            NotificationError::NetworkError(_) => Self::ServerError(err.details()),
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_response_body())).into_response()
    }
}

/// 처리 중 패닉이 발생했을 때의 응답.
///
/// `CatchPanicLayer`에 연결되어 패닉도 `server_error` JSON으로 응답합니다.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(details = %details, "Server error");
    WebhookError::ServerError(details).into_response()
}
