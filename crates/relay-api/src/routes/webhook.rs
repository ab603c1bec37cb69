//! cTrader 웹훅 endpoint.
//!
//! 요청 한 건을 다음 순서로 처리합니다:
//! 1. 메서드 확인 (`POST`만 허용)
//! 2. `x-webhook-secret` 헤더 검증
//! 3. JSON 본문 디코딩
//! 4. Zone / Cross 분류
//! 5. 대상 봇 설정 확인 후 메시지 포맷팅
//! 6. 텔레그램으로 한 번 전송 (재시도 없음)

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method},
    Json,
};
use relay_core::{classify, format_message, AlertFamily, AlertPayload, WEBHOOK_SECRET_HEADER};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::WebhookError;
use crate::metrics::{record_alert, OUTCOME_DELIVERED};
use crate::state::AppState;

/// 전송 성공 응답.
///
/// # 예시
///
/// ```json
/// { "ok": true, "type": "zone_bot", "telegram_target": "bot0" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAccepted {
    /// 항상 `true`
    pub ok: bool,
    /// 알림 유형 (`zone_bot` | `cross_bot`)
    #[serde(rename = "type")]
    pub alert_type: &'static str,
    /// 전송에 사용한 봇 (`bot0` | `bot1`)
    pub telegram_target: &'static str,
}

impl From<AlertFamily> for WebhookAccepted {
    fn from(family: AlertFamily) -> Self {
        Self {
            ok: true,
            alert_type: family.response_type(),
            telegram_target: family.telegram_target(),
        }
    }
}

/// cTrader 알림 수신.
///
/// POST /webhook/ctrader
pub async fn relay_webhook(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<WebhookAccepted>, WebhookError> {
    info!(method = %method, "Webhook received");

    if method != Method::POST {
        warn!(method = %method, "Rejected non-POST webhook request");
        return Err(WebhookError::MethodNotAllowed);
    }

    let presented = headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    if !state.config.secrets.verify(presented) {
        warn!(
            header_present = presented.is_some(),
            "Rejected webhook with invalid secret"
        );
        return Err(WebhookError::Unauthorized);
    }

    let body = body.map_err(|e| {
        error!(error = %e, "Failed to read webhook body");
        WebhookError::ServerError(e.body_text())
    })?;

    let payload = AlertPayload::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Webhook body is not valid JSON");
        WebhookError::InvalidJson
    })?;

    let family = classify(&payload);
    info!(family = %family, symbol = %payload.symbol, "Webhook payload classified");
    debug!(payload = ?payload, "Webhook payload parsed");

    match dispatch(&state, &payload, family).await {
        Ok(()) => {
            record_alert(family, OUTCOME_DELIVERED);
            Ok(Json(WebhookAccepted::from(family)))
        }
        Err(err) => {
            record_alert(family, err.code());
            Err(err)
        }
    }
}

/// 대상 봇을 확인하고 메시지를 전송합니다.
async fn dispatch(
    state: &AppState,
    payload: &AlertPayload,
    family: AlertFamily,
) -> Result<(), WebhookError> {
    let target = state
        .config
        .target_for(family)
        .resolve()
        .map_err(|missing| {
            error!(
                family = %family,
                missing = ?missing,
                "Telegram target is not configured"
            );
            WebhookError::MissingEnvVars { missing, family }
        })?;

    let message = format_message(payload, family);
    debug!(
        family = %family,
        length = message.utf16_len(),
        message = %message,
        "Formatted Telegram message"
    );

    state.sender.send(target, &message).await.map_err(|e| {
        error!(family = %family, sender = state.sender.name(), error = %e, "Telegram dispatch failed");
        WebhookError::from(e)
    })?;

    info!(family = %family, "Alert relayed to Telegram");
    Ok(())
}
