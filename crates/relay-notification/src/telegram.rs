//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API `sendMessage`로 평문 메시지를 전송합니다.

use async_trait::async_trait;
use relay_core::{DispatchTarget, FormattedMessage, DEFAULT_TELEGRAM_API_BASE};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::types::{NotificationError, NotificationResult, NotificationSender};

/// `sendMessage` 요청 본문.
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// 텔레그램 알림 전송기.
///
/// 봇 토큰과 채팅 ID는 요청마다 [`DispatchTarget`]으로 전달되므로
/// 하나의 전송기로 Zone/Cross 두 봇을 모두 처리합니다.
pub struct TelegramSender {
    client: reqwest::Client,
    api_base: String,
}

impl TelegramSender {
    /// 주어진 API 주소로 전송기를 생성합니다.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    /// 기존 HTTP 클라이언트를 재사용해 전송기를 생성합니다.
    pub fn with_client(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn send_message_url(&self, bot_token: &SecretString) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base,
            bot_token.expose_secret()
        )
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, target: DispatchTarget<'_>, text: &str) -> NotificationResult<()> {
        let url = self.send_message_url(target.bot_token);
        let params = SendMessageRequest {
            chat_id: target.chat_id,
            text,
        };

        debug!(chat_id = %target.chat_id, "Sending Telegram message");

        let response = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(|e| NotificationError::NetworkError(e.without_url()))?;

        if response.status().is_success() {
            info!(chat_id = %target.chat_id, "Telegram notification sent successfully");
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| NotificationError::NetworkError(e.without_url()))?;

            error!(status = %status, body = %body, "Telegram request failed");
            Err(NotificationError::SendFailed {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl Default for TelegramSender {
    fn default() -> Self {
        Self::new(DEFAULT_TELEGRAM_API_BASE)
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send(
        &self,
        target: DispatchTarget<'_>,
        message: &FormattedMessage,
    ) -> NotificationResult<()> {
        self.send_message(target, message.as_str()).await
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
