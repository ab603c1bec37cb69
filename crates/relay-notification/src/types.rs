//! 알림 전송 타입 및 trait 정의.

use async_trait::async_trait;
use relay_core::{DispatchTarget, FormattedMessage};

/// 알림 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 알림 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// 텔레그램이 실패 응답을 반환함 (원본 응답 본문 포함)
    #[error("알림 전송 실패: HTTP {status}: {body}")]
    SendFailed { status: u16, body: String },

    /// 요청 자체가 실패함 (연결, TLS, 응답 읽기 등)
    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl NotificationError {
    /// 응답 `details`에 넣을 값.
    ///
    /// 텔레그램 실패는 원본 응답 본문, 네트워크 실패는 에러 설명입니다.
    pub fn details(&self) -> String {
        match self {
            Self::SendFailed { body, .. } => body.clone(),
            Self::NetworkError(e) => e.to_string(),
        }
    }
}

/// 알림 전송기 trait.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 메시지를 대상 채팅으로 한 번 전송합니다.
    async fn send(
        &self,
        target: DispatchTarget<'_>,
        message: &FormattedMessage,
    ) -> NotificationResult<()>;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_failed_details_is_raw_body() {
        let err = NotificationError::SendFailed {
            status: 400,
            body: r#"{"ok":false,"description":"Bad Request: chat not found"}"#.to_string(),
        };
        assert_eq!(
            err.details(),
            r#"{"ok":false,"description":"Bad Request: chat not found"}"#
        );
        assert!(err.to_string().contains("HTTP 400"));
    }
}
