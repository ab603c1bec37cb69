//! 애플리케이션 상태 관리.
//!
//! 모든 핸들러가 공유하는 상태를 정의합니다. 설정은 시작 시 한 번 로드되고
//! 이후 읽기 전용으로 사용됩니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use relay_core::RelayConfig;
use relay_notification::NotificationSender;

/// 애플리케이션 공유 상태.
pub struct AppState {
    /// 릴레이 설정 (대상 봇, 시크릿)
    pub config: RelayConfig,

    /// 텔레그램 전송기
    pub sender: Arc<dyn NotificationSender>,

    /// 서버 버전
    pub version: String,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(config: RelayConfig, sender: Arc<dyn NotificationSender>) -> Self {
        Self {
            config,
            sender,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("sender", &self.sender.name())
            .field("version", &self.version)
            .field("started_at", &self.started_at)
            .finish()
    }
}
