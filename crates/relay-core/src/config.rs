//! 설정 관리.
//!
//! 프로세스 시작 시 환경 변수에서 한 번 읽어 [`RelayConfig`]로 조립하고,
//! 이후에는 핸들러에 명시적으로 전달합니다.
//!
//! # 환경 변수
//!
//! | 변수 | 용도 |
//! |------|------|
//! | `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID` | Zone 봇 대상 |
//! | `TELEGRAM_BOT_TOKEN1` / `TELEGRAM_CHAT_ID1` | Cross 봇 대상 |
//! | `WEBHOOK_SECRET` | 단일 웹훅 시크릿 |
//! | `WEBHOOK_SECRETS` | 쉼표 구분 웹훅 시크릿 목록 |
//! | `RELAY_HOST` / `RELAY_PORT` | 바인딩 주소 (기본값 `127.0.0.1:3000`) |
//! | `TELEGRAM_API_BASE` | 텔레그램 API 주소 (기본값 `https://api.telegram.org`) |
//! | `RUST_LOG` / `LOG_FORMAT` | 로그 레벨 / 형식 |

use serde::Deserialize;
use std::net::SocketAddr;

use crate::domain::{AlertFamily, AllowedSecrets, TelegramTarget};
use crate::error::{RelayError, RelayResult};
use crate::logging::{LogConfig, LogFormat};

/// 기본 텔레그램 API 주소.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// 설정에서 읽는 환경 변수 목록.
const RELAY_ENV_VARS: [&str; 11] = [
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_CHAT_ID",
    "TELEGRAM_BOT_TOKEN1",
    "TELEGRAM_CHAT_ID1",
    "WEBHOOK_SECRET",
    "WEBHOOK_SECRETS",
    "RELAY_HOST",
    "RELAY_PORT",
    "TELEGRAM_API_BASE",
    "RUST_LOG",
    "LOG_FORMAT",
];

/// 환경 변수 원본 값. `config::Environment`가 키를 소문자로 바꿉니다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    telegram_bot_token: Option<String>,
    telegram_chat_id: Option<String>,
    telegram_bot_token1: Option<String>,
    telegram_chat_id1: Option<String>,
    webhook_secret: Option<String>,
    webhook_secrets: Option<String>,
    relay_host: Option<String>,
    relay_port: Option<String>,
    telegram_api_base: Option<String>,
    rust_log: Option<String>,
    log_format: Option<String>,
}

/// 서버 설정.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 릴레이 설정.
#[derive(Debug)]
pub struct RelayConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 로깅 설정
    pub logging: LogConfig,
    /// Zone 봇 대상 (`bot0`)
    pub zone_target: TelegramTarget,
    /// Cross 봇 대상 (`bot1`)
    pub cross_target: TelegramTarget,
    /// 허용된 웹훅 시크릿
    pub secrets: AllowedSecrets,
    /// 텔레그램 API 주소
    pub telegram_api_base: String,
}

impl RelayConfig {
    /// 프로세스 환경 변수에서 설정을 로드합니다.
    pub fn from_env() -> RelayResult<Self> {
        let vars = std::env::vars()
            .filter(|(key, _)| RELAY_ENV_VARS.contains(&key.as_str()))
            .collect::<config::Map<String, String>>();
        Self::from_source(vars)
    }

    /// 주어진 변수 맵에서 설정을 로드합니다.
    pub fn from_source(vars: config::Map<String, String>) -> RelayResult<Self> {
        let raw: RawSettings = config::Config::builder()
            .add_source(config::Environment::default().source(Some(vars)))
            .build()?
            .try_deserialize()?;

        let format = match raw.log_format.as_deref() {
            Some(format) if !format.is_empty() => format.parse::<LogFormat>()?,
            _ => LogFormat::default(),
        };
        let level = raw
            .rust_log
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info".to_string());

        let defaults = ServerConfig::default();
        let port = match raw.relay_port.as_deref() {
            Some(port) if !port.is_empty() => port
                .parse::<u16>()
                .map_err(|e| RelayError::Config(format!("RELAY_PORT: {e}")))?,
            _ => defaults.port,
        };

        Ok(Self {
            server: ServerConfig {
                host: raw
                    .relay_host
                    .filter(|s| !s.is_empty())
                    .unwrap_or(defaults.host),
                port,
            },
            logging: LogConfig { level, format },
            zone_target: TelegramTarget::new(
                raw.telegram_bot_token,
                raw.telegram_chat_id,
                "TELEGRAM_BOT_TOKEN",
                "TELEGRAM_CHAT_ID",
            ),
            cross_target: TelegramTarget::new(
                raw.telegram_bot_token1,
                raw.telegram_chat_id1,
                "TELEGRAM_BOT_TOKEN1",
                "TELEGRAM_CHAT_ID1",
            ),
            secrets: AllowedSecrets::from_settings(
                raw.webhook_secret.as_deref(),
                raw.webhook_secrets.as_deref(),
            ),
            telegram_api_base: raw
                .telegram_api_base
                .filter(|s| !s.is_empty())
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string()),
        })
    }

    /// 알림 유형에 해당하는 텔레그램 대상.
    pub fn target_for(&self, family: AlertFamily) -> &TelegramTarget {
        match family {
            AlertFamily::Zone => &self.zone_target,
            AlertFamily::Cross => &self.cross_target,
        }
    }
}
