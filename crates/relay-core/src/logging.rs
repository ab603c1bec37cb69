//! tracing 기반 로깅 초기화.
//!
//! 레벨 필터는 `RUST_LOG`, 출력 형식은 `LOG_FORMAT`으로 정합니다.
//! 운영 환경에서는 로그 수집기를 위해 `json`을 사용합니다.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

use crate::error::{RelayError, RelayResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄로 보기 좋게 출력 (개발용)
    #[default]
    Pretty,
    /// 한 줄에 JSON 객체 하나
    Json,
    /// 한 줄 요약 형식
    Compact,
}

impl LogFormat {
    /// `LOG_FORMAT` 값 표기.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(RelayError::Config(format!(
                "LOG_FORMAT must be pretty, json or compact (got {s:?})"
            ))),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// 기본 필터 (`RUST_LOG` 문법, 예: `info,relay_api=debug`)
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// 필터 문자열을 `EnvFilter`로 변환합니다.
fn build_filter(level: &str) -> RelayResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| RelayError::Logging(format!("invalid log filter {level:?}: {e}")))
}

/// 전역 tracing subscriber를 설치합니다.
///
/// 프로세스 환경에 `RUST_LOG`가 유효하게 설정되어 있으면 그 값이 우선합니다.
///
/// # Errors
/// 필터 문자열이 잘못되었거나 subscriber가 이미 설치되어 있으면
/// `RelayError::Logging`을 반환합니다.
pub fn init_logging(config: &LogConfig) -> RelayResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.level)?,
    };

    let output: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => subscriber_fmt::layer().pretty().boxed(),
        LogFormat::Json => subscriber_fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .boxed(),
        LogFormat::Compact => subscriber_fmt::layer().compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .map_err(|e| RelayError::Logging(e.to_string()))?;

    tracing::info!(format = %config.format, filter = %config.level, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);

        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn test_log_format_display_matches_env_value() {
        for format in [LogFormat::Pretty, LogFormat::Json, LogFormat::Compact] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_filter_accepts_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("info,relay_api=debug,tower_http=warn").is_ok());
    }

    #[test]
    fn test_filter_rejects_bad_level() {
        let err = build_filter("relay_api=loud").unwrap_err();
        assert!(matches!(err, RelayError::Logging(_)));
    }
}
