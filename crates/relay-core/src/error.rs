//! 릴레이 에러 타입.
//!
//! 이 모듈은 릴레이 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 릴레이 에러.
#[derive(Debug, Error)]
pub enum RelayError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 요청 본문이 유효한 JSON이 아님
    #[error("잘못된 JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// 로깅 초기화 에러
    #[error("로깅 에러: {0}")]
    Logging(String),
}

/// 릴레이 작업을 위한 Result 타입.
pub type RelayResult<T> = Result<T, RelayError>;

impl From<config::ConfigError> for RelayError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RelayError::Config("RELAY_PORT".to_string());
        assert_eq!(err.to_string(), "설정 에러: RELAY_PORT");
    }

    #[test]
    fn test_invalid_json_from_serde() {
        let err: RelayError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, RelayError::InvalidJson(_)));
    }
}
