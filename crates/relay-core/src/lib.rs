//! # Relay Core
//!
//! cTrader 웹훅 릴레이의 핵심 도메인 모델 및 로직을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 웹훅 페이로드 모델 (`AlertPayload`)
//! - 알림 유형 분류 (Zone / Cross)
//! - 텔레그램 메시지 포맷팅
//! - 공유 시크릿 검증
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
