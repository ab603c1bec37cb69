//! # Relay Notification
//!
//! 분류/포맷된 cTrader 알림을 텔레그램으로 전달합니다.
//!
//! 요청당 한 번만 전송하며 재시도하지 않습니다. 전송 결과는
//! [`NotificationError`]로 구분되어 API 계층에서 응답 코드로 변환됩니다.

pub mod telegram;
pub mod types;

pub use telegram::*;
pub use types::*;
