//! 페이로드 분류.
//!
//! 하나의 웹훅 엔드포인트로 두 종류의 cTrader 봇이 알림을 보냅니다.
//! 페이로드 모양으로 어느 봇인지 판별하고, 그에 따라 메시지 형식과
//! 전송 대상 텔레그램 봇이 결정됩니다.

use std::fmt;

use super::payload::AlertPayload;

/// Cross 봇을 나타내는 라인 이름.
pub const CROSS_LINE: &str = "slow_ma_of_rsi";

/// Cross 봇의 이벤트 유형.
pub const CROSS_EVENT_TYPES: [&str; 2] = ["CROSS_UP", "CROSS_DOWN"];

/// 알림 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertFamily {
    /// 세션 박스(Zone) 알림
    Zone,
    /// 임계값 돌파(Cross) 알림
    Cross,
}

impl AlertFamily {
    /// 성공 응답의 `type` 값.
    pub fn response_type(&self) -> &'static str {
        match self {
            Self::Zone => "zone_bot",
            Self::Cross => "cross_bot",
        }
    }

    /// 성공 응답의 `telegram_target` 값.
    pub fn telegram_target(&self) -> &'static str {
        match self {
            Self::Zone => "bot0",
            Self::Cross => "bot1",
        }
    }

    /// 설정 누락 응답의 `target` 값.
    pub fn config_target(&self) -> &'static str {
        match self {
            Self::Zone => "zone_bot",
            Self::Cross => "threshold_bot",
        }
    }

    /// 메트릭 라벨.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zone => "zone",
            Self::Cross => "cross",
        }
    }
}

impl fmt::Display for AlertFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 페이로드의 알림 유형을 판별합니다.
///
/// 다음 중 하나라도 만족하면 `Cross`, 아니면 `Zone`입니다:
/// - `eventType`이 `CROSS_UP` 또는 `CROSS_DOWN`
/// - `threshold`와 `value` 키가 모두 존재 (값이 `null`이어도)
/// - `line`이 `slow_ma_of_rsi`
pub fn classify(payload: &AlertPayload) -> AlertFamily {
    let cross_event = CROSS_EVENT_TYPES
        .iter()
        .any(|event| payload.event_type_is(event));
    let has_threshold_pair = payload.cross.threshold.is_some() && payload.cross.value.is_some();

    if cross_event || has_threshold_pair || payload.line_is(CROSS_LINE) {
        AlertFamily::Cross
    } else {
        AlertFamily::Zone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn classify_json(value: Value) -> AlertFamily {
        classify(&AlertPayload::from_value(value))
    }

    #[test]
    fn test_cross_event_types() {
        assert_eq!(classify_json(json!({"eventType": "CROSS_UP"})), AlertFamily::Cross);
        assert_eq!(classify_json(json!({"eventType": "CROSS_DOWN"})), AlertFamily::Cross);
        assert_eq!(classify_json(json!({"eventType": "cross_up"})), AlertFamily::Zone);
    }

    #[test]
    fn test_threshold_and_value_presence() {
        assert_eq!(
            classify_json(json!({"threshold": null, "value": null})),
            AlertFamily::Cross
        );
        assert_eq!(classify_json(json!({"threshold": 70})), AlertFamily::Zone);
        assert_eq!(classify_json(json!({"value": 70})), AlertFamily::Zone);
    }

    #[test]
    fn test_slow_ma_of_rsi_line() {
        assert_eq!(classify_json(json!({"line": "slow_ma_of_rsi"})), AlertFamily::Cross);
        assert_eq!(classify_json(json!({"line": "slow_line"})), AlertFamily::Zone);
    }

    #[test]
    fn test_zone_defaults() {
        assert_eq!(classify_json(json!({})), AlertFamily::Zone);
        assert_eq!(classify_json(json!("not an object")), AlertFamily::Zone);
        assert_eq!(
            classify_json(json!({"eventType": "breakout", "rangeHigh": 1.1, "rangeLow": 1.0})),
            AlertFamily::Zone
        );
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(AlertFamily::Zone.response_type(), "zone_bot");
        assert_eq!(AlertFamily::Cross.response_type(), "cross_bot");
        assert_eq!(AlertFamily::Zone.telegram_target(), "bot0");
        assert_eq!(AlertFamily::Cross.telegram_target(), "bot1");
        assert_eq!(AlertFamily::Cross.config_target(), "threshold_bot");
    }

    fn event_type_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("CROSS_UP".to_string())),
            Just(Some("CROSS_DOWN".to_string())),
            Just(Some("breakout".to_string())),
            "[a-zA-Z_]{0,12}".prop_map(Some),
        ]
    }

    fn line_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("slow_ma_of_rsi".to_string())),
            "[a-z_]{0,16}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_classification_rule(
            event_type in event_type_strategy(),
            line in line_strategy(),
            has_value in any::<bool>(),
            has_threshold in any::<bool>(),
        ) {
            let mut object = serde_json::Map::new();
            if let Some(event_type) = &event_type {
                object.insert("eventType".into(), json!(event_type));
            }
            if let Some(line) = &line {
                object.insert("line".into(), json!(line));
            }
            if has_value {
                object.insert("value".into(), Value::Null);
            }
            if has_threshold {
                object.insert("threshold".into(), json!(1.5));
            }

            let expected_cross = matches!(event_type.as_deref(), Some("CROSS_UP") | Some("CROSS_DOWN"))
                || (has_value && has_threshold)
                || line.as_deref() == Some("slow_ma_of_rsi");

            let family = classify_json(Value::Object(object));
            prop_assert_eq!(family == AlertFamily::Cross, expected_cross);
        }
    }
}
