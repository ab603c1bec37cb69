//! cTrader 웹훅 페이로드.
//!
//! 요청 본문은 필수 필드가 없는 느슨한 JSON 객체입니다. 수신 시점에 한 번
//! [`AlertPayload`]로 디코딩하며, 이때 필드별 기본값과 대체 키 체인을 적용합니다.
//!
//! | 필드 | 원본 키 | 기본값 |
//! |------|---------|--------|
//! | `symbol` | `symbol` | `"UNKNOWN"` |
//! | `time.utc_date` | `utcDate` | `""` |
//! | `time.utc_time` | `signalTimeUtc` → `eventTimeUtc` → `serverTimeUtc` | `""` |
//! | `time.ny_date` | `nyDate` → `dateNY` | `""` |
//! | `time.ny_time` | `signalTimeNY` → `eventTimeNY` | `""` |
//! | `zone.session` | `session` | `"00:00–04:00 UTC"` |
//! | `zone.reason` | `reason` | `""` |
//! | `cross.timeframe` | `timeframe` → `tf` | `""` |
//! | `cross.line` | `line` | `"slow_line"` |
//! | `cross.price` | `price` → `bid` → `ask` | `""` |

use serde_json::{Map, Value};

use crate::error::RelayResult;
use crate::types::FieldValue;

/// 심볼이 없을 때 사용하는 값.
pub const DEFAULT_SYMBOL: &str = "UNKNOWN";

/// 세션이 없을 때 사용하는 Zone 세션 표기.
pub const DEFAULT_SESSION: &str = "00:00–04:00 UTC";

/// 라인 이름이 없을 때 사용하는 Cross 라인.
pub const DEFAULT_LINE: &str = "slow_line";

/// 시간 관련 필드.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertTime {
    /// UTC 날짜
    pub utc_date: FieldValue,
    /// UTC 시각
    pub utc_time: FieldValue,
    /// 뉴욕 날짜
    pub ny_date: FieldValue,
    /// 뉴욕 시각
    pub ny_time: FieldValue,
}

/// Zone 봇 필드.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneFields {
    /// 박스 상단
    pub range_high: FieldValue,
    /// 박스 하단
    pub range_low: FieldValue,
    /// 박스 중간값
    pub mid: FieldValue,
    /// 세션 표기
    pub session: FieldValue,
    /// 발생 사유
    pub reason: FieldValue,
    /// 추가 정보
    pub extra: FieldValue,
}

/// Cross(임계값 돌파) 봇 필드.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossFields {
    /// 타임프레임
    pub timeframe: FieldValue,
    /// 라인 이름
    pub line: FieldValue,
    /// 현재 값 (키가 있으면 `null`이어도 `Some`)
    pub value: Option<FieldValue>,
    /// 임계값 (키가 있으면 `null`이어도 `Some`)
    pub threshold: Option<FieldValue>,
    /// 가격 (`price` / `bid` / `ask`)
    pub price: FieldValue,
}

/// 디코딩된 웹훅 페이로드.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertPayload {
    /// 거래 심볼
    pub symbol: FieldValue,
    /// 이벤트 유형 (문자열일 때만)
    pub event_type: Option<String>,
    /// 시간 필드
    pub time: AlertTime,
    /// Zone 봇 필드
    pub zone: ZoneFields,
    /// Cross 봇 필드
    pub cross: CrossFields,
}

impl AlertPayload {
    /// 요청 본문을 디코딩합니다.
    ///
    /// 빈 본문은 빈 객체로 취급합니다.
    ///
    /// # Errors
    /// 본문이 유효한 JSON이 아니면 `RelayError::InvalidJson`을 반환합니다.
    pub fn from_slice(body: &[u8]) -> RelayResult<Self> {
        if body.is_empty() {
            return Ok(Self::from_object(&Map::new()));
        }
        let value: Value = serde_json::from_slice(body)?;
        Ok(Self::from_value(value))
    }

    /// JSON 값에서 페이로드를 생성합니다. 객체가 아니면 빈 페이로드입니다.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_object(&map),
            _ => Self::from_object(&Map::new()),
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let empty = || FieldValue::text("");

        Self {
            symbol: field(map, "symbol").or(DEFAULT_SYMBOL.into()),
            event_type: map
                .get("eventType")
                .and_then(Value::as_str)
                .map(str::to_owned),
            time: AlertTime {
                utc_date: field(map, "utcDate").or(empty()),
                utc_time: first_non_null(map, &["signalTimeUtc", "eventTimeUtc", "serverTimeUtc"])
                    .or(empty()),
                ny_date: first_non_null(map, &["nyDate", "dateNY"]).or(empty()),
                ny_time: first_non_null(map, &["signalTimeNY", "eventTimeNY"]).or(empty()),
            },
            zone: ZoneFields {
                range_high: field(map, "rangeHigh").or(empty()),
                range_low: field(map, "rangeLow").or(empty()),
                mid: field(map, "mid").or(empty()),
                session: field(map, "session").or(DEFAULT_SESSION.into()),
                reason: field(map, "reason").or(empty()),
                extra: field(map, "extra").or(empty()),
            },
            cross: CrossFields {
                timeframe: first_non_null(map, &["timeframe", "tf"]).or(empty()),
                line: field(map, "line").or(DEFAULT_LINE.into()),
                value: map.get("value").cloned().map(FieldValue::from),
                threshold: map.get("threshold").cloned().map(FieldValue::from),
                price: first_non_null(map, &["price", "bid", "ask"]).or(empty()),
            },
        }
    }

    /// 원본 `line` 필드가 주어진 문자열인지 확인합니다.
    pub fn line_is(&self, line: &str) -> bool {
        self.cross.line.as_str() == Some(line)
    }

    /// 이벤트 유형이 주어진 문자열인지 확인합니다.
    pub fn event_type_is(&self, event_type: &str) -> bool {
        self.event_type.as_deref() == Some(event_type)
    }
}

impl Default for AlertPayload {
    fn default() -> Self {
        Self::from_object(&Map::new())
    }
}

fn field(map: &Map<String, Value>, key: &str) -> FieldValue {
    map.get(key).cloned().map(FieldValue::from).unwrap_or_default()
}

fn first_non_null(map: &Map<String, Value>, keys: &[&str]) -> FieldValue {
    keys.iter()
        .map(|key| field(map, key))
        .find(|value| !value.is_null())
        .unwrap_or_default()
}
