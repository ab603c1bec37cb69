//! 텔레그램 메시지 포맷팅.
//!
//! 알림 유형별로 사람이 읽을 수 있는 평문 메시지를 조립합니다.
//! 텔레그램 메시지 최대 길이는 4096자이므로 3900자에서 잘라냅니다.

use std::fmt::{self, Write as _};

use super::classifier::AlertFamily;
use super::payload::{AlertPayload, AlertTime};
use crate::types::{to_fixed, FieldValue};

/// 메시지 최대 길이 (UTF-16 코드 단위).
pub const MAX_MESSAGE_LEN: usize = 3900;

/// 잘린 메시지 끝에 붙는 표식.
pub const TRUNCATION_MARKER: &str = "\n…(truncated)";

/// 기본 제목 (알 수 없는 이벤트).
pub const DEFAULT_TITLE: &str = "📌 cTrader Alert";

/// 숫자 필드 소수점 자릿수.
const VALUE_DECIMALS: u32 = 3;

/// 전송 준비가 끝난 메시지. 길이 제한이 이미 적용되어 있습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage(String);

impl FormattedMessage {
    /// 텍스트에 길이 제한을 적용해 메시지를 생성합니다.
    pub fn new(text: String) -> Self {
        Self(truncate_message(text))
    }

    /// 메시지 본문.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 본문을 소유권과 함께 반환합니다.
    pub fn into_string(self) -> String {
        self.0
    }

    /// UTF-16 코드 단위 길이 (텔레그램 기준 길이).
    pub fn utf16_len(&self) -> usize {
        self.0.encode_utf16().count()
    }
}

impl fmt::Display for FormattedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 알림 유형에 맞게 메시지를 포맷합니다.
pub fn format_message(payload: &AlertPayload, family: AlertFamily) -> FormattedMessage {
    let text = match family {
        AlertFamily::Zone => format_zone(payload),
        AlertFamily::Cross => format_cross(payload),
    };
    FormattedMessage::new(text)
}

/// 시간 블록.
///
/// 뉴욕 날짜나 시각 중 하나라도 있으면 뉴욕 기준, 아니면 UTC 기준으로
/// 한쪽만 출력합니다. 각 줄은 값이 있을 때만 포함됩니다.
pub fn time_block(time: &AlertTime) -> String {
    let (date, clock, zone) = if time.ny_date.is_truthy() || time.ny_time.is_truthy() {
        (&time.ny_date, &time.ny_time, "NY")
    } else {
        (&time.utc_date, &time.utc_time, "UTC")
    };

    let mut block = String::new();
    if date.is_truthy() {
        let _ = write!(block, "Date({zone}): {date}");
    }
    if clock.is_truthy() {
        let _ = write!(block, "\nTime({zone}): {clock}");
    }
    block
}

/// Zone 알림 제목.
pub fn zone_title(event_type: Option<&str>) -> &'static str {
    match event_type {
        Some("zoneReady") => "🟦 ZONE READY",
        Some("breakout") => "🚨 OUT OF ZONE",
        Some("entered") => "🟩 ENTERED ZONE",
        Some("closeInside") => "✅ CLOSE INSIDE",
        Some("test") => "🔧 TEST",
        _ => DEFAULT_TITLE,
    }
}

/// Cross 알림 제목.
pub fn cross_title(event_type: Option<&str>) -> &'static str {
    match event_type {
        Some("CROSS_UP") => "📈 THRESHOLD BREAK (UP)",
        Some("CROSS_DOWN") => "📉 THRESHOLD BREAK (DOWN)",
        _ => DEFAULT_TITLE,
    }
}

/// Zone 박스 블록. 상단/하단이 모두 있을 때만 생성됩니다.
fn zone_block(payload: &AlertPayload) -> Option<String> {
    let zone = &payload.zone;
    if !(zone.range_high.is_truthy() && zone.range_low.is_truthy()) {
        return None;
    }

    let mut block = format!(
        "Zone ({})\nH: {}\nL: {}",
        zone.session, zone.range_high, zone.range_low
    );
    if zone.mid.is_truthy() {
        let _ = write!(block, "\nMID: {}", zone.mid);
    }
    Some(block)
}

fn format_zone(payload: &AlertPayload) -> String {
    let title = zone_title(payload.event_type.as_deref());
    let time = time_block(&payload.time);

    let mut text = format!("{title}\nSymbol: {}\n{time}\n\n", payload.symbol);
    if let Some(block) = zone_block(payload) {
        text.push_str(&block);
        text.push_str("\n\n");
    }
    let _ = write!(text, "Reason: {}", payload.zone.reason);
    if payload.zone.extra.is_truthy() {
        let _ = write!(text, "\nExtra: {}", payload.zone.extra);
    }
    text
}

fn format_cross(payload: &AlertPayload) -> String {
    let cross = &payload.cross;
    let title = cross_title(payload.event_type.as_deref());
    let time = time_block(&payload.time);

    let mut text = format!("{title}\nSymbol: {}", payload.symbol);
    if cross.timeframe.is_truthy() {
        let _ = write!(text, " ({})", cross.timeframe);
    }
    text.push('\n');
    if !time.is_empty() {
        text.push_str(&time);
        text.push('\n');
    }
    let _ = write!(
        text,
        "\nLine: {}\nValue: {}\nThreshold: {}",
        cross.line,
        numeric_text(cross.value.as_ref()),
        numeric_text(cross.threshold.as_ref()),
    );
    if cross.price.as_str() != Some("") {
        let _ = write!(text, "\nPrice: {}", cross.price);
    }
    text
}

/// 숫자로 변환 가능한 값은 소수점 3자리, 아니면 원본 텍스트.
fn numeric_text(raw: Option<&FieldValue>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let number = raw.to_number();
    if number.is_finite() {
        to_fixed(number, VALUE_DECIMALS)
    } else {
        raw.to_text()
    }
}

/// 3900 코드 단위를 넘으면 잘라내고 표식을 붙입니다.
///
/// 서로게이트 쌍을 쪼개지 않도록 문자 경계에서 자릅니다.
pub fn truncate_message(mut text: String) -> String {
    if text.encode_utf16().count() <= MAX_MESSAGE_LEN {
        return text;
    }

    let mut units = 0;
    let mut cut = text.len();
    for (idx, ch) in text.char_indices() {
        if units + ch.len_utf16() > MAX_MESSAGE_LEN {
            cut = idx;
            break;
        }
        units += ch.len_utf16();
    }

    text.truncate(cut);
    text.push_str(TRUNCATION_MARKER);
    text
}
