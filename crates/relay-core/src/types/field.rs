//! 느슨한 타입의 웹훅 필드 값.
//!
//! cTrader 봇은 같은 필드를 문자열로 보내기도 하고 숫자로 보내기도 합니다.
//! `FieldValue`는 원본 JSON 값을 보존한 채 메시지 조립에 필요한
//! 판별(truthy), 텍스트 변환, 숫자 변환 규칙을 한곳에 모읍니다.

use std::fmt;

use serde_json::Value;

/// 웹훅 페이로드의 단일 필드 값.
///
/// 키가 없는 필드와 `null` 필드는 모두 `Null`로 표현됩니다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldValue(Value);

impl FieldValue {
    /// 비어 있는 (`null`) 값.
    pub fn null() -> Self {
        Self(Value::Null)
    }

    /// 문자열 값.
    pub fn text(s: impl Into<String>) -> Self {
        Self(Value::String(s.into()))
    }

    /// `null` 여부.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// 값이 `null`이면 `fallback`을 반환합니다.
    pub fn or(self, fallback: FieldValue) -> FieldValue {
        if self.is_null() {
            fallback
        } else {
            self
        }
    }

    /// 문자열 값이면 그 내용을 반환합니다.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// 원본 JSON 값.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// 값이 "참"으로 취급되는지 확인합니다.
    ///
    /// `null`, `false`, `0`, `NaN`, 빈 문자열은 거짓이고 나머지는 모두 참입니다.
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// 메시지에 삽입할 텍스트 표현.
    pub fn to_text(&self) -> String {
        value_text(&self.0)
    }

    /// 숫자로 변환합니다. 변환할 수 없으면 `NaN`입니다.
    ///
    /// - 숫자: 그대로
    /// - 문자열: 앞뒤 공백 제거 후 파싱, 빈 문자열은 `0`
    /// - `null`: `0`, 불리언: `0` / `1`
    /// - 배열: 텍스트 표현을 다시 파싱, 객체: `NaN`
    pub fn to_number(&self) -> f64 {
        match &self.0 {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => parse_numeric_text(s),
            Value::Array(_) => parse_numeric_text(&self.to_text()),
            Value::Object(_) => f64::NAN,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(float_text).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// 부동소수점 숫자의 텍스트 표현.
///
/// 왕복 가능한 최단 자릿수를 사용하고, 소수점 위치가 `1e-7` 이하이거나
/// `1e21` 이상이면 `1.5e+21` 같은 지수 표기로 씁니다.
pub(crate) fn float_text(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        let text = if f > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }

    // `{:e}`는 최단 자릿수를 `d.ddde<exp>` 형태로 출력
    let scientific = format!("{:e}", f.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if f < 0.0 { "-" } else { "" };
    format!("{sign}{}", place_decimal_point(&digits, exponent + 1))
}

/// 유효 숫자 `digits`와 소수점 위치 `point`(첫 자리 앞이 0)로 숫자를 씁니다.
fn place_decimal_point(digits: &str, point: i32) -> String {
    let len = digits.len() as i32;

    if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let exponent = point - 1;
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{exp_sign}{}", exponent.unsigned_abs())
        } else {
            format!("{first}.{rest}e{exp_sign}{}", exponent.unsigned_abs())
        }
    }
}

fn parse_numeric_text(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }

    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let body = t
            .strip_prefix(prefix)
            .or_else(|| t.strip_prefix(prefix.to_ascii_uppercase().as_str()));
        if let Some(body) = body {
            return parse_radix(body, radix);
        }
    }

    // Rust의 f64 파서는 "inf", "nan" 등을 허용하므로 지수 표기 외의 문자는 거부
    if t.chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    t.parse::<f64>().unwrap_or(f64::NAN)
}

/// 부호 없는 정수 자릿수를 `radix` 진법으로 읽습니다. 빈 문자열이나 잘못된 자리는 `NaN`.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: Value) -> FieldValue {
        FieldValue::from(value)
    }

    #[test]
    fn test_truthiness() {
        assert!(!field(json!(null)).is_truthy());
        assert!(!field(json!("")).is_truthy());
        assert!(!field(json!(0)).is_truthy());
        assert!(!field(json!(0.0)).is_truthy());
        assert!(!field(json!(false)).is_truthy());

        assert!(field(json!("0")).is_truthy());
        assert!(field(json!(1.05)).is_truthy());
        assert!(field(json!([])).is_truthy());
        assert!(field(json!({})).is_truthy());
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(field(json!("EURUSD")).to_text(), "EURUSD");
        assert_eq!(field(json!(42)).to_text(), "42");
        assert_eq!(field(json!(1.0)).to_text(), "1");
        assert_eq!(field(json!(1.0505)).to_text(), "1.0505");
        assert_eq!(field(json!(-3)).to_text(), "-3");
        assert_eq!(field(json!(true)).to_text(), "true");
        assert_eq!(field(json!(null)).to_text(), "null");
        assert_eq!(field(json!([1, null, "a"])).to_text(), "1,,a");
        assert_eq!(field(json!({"a": 1})).to_text(), "[object Object]");
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(field(json!(1.5)).to_number(), 1.5);
        assert_eq!(field(json!(" 2.25 ")).to_number(), 2.25);
        assert_eq!(field(json!("")).to_number(), 0.0);
        assert_eq!(field(json!(null)).to_number(), 0.0);
        assert_eq!(field(json!(true)).to_number(), 1.0);
        assert_eq!(field(json!("0x10")).to_number(), 16.0);
        assert_eq!(field(json!("1e3")).to_number(), 1000.0);
        assert_eq!(field(json!([7])).to_number(), 7.0);
        assert_eq!(field(json!("Infinity")).to_number(), f64::INFINITY);

        assert!(field(json!("abc")).to_number().is_nan());
        assert!(field(json!("inf")).to_number().is_nan());
        assert!(field(json!("nan")).to_number().is_nan());
        assert!(field(json!({"v": 1})).to_number().is_nan());
    }

    #[test]
    fn test_exponent_notation_at_extremes() {
        assert_eq!(field(json!(1e-7)).to_text(), "1e-7");
        assert_eq!(field(json!(1.5e-7)).to_text(), "1.5e-7");
        assert_eq!(field(json!(0.000001)).to_text(), "0.000001");
        assert_eq!(field(json!(1e21)).to_text(), "1e+21");
        assert_eq!(field(json!(1e20)).to_text(), "100000000000000000000");
        assert_eq!(
            field(json!(1.7976931348623157e308)).to_text(),
            "1.7976931348623157e+308"
        );
        assert_eq!(field(json!(-2.5e-9)).to_text(), "-2.5e-9");
        assert_eq!(field(json!(123.456)).to_text(), "123.456");
    }

    #[test]
    fn test_binary_and_octal_prefixes() {
        assert_eq!(field(json!("0b101")).to_number(), 5.0);
        assert_eq!(field(json!("0o17")).to_number(), 15.0);
        assert_eq!(field(json!("0B11")).to_number(), 3.0);
        assert_eq!(field(json!("0xff")).to_number(), 255.0);
        assert!(field(json!("0b102")).to_number().is_nan());
        assert!(field(json!("0o")).to_number().is_nan());
        assert!(field(json!("-0x10")).to_number().is_nan());
    }

    #[test]
    fn test_or_falls_back_only_on_null() {
        assert_eq!(FieldValue::null().or("x".into()), FieldValue::text("x"));
        assert_eq!(field(json!("")).or("x".into()), FieldValue::text(""));
        assert_eq!(field(json!(0)).or("x".into()), field(json!(0)));
    }
}
