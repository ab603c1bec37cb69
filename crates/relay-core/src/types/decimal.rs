//! 고정 소수점 표시를 위한 Decimal 유틸리티.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::field::float_text;

/// 이 값 이상은 고정 소수점 대신 일반 숫자 표현을 사용합니다.
const FIXED_NOTATION_LIMIT: f64 = 1e21;

/// `value`를 소수점 `digits`자리 고정 표기로 변환합니다.
///
/// 정확히 중간인 값은 0에서 먼 쪽으로 반올림합니다 (예: `0.0625` → `"0.063"`).
/// 유한하지 않거나 너무 큰 값은 일반 숫자 표현을 반환합니다.
pub fn to_fixed(value: f64, digits: u32) -> String {
    if !value.is_finite() || value.abs() >= FIXED_NOTATION_LIMIT {
        return float_text(value);
    }

    let precision = digits as usize;
    let Some(exact) = Decimal::from_f64_retain(value).or_else(|| Decimal::from_f64(value)) else {
        return format!("{:.*}", precision, value);
    };

    let rounded = exact.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        let zero = format!("{:.*}", precision, Decimal::ZERO);
        return if value < 0.0 { format!("-{}", zero) } else { zero };
    }

    format!("{:.*}", precision, rounded)
}
