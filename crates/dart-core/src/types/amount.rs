//! 공시 응답의 금액/비율 문자열 파싱.

use rust_decimal::Decimal;
use std::str::FromStr;

/// 공시 응답의 숫자 문자열을 Decimal로 변환합니다.
///
/// 천 단위 구분자(`,`)와 퍼센트 기호를 제거하며, 빈 값과 `-` 자리표시자는 `None`입니다.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '%')
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// `Option<String>` 필드용 헬퍼.
pub fn parse_amount_opt(raw: &Option<String>) -> Option<Decimal> {
    raw.as_deref().and_then(parse_amount)
}
