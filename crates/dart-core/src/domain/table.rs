//! 표 형식 출력을 위한 행 추상화.

use rust_decimal::Decimal;

use crate::error::LabelCountMismatch;

/// 고정 스키마를 가진 출력 행.
///
/// `values()`는 `FIELD_NAMES`와 같은 순서, 같은 개수의 값을 반환해야 합니다.
pub trait TableRow {
    /// 기계용 컬럼 이름 (API 필드명)
    const FIELD_NAMES: &'static [&'static str];

    /// 사람용 한글 컬럼 라벨
    const KOREAN_LABELS: &'static [&'static str];

    /// 필드 순서대로 직렬화된 값.
    fn values(&self) -> Vec<String>;
}

/// 헤더 언어.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// API 필드명 그대로
    Machine,
    /// 한글 라벨
    #[default]
    Korean,
}

impl std::str::FromStr for HeaderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eng" | "en" | "machine" => Ok(Self::Machine),
            "kor" | "ko" | "korean" => Ok(Self::Korean),
            _ => Err(format!("Unknown header style: {}", s)),
        }
    }
}

impl HeaderStyle {
    /// 행 타입에 맞는 헤더 라벨 목록.
    pub fn labels<R: TableRow>(&self) -> &'static [&'static str] {
        match self {
            Self::Machine => R::FIELD_NAMES,
            Self::Korean => R::KOREAN_LABELS,
        }
    }
}

/// 위치 기반으로 라벨을 붙일 수 있는지 검증하고 헤더를 만듭니다.
pub fn relabel<R: TableRow, S: AsRef<str>>(
    labels: &[S],
) -> Result<Vec<String>, LabelCountMismatch> {
    if labels.len() != R::FIELD_NAMES.len() {
        return Err(LabelCountMismatch {
            expected: R::FIELD_NAMES.len(),
            actual: labels.len(),
        });
    }
    Ok(labels.iter().map(|l| l.as_ref().to_string()).collect())
}

/// `Option<String>` 필드를 출력 문자열로 변환.
pub(crate) fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// 숫자 필드 출력. 해석된 값은 천 단위 구분자 없이, 해석하지 못한 값은 원문 그대로.
pub(crate) fn amount_cell(parsed: Option<Decimal>, raw: &Option<String>) -> String {
    match parsed {
        Some(amount) => amount.to_string(),
        None => cell(raw),
    }
}
