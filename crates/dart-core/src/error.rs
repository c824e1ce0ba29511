//! 도메인 규칙 위반 에러 타입.

use thiserror::Error;

/// 식별자 무결성 에러.
///
/// 고정 폭 식별자로 표현할 수 없는 값은 잘라내지 않고 이 에러로 보고합니다.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrityError {
    /// 음이 아닌 정수로 해석할 수 없는 값
    #[error("{field} 값이 숫자가 아닙니다: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    /// 지정된 자릿수를 초과하는 값
    #[error("{field} 값 {value}이(가) {width}자리를 초과합니다")]
    Overflow {
        field: &'static str,
        value: String,
        width: usize,
    },
}

impl IntegrityError {
    /// 문제가 된 필드 이름.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotNumeric { field, .. } | Self::Overflow { field, .. } => field,
        }
    }
}

/// 헤더 라벨 수와 레코드 필드 수가 다를 때의 에러.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("컬럼 라벨 수({actual})가 필드 수({expected})와 다릅니다")]
pub struct LabelCountMismatch {
    pub expected: usize,
    pub actual: usize,
}
