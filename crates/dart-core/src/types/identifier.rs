//! 고정 폭 식별자 정규화.
//!
//! OpenDART 식별자는 숫자로만 이루어진 문자열이지만, 스프레드시트나 JSON을 거치면
//! 정수로 바뀌어 앞자리 0이 사라집니다. 이 모듈은 정수 또는 정수 문자열을
//! 필드별 고정 폭 문자열로 되돌립니다.
//!
//! - 고유번호(`corp_code`): 8자리
//! - 종목코드(`stock_code`): 6자리

use serde::{Deserialize, Deserializer};

use crate::error::IntegrityError;

/// 고유번호 자릿수.
pub const CORP_CODE_WIDTH: usize = 8;

/// 종목코드 자릿수.
pub const STOCK_CODE_WIDTH: usize = 6;

/// 고정 폭으로 정규화되는 식별자 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierField {
    /// 고유번호
    CorpCode,
    /// 주식 종목코드
    StockCode,
}

impl IdentifierField {
    /// 필드의 고정 폭.
    pub fn width(&self) -> usize {
        match self {
            Self::CorpCode => CORP_CODE_WIDTH,
            Self::StockCode => STOCK_CODE_WIDTH,
        }
    }

    /// 필드 이름 (API 응답 키와 동일).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CorpCode => "corp_code",
            Self::StockCode => "stock_code",
        }
    }

    /// 정수 값을 고정 폭 문자열로 변환합니다.
    ///
    /// # Example
    /// ```
    /// use dart_core::IdentifierField;
    ///
    /// assert_eq!(IdentifierField::CorpCode.pad(126380).unwrap(), "00126380");
    /// assert!(IdentifierField::StockCode.pad(1_000_000).is_err());
    /// ```
    pub fn pad(&self, value: u64) -> Result<String, IntegrityError> {
        let digits = value.to_string();
        if digits.len() > self.width() {
            return Err(IntegrityError::Overflow {
                field: self.as_str(),
                value: digits,
                width: self.width(),
            });
        }
        Ok(format!("{:0>width$}", digits, width = self.width()))
    }

    /// 정수 문자열을 고정 폭 문자열로 변환합니다.
    ///
    /// 앞뒤 공백은 무시하며, `"126380.0"`처럼 정수값인 소수 표기도 허용합니다.
    /// 이미 정규화된 값은 그대로 반환됩니다.
    pub fn normalize(&self, raw: &str) -> Result<String, IntegrityError> {
        let trimmed = raw.trim();
        let not_numeric = || IntegrityError::NotNumeric {
            field: self.as_str(),
            value: raw.to_string(),
        };

        let integer_part = match trimmed.split_once('.') {
            Some((int, frac)) if !frac.is_empty() && frac.bytes().all(|b| b == b'0') => int,
            Some(_) => return Err(not_numeric()),
            None => trimmed,
        };

        if integer_part.is_empty() || !integer_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_numeric());
        }

        let significant = integer_part.trim_start_matches('0');
        if significant.len() > self.width() {
            return Err(IntegrityError::Overflow {
                field: self.as_str(),
                value: significant.to_string(),
                width: self.width(),
            });
        }

        Ok(format!("{:0>width$}", significant, width = self.width()))
    }
}

/// 문자열 또는 숫자로 들어오는 식별자 필드를 문자열로 역직렬화합니다.
///
/// `#[serde(default, deserialize_with = "deserialize_identifier")]`와 함께 사용합니다.
pub fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIdentifier {
        Text(String),
        Integer(u64),
        Float(f64),
    }

    Ok(match Option::<RawIdentifier>::deserialize(deserializer)? {
        None => None,
        Some(RawIdentifier::Text(s)) => Some(s),
        Some(RawIdentifier::Integer(n)) => Some(n.to_string()),
        // f64의 Display는 지수 표기 없이 정수값을 그대로 쓴다 (660.0 → "660")
        Some(RawIdentifier::Float(f)) => Some(f.to_string()),
    })
}
