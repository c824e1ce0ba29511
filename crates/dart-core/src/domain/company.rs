//! 기업개황 레코드.

use serde::{Deserialize, Serialize};

use super::table::{cell, TableRow};
use crate::error::IntegrityError;
use crate::types::{deserialize_identifier, IdentifierField};

/// OpenDART 정상 응답 상태 코드.
pub const STATUS_OK: &str = "000";

/// 기업개황 (`company.json`) 응답.
///
/// 에러 응답은 `status`/`message`만 채워지고 나머지 필드는 비어 있습니다.
/// 에러 응답도 수집 결과에 그대로 남겨 누락 여부를 감사할 수 있게 합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyOverview {
    /// 에러 및 정보 코드
    pub status: String,
    /// 에러 및 정보 메시지
    #[serde(default)]
    pub message: String,
    /// 고유번호
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub corp_code: Option<String>,
    /// 정식명칭
    #[serde(default)]
    pub corp_name: Option<String>,
    /// 영문명칭
    #[serde(default)]
    pub corp_name_eng: Option<String>,
    /// 종목명 또는 약식명칭
    #[serde(default)]
    pub stock_name: Option<String>,
    /// 주식 종목코드
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub stock_code: Option<String>,
    /// 대표자명
    #[serde(default)]
    pub ceo_nm: Option<String>,
    /// 법인구분 (Y: 유가, K: 코스닥, N: 코넥스, E: 기타)
    #[serde(default)]
    pub corp_cls: Option<String>,
    /// 법인등록번호
    #[serde(default)]
    pub jurir_no: Option<String>,
    /// 사업자등록번호
    #[serde(default)]
    pub bizr_no: Option<String>,
    /// 주소
    #[serde(default)]
    pub adres: Option<String>,
    /// 홈페이지
    #[serde(default)]
    pub hm_url: Option<String>,
    /// IR홈페이지
    #[serde(default)]
    pub ir_url: Option<String>,
    /// 전화번호
    #[serde(default)]
    pub phn_no: Option<String>,
    /// 팩스번호
    #[serde(default)]
    pub fax_no: Option<String>,
    /// 업종코드
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub induty_code: Option<String>,
    /// 설립일 (YYYYMMDD)
    #[serde(default)]
    pub est_dt: Option<String>,
    /// 결산월 (MM)
    #[serde(default)]
    pub acc_mt: Option<String>,
}

impl CompanyOverview {
    /// 정상 응답인지 확인합니다.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// 고유번호와 종목코드를 고정 폭으로 정규화한 사본을 만듭니다.
    ///
    /// 비어 있는 식별자는 그대로 둡니다. 자릿수를 넘거나 숫자가 아닌 값은
    /// 잘라내지 않고 에러로 반환합니다.
    pub fn normalized(&self) -> Result<Self, IntegrityError> {
        let corp_code = normalize_field(IdentifierField::CorpCode, &self.corp_code)?;
        let stock_code = normalize_field(IdentifierField::StockCode, &self.stock_code)?;

        Ok(Self {
            corp_code,
            stock_code,
            ..self.clone()
        })
    }

    /// 결합 키로 사용할 정수 업종코드.
    ///
    /// 숫자로만 이루어진 경우에만 값을 가집니다.
    pub fn industry_key(&self) -> Option<u32> {
        self.induty_code.as_deref().and_then(super::parse_industry_code)
    }
}

fn normalize_field(
    field: IdentifierField,
    value: &Option<String>,
) -> Result<Option<String>, IntegrityError> {
    match value.as_deref() {
        Some(raw) if !raw.trim().is_empty() => field.normalize(raw).map(Some),
        _ => Ok(value.clone()),
    }
}

impl TableRow for CompanyOverview {
    const FIELD_NAMES: &'static [&'static str] = &[
        "status",
        "message",
        "corp_code",
        "corp_name",
        "corp_name_eng",
        "stock_name",
        "stock_code",
        "ceo_nm",
        "corp_cls",
        "jurir_no",
        "bizr_no",
        "adres",
        "hm_url",
        "ir_url",
        "phn_no",
        "fax_no",
        "induty_code",
        "est_dt",
        "acc_mt",
    ];

    const KOREAN_LABELS: &'static [&'static str] = &[
        "에러 및 정보코드",
        "에러 및 정보 메시지",
        "고유번호",
        "정식명칭",
        "영문명칭",
        "종목명 또는 약식명칭",
        "주식 종목코드",
        "대표자명",
        "법인구분",
        "법인등록번호",
        "사업자등록번호",
        "주소",
        "홈페이지",
        "IR홈페이지",
        "전화번호",
        "팩스번호",
        "업종코드",
        "설립일",
        "결산월",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            self.status.clone(),
            self.message.clone(),
            cell(&self.corp_code),
            cell(&self.corp_name),
            cell(&self.corp_name_eng),
            cell(&self.stock_name),
            cell(&self.stock_code),
            cell(&self.ceo_nm),
            cell(&self.corp_cls),
            cell(&self.jurir_no),
            cell(&self.bizr_no),
            cell(&self.adres),
            cell(&self.hm_url),
            cell(&self.ir_url),
            cell(&self.phn_no),
            cell(&self.fax_no),
            cell(&self.induty_code),
            cell(&self.est_dt),
            cell(&self.acc_mt),
        ]
    }
}
