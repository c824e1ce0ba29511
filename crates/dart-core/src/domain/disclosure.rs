//! 공시검색 (`list.json`) 레코드.

use serde::{Deserialize, Serialize};

use super::table::{cell, TableRow};

/// 공시검색 결과 한 건.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureFiling {
    /// 고유번호
    #[serde(default)]
    pub corp_code: Option<String>,
    /// 회사명
    #[serde(default)]
    pub corp_name: Option<String>,
    /// 종목코드
    #[serde(default)]
    pub stock_code: Option<String>,
    /// 법인구분
    #[serde(default)]
    pub corp_cls: Option<String>,
    /// 보고서명
    #[serde(default)]
    pub report_nm: Option<String>,
    /// 접수번호 (14자리, 원본파일 조회 키)
    #[serde(default)]
    pub rcept_no: Option<String>,
    /// 공시 제출인명
    #[serde(default)]
    pub flr_nm: Option<String>,
    /// 접수일자 (YYYYMMDD)
    #[serde(default)]
    pub rcept_dt: Option<String>,
    /// 비고
    #[serde(default)]
    pub rm: Option<String>,
}

impl TableRow for DisclosureFiling {
    const FIELD_NAMES: &'static [&'static str] = &[
        "corp_code",
        "corp_name",
        "stock_code",
        "corp_cls",
        "report_nm",
        "rcept_no",
        "flr_nm",
        "rcept_dt",
        "rm",
    ];

    const KOREAN_LABELS: &'static [&'static str] = &[
        "고유번호",
        "회사명",
        "종목코드",
        "법인구분",
        "보고서명",
        "접수번호",
        "공시 제출인명",
        "접수일자",
        "비고",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            cell(&self.corp_code),
            cell(&self.corp_name),
            cell(&self.stock_code),
            cell(&self.corp_cls),
            cell(&self.report_nm),
            cell(&self.rcept_no),
            cell(&self.flr_nm),
            cell(&self.rcept_dt),
            cell(&self.rm),
        ]
    }
}
