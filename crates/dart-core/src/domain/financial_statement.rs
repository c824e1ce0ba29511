//! 단일회사 전체 재무제표 (`fnlttSinglAcntAll.json`) 레코드.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::table::{amount_cell, cell, TableRow};
use crate::types::parse_amount_opt;

/// 보고서 코드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportCode {
    /// 사업보고서
    #[default]
    Annual,
    /// 반기보고서
    HalfYear,
    /// 1분기보고서
    FirstQuarter,
    /// 3분기보고서
    ThirdQuarter,
}

impl ReportCode {
    /// API 파라미터 값.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "11011",
            Self::HalfYear => "11012",
            Self::FirstQuarter => "11013",
            Self::ThirdQuarter => "11014",
        }
    }
}

impl std::str::FromStr for ReportCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "11011" | "annual" => Ok(Self::Annual),
            "11012" | "half" => Ok(Self::HalfYear),
            "11013" | "q1" => Ok(Self::FirstQuarter),
            "11014" | "q3" => Ok(Self::ThirdQuarter),
            _ => Err(format!("Unknown report code: {}", s)),
        }
    }
}

/// 재무제표 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementScope {
    /// 연결재무제표
    #[default]
    Consolidated,
    /// 별도(개별)재무제표
    Separate,
}

impl StatementScope {
    /// API 파라미터 값 (`fs_div`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consolidated => "CFS",
            Self::Separate => "OFS",
        }
    }
}

impl std::str::FromStr for StatementScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CFS" => Ok(Self::Consolidated),
            "OFS" => Ok(Self::Separate),
            _ => Err(format!("Unknown statement scope: {}", s)),
        }
    }
}

/// 재무제표 계정 한 줄.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialStatementLine {
    #[serde(default)]
    pub rcept_no: Option<String>,
    #[serde(default)]
    pub reprt_code: Option<String>,
    #[serde(default)]
    pub bsns_year: Option<String>,
    #[serde(default)]
    pub corp_code: Option<String>,
    /// 재무제표구분 (BS, IS, CIS, CF, SCE)
    #[serde(default)]
    pub sj_div: Option<String>,
    #[serde(default)]
    pub sj_nm: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub account_nm: Option<String>,
    #[serde(default)]
    pub account_detail: Option<String>,
    #[serde(default)]
    pub thstrm_nm: Option<String>,
    #[serde(default)]
    pub thstrm_amount: Option<String>,
    #[serde(default)]
    pub thstrm_add_amount: Option<String>,
    #[serde(default)]
    pub frmtrm_nm: Option<String>,
    #[serde(default)]
    pub frmtrm_amount: Option<String>,
    #[serde(default)]
    pub frmtrm_q_nm: Option<String>,
    #[serde(default)]
    pub frmtrm_q_amount: Option<String>,
    #[serde(default)]
    pub frmtrm_add_amount: Option<String>,
    #[serde(default)]
    pub bfefrmtrm_nm: Option<String>,
    #[serde(default)]
    pub bfefrmtrm_amount: Option<String>,
    #[serde(default)]
    pub ord: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl FinancialStatementLine {
    /// 당기금액.
    pub fn current_amount(&self) -> Option<Decimal> {
        parse_amount_opt(&self.thstrm_amount)
    }

    /// 전기금액.
    pub fn prior_amount(&self) -> Option<Decimal> {
        parse_amount_opt(&self.frmtrm_amount)
    }
}

impl TableRow for FinancialStatementLine {
    const FIELD_NAMES: &'static [&'static str] = &[
        "rcept_no",
        "reprt_code",
        "bsns_year",
        "corp_code",
        "sj_div",
        "sj_nm",
        "account_id",
        "account_nm",
        "account_detail",
        "thstrm_nm",
        "thstrm_amount",
        "thstrm_add_amount",
        "frmtrm_nm",
        "frmtrm_amount",
        "frmtrm_q_nm",
        "frmtrm_q_amount",
        "frmtrm_add_amount",
        "bfefrmtrm_nm",
        "bfefrmtrm_amount",
        "ord",
        "currency",
    ];

    const KOREAN_LABELS: &'static [&'static str] = &[
        "접수번호",
        "보고서 코드",
        "사업 연도",
        "고유번호",
        "재무제표구분",
        "재무제표명",
        "계정ID",
        "계정명",
        "계정상세",
        "당기명",
        "당기금액",
        "당기누적금액",
        "전기명",
        "전기금액",
        "전기명(분/반기)",
        "전기금액(분/반기)",
        "전기누적금액",
        "전전기명",
        "전전기금액",
        "계정과목 정렬순서",
        "통화 단위",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            cell(&self.rcept_no),
            cell(&self.reprt_code),
            cell(&self.bsns_year),
            cell(&self.corp_code),
            cell(&self.sj_div),
            cell(&self.sj_nm),
            cell(&self.account_id),
            cell(&self.account_nm),
            cell(&self.account_detail),
            cell(&self.thstrm_nm),
            amount_cell(self.current_amount(), &self.thstrm_amount),
            amount_cell(parse_amount_opt(&self.thstrm_add_amount), &self.thstrm_add_amount),
            cell(&self.frmtrm_nm),
            amount_cell(self.prior_amount(), &self.frmtrm_amount),
            cell(&self.frmtrm_q_nm),
            amount_cell(parse_amount_opt(&self.frmtrm_q_amount), &self.frmtrm_q_amount),
            amount_cell(parse_amount_opt(&self.frmtrm_add_amount), &self.frmtrm_add_amount),
            cell(&self.bfefrmtrm_nm),
            amount_cell(parse_amount_opt(&self.bfefrmtrm_amount), &self.bfefrmtrm_amount),
            cell(&self.ord),
            cell(&self.currency),
        ]
    }
}
