//! 지분공시 레코드.
//!
//! - 대량보유 상황보고 (`majorstock.json`)
//! - 임원ㆍ주요주주 소유보고 (`elestock.json`)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::table::{amount_cell, cell, TableRow};
use crate::types::parse_amount_opt;

/// 대량보유 상황보고 한 건.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorShareholding {
    #[serde(default)]
    pub rcept_no: Option<String>,
    #[serde(default)]
    pub rcept_dt: Option<String>,
    #[serde(default)]
    pub corp_code: Option<String>,
    #[serde(default)]
    pub corp_name: Option<String>,
    /// 보고구분
    #[serde(default)]
    pub report_tp: Option<String>,
    /// 대표보고자
    #[serde(default)]
    pub repror: Option<String>,
    /// 보유주식등의 수
    #[serde(default)]
    pub stkqy: Option<String>,
    /// 보유주식등의 증감
    #[serde(default)]
    pub stkqy_irds: Option<String>,
    /// 보유비율
    #[serde(default)]
    pub stkrt: Option<String>,
    /// 보유비율 증감
    #[serde(default)]
    pub stkrt_irds: Option<String>,
    /// 주요체결 주식등의 수
    #[serde(default)]
    pub ctr_stkqy: Option<String>,
    /// 주요체결 보유비율
    #[serde(default)]
    pub ctr_stkrt: Option<String>,
    /// 보고사유
    #[serde(default)]
    pub report_resn: Option<String>,
}

impl MajorShareholding {
    /// 보유주식등의 수.
    pub fn shares(&self) -> Option<Decimal> {
        parse_amount_opt(&self.stkqy)
    }

    /// 보유비율 (%).
    pub fn holding_ratio(&self) -> Option<Decimal> {
        parse_amount_opt(&self.stkrt)
    }
}

impl TableRow for MajorShareholding {
    const FIELD_NAMES: &'static [&'static str] = &[
        "rcept_no",
        "rcept_dt",
        "corp_code",
        "corp_name",
        "report_tp",
        "repror",
        "stkqy",
        "stkqy_irds",
        "stkrt",
        "stkrt_irds",
        "ctr_stkqy",
        "ctr_stkrt",
        "report_resn",
    ];

    const KOREAN_LABELS: &'static [&'static str] = &[
        "접수번호",
        "접수일자",
        "고유번호",
        "회사명",
        "보고구분",
        "대표보고자",
        "보유주식등의 수",
        "보유주식등의 증감",
        "보유비율",
        "보유비율 증감",
        "주요체결 주식등의 수",
        "주요체결 보유비율",
        "보고사유",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            cell(&self.rcept_no),
            cell(&self.rcept_dt),
            cell(&self.corp_code),
            cell(&self.corp_name),
            cell(&self.report_tp),
            cell(&self.repror),
            amount_cell(self.shares(), &self.stkqy),
            amount_cell(parse_amount_opt(&self.stkqy_irds), &self.stkqy_irds),
            amount_cell(self.holding_ratio(), &self.stkrt),
            amount_cell(parse_amount_opt(&self.stkrt_irds), &self.stkrt_irds),
            amount_cell(parse_amount_opt(&self.ctr_stkqy), &self.ctr_stkqy),
            amount_cell(parse_amount_opt(&self.ctr_stkrt), &self.ctr_stkrt),
            cell(&self.report_resn),
        ]
    }
}

/// 임원ㆍ주요주주 소유보고 한 건.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutiveShareholding {
    #[serde(default)]
    pub rcept_no: Option<String>,
    #[serde(default)]
    pub rcept_dt: Option<String>,
    #[serde(default)]
    pub corp_code: Option<String>,
    #[serde(default)]
    pub corp_name: Option<String>,
    /// 보고자
    #[serde(default)]
    pub repror: Option<String>,
    /// 발행 회사 관계 임원(등기여부)
    #[serde(default)]
    pub isu_exctv_rgist_at: Option<String>,
    /// 발행 회사 관계 임원 직위
    #[serde(default)]
    pub isu_exctv_ofcps: Option<String>,
    /// 발행 회사 관계 주요 주주
    #[serde(default)]
    pub isu_main_shrholdr: Option<String>,
    /// 특정 증권 등 소유 수
    #[serde(default)]
    pub sp_stock_lmp_cnt: Option<String>,
    /// 특정 증권 등 소유 증감 수
    #[serde(default)]
    pub sp_stock_lmp_irds_cnt: Option<String>,
    /// 특정 증권 등 소유 비율
    #[serde(default)]
    pub sp_stock_lmp_rate: Option<String>,
    /// 특정 증권 등 소유 증감 비율
    #[serde(default)]
    pub sp_stock_lmp_irds_rate: Option<String>,
}

impl ExecutiveShareholding {
    /// 특정 증권 등 소유 비율 (%).
    pub fn ownership_ratio(&self) -> Option<Decimal> {
        parse_amount_opt(&self.sp_stock_lmp_rate)
    }
}

impl TableRow for ExecutiveShareholding {
    const FIELD_NAMES: &'static [&'static str] = &[
        "rcept_no",
        "rcept_dt",
        "corp_code",
        "corp_name",
        "repror",
        "isu_exctv_rgist_at",
        "isu_exctv_ofcps",
        "isu_main_shrholdr",
        "sp_stock_lmp_cnt",
        "sp_stock_lmp_irds_cnt",
        "sp_stock_lmp_rate",
        "sp_stock_lmp_irds_rate",
    ];

    const KOREAN_LABELS: &'static [&'static str] = &[
        "접수번호",
        "접수일자",
        "고유번호",
        "회사명",
        "보고자",
        "발행 회사 관계 임원(등기여부)",
        "발행 회사 관계 임원 직위",
        "발행 회사 관계 주요 주주",
        "특정 증권 등 소유 수",
        "특정 증권 등 소유 증감 수",
        "특정 증권 등 소유 비율",
        "특정 증권 등 소유 증감 비율",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            cell(&self.rcept_no),
            cell(&self.rcept_dt),
            cell(&self.corp_code),
            cell(&self.corp_name),
            cell(&self.repror),
            cell(&self.isu_exctv_rgist_at),
            cell(&self.isu_exctv_ofcps),
            cell(&self.isu_main_shrholdr),
            amount_cell(parse_amount_opt(&self.sp_stock_lmp_cnt), &self.sp_stock_lmp_cnt),
            amount_cell(parse_amount_opt(&self.sp_stock_lmp_irds_cnt), &self.sp_stock_lmp_irds_cnt),
            amount_cell(self.ownership_ratio(), &self.sp_stock_lmp_rate),
            amount_cell(parse_amount_opt(&self.sp_stock_lmp_irds_rate), &self.sp_stock_lmp_irds_rate),
        ]
    }
}
