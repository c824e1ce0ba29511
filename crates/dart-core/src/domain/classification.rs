//! 표준산업분류 테이블과 업종코드 결합.
//!
//! 표준산업분류코드에는 숫자 코드(세분류)와 알파벳 코드(A~U 대분류)가 섞여 있습니다.
//! 기업개황의 업종코드는 숫자 코드만 사용하므로 알파벳 코드는 결합 대상에서 제외합니다.
//! 결합 키는 양쪽 모두 정수로 맞춥니다 (`"01"`과 `1`은 같은 키).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::company::CompanyOverview;
use super::table::TableRow;

/// 숫자로만 된 업종코드를 정수 키로 변환합니다.
pub fn parse_industry_code(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// 표준산업분류 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryClassificationEntry {
    /// 산업분류코드 (정수화)
    pub code: u32,
    /// 산업분류명칭
    pub name: String,
}

/// 결합에 사용하는 표준산업분류 테이블.
#[derive(Debug, Clone, Default)]
pub struct ClassificationTable {
    entries: HashMap<u32, String>,
    /// 숫자가 아니어서 제외된 행 수
    pub rejected: usize,
    /// 같은 정수 키로 중복되어 무시된 행 수
    pub duplicates: usize,
}

impl ClassificationTable {
    /// 원본 (코드, 명칭) 행으로 테이블을 만듭니다.
    ///
    /// 숫자 코드가 아닌 행은 제외하고, 같은 코드가 다시 나오면 처음 값을 유지합니다.
    pub fn from_rows<I, C, N>(rows: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: AsRef<str>,
        N: Into<String>,
    {
        let mut table = Self::default();

        for (code, name) in rows {
            let Some(key) = parse_industry_code(code.as_ref()) else {
                table.rejected += 1;
                continue;
            };

            if table.entries.contains_key(&key) {
                tracing::debug!(code = code.as_ref(), "중복 산업분류코드 무시");
                table.duplicates += 1;
                continue;
            }
            table.entries.insert(key, name.into());
        }

        table
    }

    /// 결합 대상 코드 수.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 코드로 명칭을 조회합니다.
    pub fn name_of(&self, code: u32) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    /// 코드 오름차순 항목 목록.
    pub fn entries(&self) -> Vec<IndustryClassificationEntry> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(code, name)| IndustryClassificationEntry {
                code: *code,
                name: name.clone(),
            })
            .collect();
        entries.sort_by_key(|e| e.code);
        entries
    }
}

/// 산업분류명칭이 붙은 기업개황.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedEntityRecord {
    /// 기업개황
    #[serde(flatten)]
    pub company: CompanyOverview,
    /// 결합 키 (정수 업종코드)
    #[serde(skip)]
    pub industry_code: u32,
    /// 산업분류명칭
    pub industry_name: String,
}

/// 결합 결과.
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    /// 매칭된 레코드 (입력 순서 유지)
    pub joined: Vec<JoinedEntityRecord>,
    /// 업종코드가 없거나 테이블에 없는 레코드의 고유번호
    pub unmatched: Vec<String>,
}

/// 기업개황과 표준산업분류 테이블의 내부 결합(inner join).
///
/// 업종코드가 없거나, 숫자가 아니거나, 테이블에 없는 레코드는 결과에서 빠지고
/// `unmatched`에 고유번호만 남습니다.
pub fn join_classification<I>(records: I, table: &ClassificationTable) -> JoinOutcome
where
    I: IntoIterator<Item = CompanyOverview>,
{
    let mut outcome = JoinOutcome::default();

    for company in records {
        let matched = company
            .industry_key()
            .and_then(|code| table.name_of(code).map(|name| (code, name.to_string())));

        match matched {
            Some((industry_code, industry_name)) => outcome.joined.push(JoinedEntityRecord {
                company,
                industry_code,
                industry_name,
            }),
            None => outcome
                .unmatched
                .push(company.corp_code.clone().unwrap_or_default()),
        }
    }

    outcome
}

impl TableRow for JoinedEntityRecord {
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
        "industry_name",
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
        "산업분류명칭",
    ];

    fn values(&self) -> Vec<String> {
        let mut values = self.company.values();
        values.push(self.industry_name.clone());
        values
    }
}
