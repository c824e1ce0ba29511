//! 고유번호 목록 레코드와 상장 여부 판정.
//!
//! OpenDART 고유번호 목록(`CORPCODE.xml`)은 비상장 회사의 종목코드를 공백 한 칸(`" "`)으로
//! 채웁니다. 그러나 같은 "없음"이 빈 문자열이나 여러 칸의 공백으로 오는 경우도 있어서,
//! 부재 판정은 명시적인 정책([`AbsencePolicy`])으로 분리합니다.

use serde::{Deserialize, Serialize};

/// 고유번호 목록의 한 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDirectoryRecord {
    /// 고유번호 (8자리)
    pub corp_code: String,
    /// 정식 회사명
    pub corp_name: String,
    /// 영문 회사명
    pub corp_eng_name: Option<String>,
    /// 종목코드 원본 값 (비상장이면 공백 자리표시자)
    pub stock_code: String,
    /// 최종 변경일자 (YYYYMMDD)
    pub modify_date: Option<String>,
}

/// 종목코드 부재 판정 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsencePolicy {
    /// 빈 문자열이나 공백만으로 이루어진 값은 모두 부재로 간주 (기본값)
    #[default]
    Blank,
    /// 정확히 공백 한 칸(`" "`)만 부재로 간주
    ///
    /// 빈 문자열이나 두 칸 이상의 공백은 "있음"으로 판정되므로 비상장 회사가
    /// 섞일 수 있습니다.
    SingleSpace,
}

impl std::str::FromStr for AbsencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blank" => Ok(Self::Blank),
            "single-space" | "single_space" => Ok(Self::SingleSpace),
            _ => Err(format!("Unknown absence policy: {}", s)),
        }
    }
}

impl AbsencePolicy {
    /// 종목코드 값이 부재인지 판정합니다.
    pub fn is_absent(&self, field: &str) -> bool {
        match self {
            Self::Blank => field.trim().is_empty(),
            Self::SingleSpace => field == " ",
        }
    }
}

impl EntityDirectoryRecord {
    /// 정책에 따라 종목코드가 있는(상장) 회사인지 확인합니다.
    pub fn is_listed(&self, policy: AbsencePolicy) -> bool {
        !policy.is_absent(&self.stock_code)
    }
}

/// 종목코드가 있는 회사의 고유번호만 입력 순서대로 추립니다.
pub fn eligible_corp_codes<'a, I>(records: I, policy: AbsencePolicy) -> Vec<String>
where
    I: IntoIterator<Item = &'a EntityDirectoryRecord>,
{
    records
        .into_iter()
        .filter(|r| r.is_listed(policy))
        .map(|r| r.corp_code.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(corp_code: &str, stock_code: &str) -> EntityDirectoryRecord {
        EntityDirectoryRecord {
            corp_code: corp_code.to_string(),
            corp_name: format!("회사{}", corp_code),
            corp_eng_name: None,
            stock_code: stock_code.to_string(),
            modify_date: None,
        }
    }

    #[test]
    fn test_blank_policy() {
        let policy = AbsencePolicy::Blank;
        assert!(policy.is_absent(" "));
        assert!(policy.is_absent(""));
        assert!(policy.is_absent("   "));
        assert!(policy.is_absent("\t"));
        assert!(!policy.is_absent("000660"));
    }

    #[test]
    fn test_single_space_policy() {
        let policy = AbsencePolicy::SingleSpace;
        assert!(policy.is_absent(" "));
        assert!(!policy.is_absent(""));
        assert!(!policy.is_absent("  "));
        assert!(!policy.is_absent("000660"));
    }

    #[test]
    fn test_eligible_corp_codes_under_both_policies() {
        let directory = vec![record("1", " "), record("2", "000660"), record("3", "")];

        assert_eq!(
            eligible_corp_codes(&directory, AbsencePolicy::Blank),
            vec!["2"]
        );
        // 공백 한 칸만 부재로 보면 빈 문자열인 3번이 상장 회사로 섞여 들어온다
        assert_eq!(
            eligible_corp_codes(&directory, AbsencePolicy::SingleSpace),
            vec!["2", "3"]
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("blank".parse::<AbsencePolicy>().unwrap(), AbsencePolicy::Blank);
        assert_eq!(
            "single-space".parse::<AbsencePolicy>().unwrap(),
            AbsencePolicy::SingleSpace
        );
        assert!("none".parse::<AbsencePolicy>().is_err());
    }
}
