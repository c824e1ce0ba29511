//! 식별자 정규화 및 업종 결합 단계.

use dart_core::{join_classification, ClassificationTable, CompanyOverview, IntegrityError, JoinOutcome};
use tracing::{info, warn};

use super::enrichment::EnrichmentResult;
use crate::error::CollectorError;
use crate::Result;

/// 정규화 실패 기록.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityFailure {
    /// 입력 고유번호
    pub corp_code: String,
    pub error: IntegrityError,
}

/// 정규화 단계 결과.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// 정규화된 레코드 (에러 코드 응답 포함, 입력 순서)
    pub records: Vec<CompanyOverview>,
    /// 정규화에 실패해 제외된 레코드
    pub failures: Vec<IntegrityFailure>,
    /// 전송 실패로 레코드가 없는 수
    pub missing: usize,
}

/// 수집 결과의 고유번호/종목코드를 고정 폭으로 맞춥니다.
///
/// `strict`이면 첫 실패에서 중단하고, 아니면 실패한 레코드를 제외하고 기록합니다.
pub fn normalize_results(results: &[EnrichmentResult], strict: bool) -> Result<NormalizedBatch> {
    let mut batch = NormalizedBatch::default();

    for result in results {
        let Some(record) = result.record() else {
            batch.missing += 1;
            continue;
        };

        match record.normalized() {
            Ok(normalized) => batch.records.push(normalized),
            Err(error) if strict => {
                return Err(CollectorError::Integrity {
                    corp_code: result.corp_code.clone(),
                    source: error,
                });
            }
            Err(error) => {
                warn!(
                    corp_code = %result.corp_code,
                    field = error.field(),
                    error = %error,
                    "식별자 정규화 실패, 레코드 제외"
                );
                batch.failures.push(IntegrityFailure {
                    corp_code: result.corp_code.clone(),
                    error,
                });
            }
        }
    }

    info!(
        normalized = batch.records.len(),
        failures = batch.failures.len(),
        missing = batch.missing,
        "식별자 정규화 완료"
    );
    Ok(batch)
}

/// 표준산업분류 테이블과 내부 결합합니다.
///
/// 결합되지 않은 레코드 수는 `warn`으로 남깁니다.
pub fn classify(records: &[CompanyOverview], table: &ClassificationTable) -> JoinOutcome {
    let outcome = join_classification(records.iter().cloned(), table);

    if !outcome.unmatched.is_empty() {
        warn!(
            unmatched = outcome.unmatched.len(),
            joined = outcome.joined.len(),
            "업종코드가 참조 테이블에 없어 제외된 회사가 있습니다"
        );
    }
    info!(joined = outcome.joined.len(), "업종 결합 완료");
    outcome
}
