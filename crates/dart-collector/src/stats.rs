//! 수집 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 수집 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 고유번호 목록 전체 건수
    pub directory: usize,
    /// 상장 회사 (수집 대상) 수
    pub eligible: usize,
    /// 기업개황 정상 응답 수
    pub success: usize,
    /// 에러 코드 응답 수 (레코드는 유지)
    pub upstream_errors: usize,
    /// 재시도 후에도 실패한 요청 수
    pub failed: usize,
    /// 식별자 정규화 실패 수
    pub integrity_errors: usize,
    /// 업종코드 결합 실패 수
    pub unmatched: usize,
    /// 최종 산출물 행 수
    pub exported: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 기업개황 수집 시도 수
    pub fn total(&self) -> usize {
        self.success + self.upstream_errors + self.failed
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.success as f64 / total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            directory = self.directory,
            eligible = self.eligible,
            success = self.success,
            upstream_errors = self.upstream_errors,
            failed = self.failed,
            integrity_errors = self.integrity_errors,
            unmatched = self.unmatched,
            exported = self.exported,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}
