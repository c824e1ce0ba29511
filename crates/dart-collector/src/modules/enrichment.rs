//! 기업개황 수집 모듈.
//!
//! 상장 회사마다 `company.json`을 한 번씩 호출합니다.
//!
//! - 동시 요청 수는 `concurrency`로 제한하고 결과는 입력 순서를 유지합니다.
//! - 200 응답 안의 에러 코드(013, 100, 800 등)는 레코드 그대로 남깁니다.
//! - 인증 실패(010/011/012/901)는 배치 전체를 즉시 중단합니다.
//! - 네트워크 오류, 5xx/429, 요청 제한(020)은 지수 백오프로 재시도한 뒤 실패로 기록합니다.

use dart_core::CompanyOverview;
use dart_data::CompanySource;
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

use crate::config::EnrichmentConfig;
use crate::error::{CollectorError, PipelineStage};
use crate::Result;

/// 진행 로그 간격 (건)
const PROGRESS_LOG_INTERVAL: usize = 100;

/// 회사 하나의 수집 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentOutcome {
    /// 응답 레코드 (에러 코드 응답 포함)
    Record(CompanyOverview),
    /// 재시도 후에도 전송 실패
    Failed { reason: String },
}

/// 재시도 후에도 수집하지 못한 회사.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentFailure {
    pub corp_code: String,
    /// 마지막 시도의 에러 메시지
    pub reason: String,
}

/// 입력 고유번호와 수집 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentResult {
    pub corp_code: String,
    pub outcome: EnrichmentOutcome,
}

impl EnrichmentResult {
    /// 응답 레코드 (실패면 `None`)
    pub fn record(&self) -> Option<&CompanyOverview> {
        match &self.outcome {
            EnrichmentOutcome::Record(record) => Some(record),
            EnrichmentOutcome::Failed { .. } => None,
        }
    }

    /// 전송 실패 기록 (레코드가 있으면 `None`)
    pub fn failure(&self) -> Option<EnrichmentFailure> {
        match &self.outcome {
            EnrichmentOutcome::Record(_) => None,
            EnrichmentOutcome::Failed { reason } => Some(EnrichmentFailure {
                corp_code: self.corp_code.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

/// 고유번호 목록의 기업개황을 수집합니다.
///
/// # Returns
/// 입력과 같은 순서의 결과 목록. 인증 실패 시 `Err`.
pub async fn enrich_entities<S>(
    source: &S,
    corp_codes: &[String],
    config: &EnrichmentConfig,
) -> Result<Vec<EnrichmentResult>>
where
    S: CompanySource + ?Sized,
{
    let total = corp_codes.len();
    info!(total, concurrency = config.concurrency, "기업개황 수집 시작");

    let progress = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        progress.set_style(style.progress_chars("#>-"));
    }

    let completed = AtomicUsize::new(0);
    let progress_ref = &progress;
    let completed_ref = &completed;

    let results = stream::iter(corp_codes)
        .map(move |corp_code| async move {
            let result = fetch_with_retry(source, corp_code, config).await;

            progress_ref.inc(1);
            let done = completed_ref.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_LOG_INTERVAL == 0 {
                info!(done, total, "기업개황 수집 진행 중");
            }
            result
        })
        .buffered(config.concurrency.max(1))
        .try_collect::<Vec<_>>()
        .await;

    progress.finish_and_clear();
    results
}

async fn fetch_with_retry<S>(
    source: &S,
    corp_code: &str,
    config: &EnrichmentConfig,
) -> Result<EnrichmentResult>
where
    S: CompanySource + ?Sized,
{
    let mut attempt: u32 = 0;

    loop {
        match source.fetch_company(corp_code).await {
            Ok(record) => {
                return Ok(EnrichmentResult {
                    corp_code: corp_code.to_string(),
                    outcome: EnrichmentOutcome::Record(record),
                })
            }
            Err(e) if e.is_fatal() => {
                return Err(CollectorError::at(PipelineStage::Enrichment)(e));
            }
            Err(e) if e.is_retryable() && attempt < config.max_retries => {
                let delay = config.backoff(attempt);
                debug!(corp_code, attempt, delay_ms = delay.as_millis() as u64, error = %e, "재시도 대기");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(corp_code, attempts = attempt + 1, error = %e, "기업개황 수집 실패");
                return Ok(EnrichmentResult {
                    corp_code: corp_code.to_string(),
                    outcome: EnrichmentOutcome::Failed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }
}
