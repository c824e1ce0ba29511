//! 상장기업 기업개황 수집 파이프라인.
//!
//! 고유번호 목록 → 상장 회사 선별 → 기업개황 수집 → 식별자 정규화 → 업종 결합 → 산출물 저장.
//!
//! 산출물은 모든 단계가 끝난 뒤에만 쓰므로, 중간 단계에서 실패하면 파일이 생기지 않습니다.

use chrono::NaiveDate;
use dart_core::{CompanyOverview, HeaderStyle, JoinedEntityRecord};
use dart_data::{load_classification_table, stage_table, CompanySource, CorpCodeSource, ExportOptions};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use super::classify::{classify, normalize_results, IntegrityFailure};
use super::directory::{fetch_directory, select_listed};
use super::enrichment::{enrich_entities, EnrichmentFailure, EnrichmentOutcome};
use crate::config::CollectorConfig;
use crate::error::{CollectorError, PipelineStage};
use crate::stats::CollectionStats;
use crate::Result;

/// 파이프라인 실행 결과.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub stats: CollectionStats,
    /// 저장된 산출물 경로
    pub artifacts: Vec<PathBuf>,
    /// 재시도 후에도 수집하지 못한 회사와 사유
    pub enrichment_failures: Vec<EnrichmentFailure>,
    /// 정규화 실패로 제외된 레코드
    pub integrity_failures: Vec<IntegrityFailure>,
    /// 업종 결합에서 제외된 고유번호
    pub unmatched: Vec<String>,
}

/// 헤더 언어별 파일명 접미사.
pub fn label_suffix(style: HeaderStyle) -> &'static str {
    match style {
        HeaderStyle::Machine => "eng",
        HeaderStyle::Korean => "kor",
    }
}

/// 실행일이 들어간 산출물 파일명 (`YYMMDD_listed_companies_{n}_{kind}.csv`).
pub fn artifact_name(run_date: NaiveDate, eligible: usize, kind: &str) -> String {
    format!(
        "{}_listed_companies_{}_{}.csv",
        run_date.format("%y%m%d"),
        eligible,
        kind
    )
}

/// 전체 파이프라인을 실행합니다.
///
/// # Arguments
/// * `directory_source` - 고유번호 압축파일 공급자
/// * `company_source` - 기업개황 공급자
/// * `config` - 수집 설정
/// * `run_date` - 산출물 파일명에 들어갈 실행일
pub async fn run_company_pipeline<D, C>(
    directory_source: &D,
    company_source: &C,
    config: &CollectorConfig,
    run_date: NaiveDate,
) -> Result<PipelineReport>
where
    D: CorpCodeSource + ?Sized,
    C: CompanySource + ?Sized,
{
    let started = Instant::now();
    let mut stats = CollectionStats::new();

    // 1. 고유번호 목록
    info!("Step 1/5: 고유번호 목록 수집");
    let directory = fetch_directory(directory_source, &config.staging_dir).await?;
    stats.directory = directory.len();

    // 2. 상장 회사 선별
    info!("Step 2/5: 상장 회사 선별");
    let eligible = select_listed(&directory, config.absence_policy);
    stats.eligible = eligible.len();
    drop(directory);

    // 참조 파일은 오래 걸리는 수집 전에 읽어 둔다
    let table = load_classification_table(&config.reference.path, &config.reference.options)
        .map_err(CollectorError::at(PipelineStage::ReferenceLoad))?;

    // 3. 기업개황 수집
    info!("Step 3/5: 기업개황 수집");
    let results = enrich_entities(company_source, &eligible, &config.enrichment).await?;
    for result in &results {
        match &result.outcome {
            EnrichmentOutcome::Record(record) if record.is_success() => stats.success += 1,
            EnrichmentOutcome::Record(_) => stats.upstream_errors += 1,
            EnrichmentOutcome::Failed { .. } => stats.failed += 1,
        }
    }
    let enrichment_failures: Vec<EnrichmentFailure> =
        results.iter().filter_map(|r| r.failure()).collect();

    // 4. 식별자 정규화
    info!("Step 4/5: 식별자 정규화 및 업종 결합");
    let batch = normalize_results(&results, config.strict_integrity)?;
    stats.integrity_errors = batch.failures.len();

    let successful: Vec<CompanyOverview> = batch
        .records
        .iter()
        .filter(|r| r.is_success())
        .cloned()
        .collect();
    let outcome = classify(&successful, &table);
    stats.unmatched = outcome.unmatched.len();

    // 5. 산출물 저장 (모두 쓴 뒤에 한꺼번에 옮긴다)
    info!("Step 5/5: 산출물 저장");
    let options = ExportOptions::default();
    let style = config.header_style;

    let classified = stage_table(
        config
            .output_dir
            .join(artifact_name(run_date, eligible.len(), "classified")),
        &outcome.joined,
        style.labels::<JoinedEntityRecord>(),
        &options,
    )
    .map_err(CollectorError::at(PipelineStage::Export))?;

    let overview = if config.export_overview {
        let kind = format!("overview_{}", label_suffix(style));
        let path = config.output_dir.join(artifact_name(run_date, eligible.len(), &kind));
        let staged = stage_table(path, &batch.records, style.labels::<CompanyOverview>(), &options)
            .map_err(CollectorError::at(PipelineStage::Export))?;
        Some(staged)
    } else {
        None
    };

    stats.exported = classified.rows();
    let classified_path = classified
        .commit()
        .map_err(CollectorError::at(PipelineStage::Export))?;

    let mut artifacts = Vec::new();
    if let Some(staged) = overview {
        let path = staged
            .commit()
            .map_err(CollectorError::at(PipelineStage::Export))?;
        artifacts.push(path);
    }
    artifacts.push(classified_path);

    stats.elapsed = started.elapsed();
    stats.log_summary("상장기업 기업개황 수집");

    Ok(PipelineReport {
        stats,
        artifacts,
        enrichment_failures,
        integrity_failures: batch.failures,
        unmatched: outcome.unmatched,
    })
}
