//! 부가 조회 명령: 공시검색, 공시 원문 텍스트, 재무제표, 지분공시.
//!
//! 회사는 고유번호(8자리), 종목코드(6자리), 회사명 중 하나로 지정할 수 있습니다.

use chrono::NaiveDate;
use dart_core::{
    DisclosureFiling, ExecutiveShareholding, FinancialStatementLine, HeaderStyle,
    MajorShareholding, ReportCode, StatementScope, TableRow, CORP_CODE_WIDTH,
};
use dart_data::export::write_lines;
use dart_data::{
    export_table, extract_document_text, CorpCodeSource, CorpDirectory, DartApiClient,
    ExportOptions,
};
use std::path::{Path, PathBuf};
use tracing::info;

use super::directory::fetch_directory;
use super::pipeline::label_suffix;
use crate::config::CollectorConfig;
use crate::error::{CollectorError, PipelineStage};
use crate::Result;

/// 회사 지정자를 고유번호로 바꿉니다.
///
/// 8자리 숫자는 목록 조회 없이 그대로 사용합니다.
pub async fn resolve_corp_code<S>(source: &S, staging_dir: &Path, query: &str) -> Result<String>
where
    S: CorpCodeSource + ?Sized,
{
    let query = query.trim();
    if query.len() == CORP_CODE_WIDTH && query.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(query.to_string());
    }

    let directory = CorpDirectory::new(fetch_directory(source, staging_dir).await?);
    let record = directory
        .resolve(query)
        .ok_or_else(|| CollectorError::UnknownCompany(query.to_string()))?;

    info!(query, corp_code = %record.corp_code, corp_name = %record.corp_name, "회사 지정자 해석");
    Ok(record.corp_code.clone())
}

/// 조회 결과 산출물 경로 (`YYMMDD_{corp_code}_{kind}_{eng|kor}.csv`).
pub fn report_path(
    output_dir: &Path,
    run_date: NaiveDate,
    corp_code: &str,
    kind: &str,
    style: HeaderStyle,
) -> PathBuf {
    output_dir.join(format!(
        "{}_{}_{}_{}.csv",
        run_date.format("%y%m%d"),
        corp_code,
        kind,
        label_suffix(style)
    ))
}

/// 조회 결과를 설정된 헤더 언어로 저장합니다.
pub fn export_report<R: TableRow>(
    config: &CollectorConfig,
    rows: &[R],
    run_date: NaiveDate,
    corp_code: &str,
    kind: &str,
) -> Result<PathBuf> {
    let style = config.header_style;
    let path = report_path(&config.output_dir, run_date, corp_code, kind, style);

    export_table(&path, rows, style.labels::<R>(), &ExportOptions::default())
        .map_err(CollectorError::at(PipelineStage::Export))?;
    Ok(path)
}

fn report_error(e: dart_data::DataError) -> CollectorError {
    CollectorError::at(PipelineStage::Report)(e)
}

/// 공시검색 결과 저장.
pub async fn export_disclosures(
    client: &DartApiClient,
    config: &CollectorConfig,
    corp_code: &str,
    bgn_de: &str,
    end_de: &str,
    run_date: NaiveDate,
) -> Result<PathBuf> {
    let filings: Vec<DisclosureFiling> = client
        .search_disclosures(corp_code, bgn_de, end_de)
        .await
        .map_err(report_error)?;
    export_report(config, &filings, run_date, corp_code, "disclosures")
}

/// 공시 원문 텍스트 저장 (`YYMMDD_{rcept_no}_document.txt`).
pub async fn export_document_text(
    client: &DartApiClient,
    config: &CollectorConfig,
    rcept_no: &str,
    run_date: NaiveDate,
) -> Result<PathBuf> {
    let document = client.fetch_document(rcept_no).await.map_err(report_error)?;
    let lines = extract_document_text(&document);

    let path = config.output_dir.join(format!(
        "{}_{}_document.txt",
        run_date.format("%y%m%d"),
        rcept_no
    ));
    write_lines(&path, &lines).map_err(CollectorError::at(PipelineStage::Export))?;
    Ok(path)
}

/// 단일회사 전체 재무제표 저장.
pub async fn export_financial_statements(
    client: &DartApiClient,
    config: &CollectorConfig,
    corp_code: &str,
    bsns_year: i32,
    report: ReportCode,
    scope: StatementScope,
    run_date: NaiveDate,
) -> Result<PathBuf> {
    let lines: Vec<FinancialStatementLine> = client
        .fetch_financial_statements(corp_code, bsns_year, report, scope)
        .await
        .map_err(report_error)?;

    let kind = format!("finstate_{}_{}_{}", bsns_year, report.as_str(), scope.as_str());
    export_report(config, &lines, run_date, corp_code, &kind)
}

/// 대량보유 상황보고 저장.
pub async fn export_major_shareholdings(
    client: &DartApiClient,
    config: &CollectorConfig,
    corp_code: &str,
    run_date: NaiveDate,
) -> Result<PathBuf> {
    let rows: Vec<MajorShareholding> = client
        .fetch_major_shareholdings(corp_code)
        .await
        .map_err(report_error)?;
    export_report(config, &rows, run_date, corp_code, "major_shareholdings")
}

/// 임원·주요주주 소유보고 저장.
pub async fn export_executive_shareholdings(
    client: &DartApiClient,
    config: &CollectorConfig,
    corp_code: &str,
    run_date: NaiveDate,
) -> Result<PathBuf> {
    let rows: Vec<ExecutiveShareholding> = client
        .fetch_executive_shareholdings(corp_code)
        .await
        .map_err(report_error)?;
    export_report(config, &rows, run_date, corp_code, "executive_shareholdings")
}
