//! 수집 파이프라인 통합 테스트.
//!
//! 네트워크 단계는 가짜 공급자로 대체합니다:
//! - 고유번호 압축파일: 메모리에서 만든 ZIP
//! - 기업개황: 고유번호별로 미리 정한 응답 순서

use async_trait::async_trait;
use chrono::NaiveDate;
use dart_collector::config::{EnrichmentConfig, ReferenceConfig};
use dart_collector::modules::{
    enrich_entities, resolve_corp_code, run_company_pipeline, EnrichmentOutcome,
};
use dart_collector::{CollectorConfig, CollectorError};
use dart_core::{AbsencePolicy, CompanyOverview, HeaderStyle};
use dart_data::{CompanySource, CorpCodeSource, DataError, ReferenceTableOptions};
use secrecy::SecretString;
use std::collections::{HashMap, VecDeque};
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// 테스트 헬퍼 함수
// ============================================================================

struct FakeDirectory {
    archive: Vec<u8>,
}

impl FakeDirectory {
    fn new(entries: &[(&str, &str, &str)]) -> Self {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<result>\n");
        for (corp_code, corp_name, stock_code) in entries {
            xml.push_str(&format!(
                "<list><corp_code>{}</corp_code><corp_name>{}</corp_name>\
                 <stock_code>{}</stock_code><modify_date>20230101</modify_date></list>\n",
                corp_code, corp_name, stock_code
            ));
        }
        xml.push_str("</result>");

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("CORPCODE.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        Self {
            archive: writer.finish().unwrap().into_inner(),
        }
    }
}

#[async_trait]
impl CorpCodeSource for FakeDirectory {
    async fn fetch_corp_code_archive(&self) -> dart_data::Result<Vec<u8>> {
        Ok(self.archive.clone())
    }
}

type Reply = Box<dyn Fn() -> dart_data::Result<CompanyOverview> + Send + Sync>;

/// 고유번호별 응답 큐. 마지막 응답은 계속 반복된다.
#[derive(Default)]
struct FakeCompanies {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl FakeCompanies {
    fn reply(mut self, corp_code: &str, reply: Reply) -> Self {
        self.replies
            .get_mut()
            .unwrap()
            .entry(corp_code.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    fn delay(mut self, corp_code: &str, delay: Duration) -> Self {
        self.delays.insert(corp_code.to_string(), delay);
        self
    }
}

#[async_trait]
impl CompanySource for FakeCompanies {
    async fn fetch_company(&self, corp_code: &str) -> dart_data::Result<CompanyOverview> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(corp_code) {
            tokio::time::sleep(*delay).await;
        }

        let mut replies = self.replies.lock().unwrap();
        let queue = replies
            .get_mut(corp_code)
            .unwrap_or_else(|| panic!("unexpected corp_code {corp_code}"));
        if queue.len() > 1 {
            let reply = queue.pop_front().unwrap();
            reply()
        } else {
            queue.front().unwrap()()
        }
    }
}

fn ok(corp_code: &'static str, stock_code: &'static str, induty_code: &'static str) -> Reply {
    Box::new(move || {
        Ok(CompanyOverview {
            status: "000".to_string(),
            message: "정상".to_string(),
            corp_code: Some(corp_code.to_string()),
            corp_name: Some(format!("회사{}", corp_code)),
            stock_code: Some(stock_code.to_string()),
            induty_code: Some(induty_code.to_string()),
            ..Default::default()
        })
    })
}

fn upstream(status: &'static str) -> Reply {
    Box::new(move || {
        Ok(CompanyOverview {
            status: status.to_string(),
            message: "조회된 데이타가 없습니다.".to_string(),
            ..Default::default()
        })
    })
}

fn fail(error: fn() -> DataError) -> Reply {
    Box::new(move || Err(error()))
}

fn unavailable() -> DataError {
    DataError::Http {
        status: 503,
        body: String::new(),
    }
}

fn unauthorized() -> DataError {
    DataError::from_status("010", "등록되지 않은 키입니다.")
}

fn fast_retry() -> EnrichmentConfig {
    EnrichmentConfig {
        concurrency: 4,
        request_timeout_secs: 5,
        max_retries: 3,
        retry_backoff_ms: 1,
    }
}

fn config(root: &Path) -> CollectorConfig {
    let reference = root.join("industry_codes.csv");
    std::fs::write(
        &reference,
        "산업분류코드,산업분류명칭\nA,농업 임업 및 어업\n01,농업\n02,임업\n",
    )
    .unwrap();

    CollectorConfig {
        api_key: SecretString::from("test-key".to_string()),
        base_url: "http://localhost".to_string(),
        staging_dir: root.join("corp_num"),
        output_dir: root.join("output"),
        reference: ReferenceConfig {
            path: reference,
            options: ReferenceTableOptions {
                encoding: "utf-8".to_string(),
                ..Default::default()
            },
        },
        enrichment: fast_retry(),
        absence_policy: AbsencePolicy::Blank,
        export_overview: true,
        strict_integrity: false,
        header_style: HeaderStyle::Machine,
    }
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 2, 5).unwrap()
}

fn sample_directory() -> FakeDirectory {
    FakeDirectory::new(&[
        ("00000001", "비상장A", " "),
        ("00000002", "에스케이하이닉스(주)", "000660"),
        ("00000003", "비상장B", ""),
        ("00000004", "삼성전자(주)", "005930"),
        ("00000005", "정보없음", "123456"),
    ])
}

// ============================================================================
// 파이프라인
// ============================================================================

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    let companies = FakeCompanies::default()
        .reply("00000002", ok("164779", "660", "01"))
        .reply("00000004", ok("00126380", "005930", "03"))
        .reply("00000005", upstream("013"));

    let report = run_company_pipeline(&sample_directory(), &companies, &config, run_date())
        .await
        .unwrap();

    let stats = &report.stats;
    assert_eq!(stats.directory, 5);
    assert_eq!(stats.eligible, 3);
    assert_eq!(stats.success, 2);
    assert_eq!(stats.upstream_errors, 1);
    assert_eq!(stats.failed, 0);
    assert!(report.enrichment_failures.is_empty());
    assert_eq!(stats.unmatched, 1);
    assert_eq!(stats.exported, 1);
    assert_eq!(report.unmatched, vec!["00126380".to_string()]);

    assert_eq!(report.artifacts.len(), 2);
    let overview = root
        .path()
        .join("output")
        .join("230205_listed_companies_3_overview_eng.csv");
    let classified = root
        .path()
        .join("output")
        .join("230205_listed_companies_3_classified.csv");
    assert_eq!(report.artifacts, vec![overview.clone(), classified.clone()]);

    // 에러 코드 응답도 원본 산출물에는 남는다
    let overview_text = std::fs::read_to_string(&overview).unwrap();
    assert_eq!(overview_text.lines().count(), 4);
    assert!(overview_text.contains("013"));

    let classified_text = std::fs::read_to_string(&classified).unwrap();
    let rows: Vec<&str> = classified_text.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].ends_with("industry_name"));
    assert!(rows[1].contains("00164779"));
    assert!(rows[1].contains("000660"));
    assert!(rows[1].ends_with("농업"));
}

#[tokio::test]
async fn test_pipeline_reports_enrichment_failures() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    let companies = FakeCompanies::default()
        .reply("00000002", ok("00164779", "000660", "01"))
        .reply("00000004", fail(unavailable))
        .reply("00000005", upstream("013"));

    let report = run_company_pipeline(&sample_directory(), &companies, &config, run_date())
        .await
        .unwrap();

    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.enrichment_failures.len(), 1);
    let failure = &report.enrichment_failures[0];
    assert_eq!(failure.corp_code, "00000004");
    assert!(failure.reason.contains("503"));

    // 수집 실패는 산출물 행이 되지 않는다
    assert_eq!(report.stats.exported, 1);
    assert_eq!(report.artifacts.len(), 2);
}

#[tokio::test]
async fn test_pipeline_export_failure_leaves_no_artifact() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    // 결합 산출물 자리에 디렉토리가 있으면 옮기기가 실패한다
    let output = root.path().join("output");
    std::fs::create_dir_all(output.join("230205_listed_companies_3_classified.csv")).unwrap();

    let companies = FakeCompanies::default()
        .reply("00000002", ok("00164779", "000660", "01"))
        .reply("00000004", ok("00126380", "005930", "02"))
        .reply("00000005", upstream("013"));

    let err = run_company_pipeline(&sample_directory(), &companies, &config, run_date())
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("[export]"));
    assert!(!output.join("230205_listed_companies_3_overview_eng.csv").exists());
    // 임시 파일도 남지 않는다
    assert_eq!(std::fs::read_dir(&output).unwrap().count(), 1);
}

#[tokio::test]
async fn test_pipeline_aborts_on_authentication_without_artifacts() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    let companies = FakeCompanies::default()
        .reply("00000002", ok("00164779", "000660", "01"))
        .reply("00000004", fail(unauthorized))
        .reply("00000005", upstream("013"));

    let err = run_company_pipeline(&sample_directory(), &companies, &config, run_date())
        .await
        .unwrap_err();

    assert!(err.is_authentication());
    assert!(!root.path().join("output").exists());
}

#[tokio::test]
async fn test_pipeline_strict_integrity() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config(root.path());
    config.strict_integrity = true;

    let companies = FakeCompanies::default()
        .reply("00000002", ok("00164779", "1000660", "01"))
        .reply("00000004", ok("00126380", "005930", "01"))
        .reply("00000005", upstream("013"));

    let err = run_company_pipeline(&sample_directory(), &companies, &config, run_date())
        .await
        .unwrap_err();

    match err {
        CollectorError::Integrity { corp_code, source } => {
            assert_eq!(corp_code, "00000002");
            assert_eq!(source.field(), "stock_code");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!root.path().join("output").exists());
}

#[tokio::test]
async fn test_pipeline_lenient_integrity_excludes_record() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    let companies = FakeCompanies::default()
        .reply("00000002", ok("00164779", "1000660", "01"))
        .reply("00000004", ok("00126380", "005930", "02"))
        .reply("00000005", upstream("013"));

    let report = run_company_pipeline(&sample_directory(), &companies, &config, run_date())
        .await
        .unwrap();

    assert_eq!(report.stats.integrity_errors, 1);
    assert_eq!(report.integrity_failures[0].corp_code, "00000002");
    assert_eq!(report.stats.exported, 1);
}

#[tokio::test]
async fn test_pipeline_missing_reference_fails_before_enrichment() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config(root.path());
    config.reference.path = root.path().join("missing.csv");

    let companies = FakeCompanies::default();
    let err = run_company_pipeline(&sample_directory(), &companies, &config, run_date())
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("[reference-load]"));
    assert_eq!(companies.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// 기업개황 수집
// ============================================================================

#[tokio::test]
async fn test_enrichment_retries_then_records_failure() {
    let companies = FakeCompanies::default()
        .reply("00000001", fail(unavailable))
        .reply("00000001", fail(unavailable))
        .reply("00000001", ok("00000001", "000001", "01"))
        .reply("00000002", fail(unavailable));

    let corp_codes = vec!["00000001".to_string(), "00000002".to_string()];
    let results = enrich_entities(&companies, &corp_codes, &fast_retry())
        .await
        .unwrap();

    assert!(matches!(results[0].outcome, EnrichmentOutcome::Record(_)));
    assert!(matches!(results[1].outcome, EnrichmentOutcome::Failed { .. }));
    // 3회(성공까지) + 4회(최초 1 + 재시도 3)
    assert_eq!(companies.calls.load(Ordering::SeqCst), 7);
}

#[tokio::test]
async fn test_enrichment_preserves_input_order() {
    let mut companies = FakeCompanies::default();
    let corp_codes: Vec<String> = (1..=8).map(|i| format!("{:08}", i)).collect();
    for (i, code) in corp_codes.iter().enumerate() {
        let leaked: &'static str = Box::leak(code.clone().into_boxed_str());
        companies = companies
            .reply(code, ok(leaked, "000001", "01"))
            .delay(code, Duration::from_millis(40 - 5 * i as u64));
    }

    let results = enrich_entities(&companies, &corp_codes, &fast_retry())
        .await
        .unwrap();

    let order: Vec<&str> = results.iter().map(|r| r.corp_code.as_str()).collect();
    assert_eq!(order, corp_codes.iter().map(String::as_str).collect::<Vec<_>>());
    for result in &results {
        assert_eq!(
            result.record().and_then(|r| r.corp_code.as_deref()),
            Some(result.corp_code.as_str())
        );
    }
}

#[tokio::test]
async fn test_enrichment_keeps_error_coded_records() {
    let companies = FakeCompanies::default().reply("00000009", upstream("100"));
    let results = enrich_entities(&companies, &["00000009".to_string()], &fast_retry())
        .await
        .unwrap();

    let record = results[0].record().unwrap();
    assert_eq!(record.status, "100");
    assert_eq!(record.message, "조회된 데이타가 없습니다.");
}

// ============================================================================
// 회사 지정자 해석
// ============================================================================

#[tokio::test]
async fn test_resolve_corp_code() {
    let staging = tempfile::tempdir().unwrap();
    let directory = sample_directory();

    assert_eq!(
        resolve_corp_code(&directory, staging.path(), "00000004").await.unwrap(),
        "00000004"
    );
    assert_eq!(
        resolve_corp_code(&directory, staging.path(), "000660").await.unwrap(),
        "00000002"
    );
    assert_eq!(
        resolve_corp_code(&directory, staging.path(), "삼성전자(주)").await.unwrap(),
        "00000004"
    );
    assert!(matches!(
        resolve_corp_code(&directory, staging.path(), "없는회사").await,
        Err(CollectorError::UnknownCompany(_))
    ));
}
