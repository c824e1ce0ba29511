//! OpenDART collector CLI.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dart_collector::modules::{self, resolve_corp_code};
use dart_collector::CollectorConfig;
use dart_core::{init_logging, HeaderStyle, LogConfig, LogFormat, ReportCode, StatementScope};
use dart_data::DartApiClient;
use secrecy::{ExposeSecret, SecretString};

#[derive(Parser)]
#[command(name = "dart-collector")]
#[command(about = "OpenDART listed-company collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (compact, pretty, json)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// 산출물 헤더 언어 (kor, eng). 지정하지 않으면 DART_KOREAN_LABELS를 따름
    #[arg(long)]
    labels: Option<HeaderStyle>,
}

#[derive(Subcommand)]
enum Commands {
    /// 상장기업 기업개황 수집 및 표준산업분류 결합
    Companies,

    /// 공시검색 결과 저장
    Disclosures {
        /// 회사 (고유번호, 종목코드 또는 회사명)
        #[arg(long)]
        company: String,
        /// 검색 시작일 (YYYYMMDD)
        #[arg(long)]
        from: String,
        /// 검색 종료일 (YYYYMMDD)
        #[arg(long)]
        to: String,
    },

    /// 공시서류 원본 텍스트 저장
    Document {
        /// 접수번호 (14자리)
        #[arg(long)]
        rcept_no: String,
    },

    /// 단일회사 전체 재무제표 저장
    Finstate {
        /// 회사 (고유번호, 종목코드 또는 회사명)
        #[arg(long)]
        company: String,
        /// 사업연도
        #[arg(long)]
        year: i32,
        /// 보고서 코드 (11011 사업보고서, 11012 반기, 11013 1분기, 11014 3분기)
        #[arg(long, default_value = "11011")]
        report: ReportCode,
        /// 재무제표 구분 (CFS 연결, OFS 별도)
        #[arg(long, default_value = "CFS")]
        scope: StatementScope,
    },

    /// 대량보유 상황보고 저장
    MajorShareholders {
        /// 회사 (고유번호, 종목코드 또는 회사명)
        #[arg(long)]
        company: String,
    },

    /// 임원·주요주주 소유보고 저장
    ExecShareholders {
        /// 회사 (고유번호, 종목코드 또는 회사명)
        #[arg(long)]
        company: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 로깅 초기화
    let mut log_config = LogConfig::for_crates(&cli.log_level).with_env_format();
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format);
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("OpenDART Collector 시작");

    // 설정 로드
    let mut config = CollectorConfig::from_env()?;
    if let Some(labels) = cli.labels {
        config.header_style = labels;
    }
    tracing::debug!(
        base_url = %config.base_url,
        staging_dir = %config.staging_dir.display(),
        output_dir = %config.output_dir.display(),
        "설정 로드 완료"
    );

    let client = DartApiClient::new(
        SecretString::from(config.api_key.expose_secret().to_string()),
        config.base_url.clone(),
        config.enrichment.request_timeout(),
    )
    .context("HTTP 클라이언트 생성 실패")?;

    let run_date = Local::now().date_naive();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("종료 신호 수신, 산출물 없이 종료합니다");
            anyhow::bail!("사용자 중단");
        }
        result = run(cli.command, &client, &config, run_date) => result?,
    }

    tracing::info!("OpenDART Collector 종료");
    Ok(())
}

async fn run(
    command: Commands,
    client: &DartApiClient,
    config: &CollectorConfig,
    run_date: NaiveDate,
) -> anyhow::Result<()> {
    match command {
        Commands::Companies => {
            let report = modules::run_company_pipeline(client, client, config, run_date).await?;
            for path in &report.artifacts {
                tracing::info!(path = %path.display(), "산출물");
            }
            for failure in &report.enrichment_failures {
                tracing::warn!(
                    corp_code = %failure.corp_code,
                    reason = %failure.reason,
                    "기업개황 수집 실패"
                );
            }
            if !report.integrity_failures.is_empty() {
                tracing::warn!(
                    count = report.integrity_failures.len(),
                    "식별자 정규화 실패 레코드가 제외되었습니다"
                );
            }
        }
        Commands::Disclosures { company, from, to } => {
            let corp_code = resolve_corp_code(client, &config.staging_dir, &company).await?;
            let path =
                modules::export_disclosures(client, config, &corp_code, &from, &to, run_date)
                    .await?;
            tracing::info!(path = %path.display(), "공시검색 결과 저장");
        }
        Commands::Document { rcept_no } => {
            let path = modules::export_document_text(client, config, &rcept_no, run_date).await?;
            tracing::info!(path = %path.display(), "공시 원문 텍스트 저장");
        }
        Commands::Finstate {
            company,
            year,
            report,
            scope,
        } => {
            let corp_code = resolve_corp_code(client, &config.staging_dir, &company).await?;
            let path = modules::export_financial_statements(
                client, config, &corp_code, year, report, scope, run_date,
            )
            .await?;
            tracing::info!(path = %path.display(), "재무제표 저장");
        }
        Commands::MajorShareholders { company } => {
            let corp_code = resolve_corp_code(client, &config.staging_dir, &company).await?;
            let path =
                modules::export_major_shareholdings(client, config, &corp_code, run_date).await?;
            tracing::info!(path = %path.display(), "대량보유 상황보고 저장");
        }
        Commands::ExecShareholders { company } => {
            let corp_code = resolve_corp_code(client, &config.staging_dir, &company).await?;
            let path =
                modules::export_executive_shareholdings(client, config, &corp_code, run_date)
                    .await?;
            tracing::info!(path = %path.display(), "임원·주요주주 소유보고 저장");
        }
    }

    Ok(())
}
