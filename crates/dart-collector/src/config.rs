//! 환경변수 기반 설정 모듈.

use dart_core::{AbsencePolicy, HeaderStyle};
use dart_data::provider::DEFAULT_BASE_URL;
use dart_data::ReferenceTableOptions;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CollectorError;
use crate::Result;

/// Collector 전체 설정
#[derive(Debug)]
pub struct CollectorConfig {
    /// OpenDART 인증키
    pub api_key: SecretString,
    /// OpenDART 주소
    pub base_url: String,
    /// 고유번호 목록 압축 해제 디렉토리
    pub staging_dir: PathBuf,
    /// 산출물 디렉토리
    pub output_dir: PathBuf,
    /// 표준산업분류 참조 파일
    pub reference: ReferenceConfig,
    /// 기업개황 수집 설정
    pub enrichment: EnrichmentConfig,
    /// 상장 여부 판정 정책
    pub absence_policy: AbsencePolicy,
    /// 기업개황 원본 산출물도 함께 저장
    pub export_overview: bool,
    /// 식별자 정규화 실패 시 전체 중단
    pub strict_integrity: bool,
    /// 산출물 헤더 언어
    pub header_style: HeaderStyle,
}

/// 표준산업분류 참조 파일 설정
#[derive(Debug, Clone)]
pub struct ReferenceConfig {
    /// 파일 경로
    pub path: PathBuf,
    /// 읽기 옵션 (인코딩, 컬럼명)
    pub options: ReferenceTableOptions,
}

/// 기업개황 수집 설정
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// 동시 요청 수
    pub concurrency: usize,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 재시도 횟수
    pub max_retries: u32,
    /// 재시도 기본 대기 (밀리초)
    pub retry_backoff_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            request_timeout_secs: 30,
            max_retries: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("DART_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CollectorError::Config("DART_API_KEY 환경변수가 설정되지 않았습니다".to_string())
            })?;

        let absence_policy = env_var_enum("DART_ABSENCE_POLICY", AbsencePolicy::default())?;

        let defaults = ReferenceTableOptions::default();
        let enrichment_defaults = EnrichmentConfig::default();

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url: env_var_string("DART_BASE_URL", DEFAULT_BASE_URL),
            staging_dir: PathBuf::from(env_var_string("DART_STAGING_DIR", "corp_num")),
            output_dir: PathBuf::from(env_var_string("DART_OUTPUT_DIR", "output")),
            reference: ReferenceConfig {
                path: PathBuf::from(env_var_string("DART_INDUSTRY_TABLE", "industry_codes.csv")),
                options: ReferenceTableOptions {
                    encoding: env_var_string("DART_INDUSTRY_ENCODING", &defaults.encoding),
                    code_column: env_var_string("DART_INDUSTRY_CODE_COLUMN", &defaults.code_column),
                    name_column: env_var_string("DART_INDUSTRY_NAME_COLUMN", &defaults.name_column),
                    delimiter: defaults.delimiter,
                },
            },
            enrichment: EnrichmentConfig {
                concurrency: env_var_parse("DART_ENRICH_CONCURRENCY", enrichment_defaults.concurrency)
                    .max(1),
                request_timeout_secs: env_var_parse(
                    "DART_REQUEST_TIMEOUT_SECS",
                    enrichment_defaults.request_timeout_secs,
                ),
                max_retries: env_var_parse("DART_MAX_RETRIES", enrichment_defaults.max_retries),
                retry_backoff_ms: env_var_parse(
                    "DART_RETRY_BACKOFF_MS",
                    enrichment_defaults.retry_backoff_ms,
                ),
            },
            absence_policy,
            export_overview: env_var_bool("DART_EXPORT_OVERVIEW", true),
            strict_integrity: env_var_bool("DART_STRICT_INTEGRITY", false),
            header_style: if env_var_bool("DART_KOREAN_LABELS", true) {
                HeaderStyle::Korean
            } else {
                HeaderStyle::Machine
            },
        })
    }
}

impl EnrichmentConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `attempt`번째 재시도 전 대기 시간 (지수 백오프)
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(1u64 << attempt.min(16)))
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// 환경변수에서 bool 값 파싱
fn env_var_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

/// 환경변수 문자열 (비어 있으면 기본값)
fn env_var_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// 열거형 환경변수 파싱 (알 수 없는 값은 설정 오류)
fn env_var_enum<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .parse()
            .map_err(|e| CollectorError::Config(format!("{}: {}", key, e))),
        _ => Ok(default),
    }
}
