//! 에러 타입 정의.

use dart_core::IntegrityError;
use dart_data::DataError;
use std::fmt;

/// 파이프라인 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// 고유번호 압축파일 수신/해제
    DirectoryFetch,
    /// 고유번호 목록 파싱
    ListingParse,
    /// 기업개황 수집
    Enrichment,
    /// 표준산업분류 참조 파일 로드
    ReferenceLoad,
    /// 산출물 저장
    Export,
    /// 부가 조회 (공시검색, 재무제표 등)
    Report,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DirectoryFetch => "directory-fetch",
            Self::ListingParse => "listing-parse",
            Self::Enrichment => "enrichment",
            Self::ReferenceLoad => "reference-load",
            Self::Export => "export",
            Self::Report => "report",
        };
        f.write_str(name)
    }
}

/// Collector 에러 타입
#[derive(Debug)]
pub enum CollectorError {
    /// 특정 단계에서 발생한 데이터 에러
    Stage {
        stage: PipelineStage,
        source: DataError,
    },
    /// 설정 에러
    Config(String),
    /// 식별자 무결성 에러 (엄격 모드)
    Integrity {
        corp_code: String,
        source: IntegrityError,
    },
    /// 회사 지정자를 해석할 수 없음
    UnknownCompany(String),
}

impl CollectorError {
    /// 단계 태그를 붙이는 헬퍼 (`map_err(CollectorError::at(stage))`)
    pub fn at(stage: PipelineStage) -> impl FnOnce(DataError) -> Self {
        move |source| Self::Stage { stage, source }
    }

    /// 인증 실패로 중단되었는지 확인
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Stage { source, .. } if source.is_fatal())
    }
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stage { stage, source } => write!(f, "[{}] {}", stage, source),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Integrity { corp_code, source } => {
                write!(f, "Integrity error (corp_code={}): {}", corp_code, source)
            }
            Self::UnknownCompany(query) => write!(f, "Unknown company: {}", query),
        }
    }
}

impl std::error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stage { source, .. } => Some(source),
            Self::Integrity { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::env::VarError> for CollectorError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
