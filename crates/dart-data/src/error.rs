//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// OpenDART 인증 실패로 간주하는 상태 코드.
///
/// - 010: 등록되지 않은 키
/// - 011: 사용할 수 없는 키
/// - 012: 접근할 수 없는 IP
/// - 901: 개인정보 보유기간 만료 계정
pub const AUTH_FAILURE_STATUSES: &[&str] = &["010", "011", "012", "901"];

/// 요청 제한 초과 상태 코드.
pub const RATE_LIMIT_STATUS: &str = "020";

/// 조회된 데이터 없음 상태 코드.
pub const NO_DATA_STATUS: &str = "013";

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크/연결 오류
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 인증키 오류 (재시도 불가)
    #[error("Authentication error [{status}]: {message}")]
    Authentication { status: String, message: String },

    /// 정상 전송 응답 안의 API 에러 코드
    #[error("Upstream error [{status}]: {message}")]
    Upstream { status: String, message: String },

    /// HTTP 상태 오류
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// 압축파일 오류
    #[error("Archive error: {0}")]
    Archive(String),

    /// 파싱 오류 (XML/CSV 구조)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 인코딩 오류
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// 파일 입출력 오류
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV 쓰기/읽기 오류
    #[error("CSV error: {0}")]
    Csv(String),

    /// 컬럼 라벨 수 불일치
    #[error(transparent)]
    LabelMismatch(#[from] dart_core::LabelCountMismatch),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// 찾을 수 없음
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DataError {
    /// API 상태 코드를 에러로 분류합니다.
    pub fn from_status(status: &str, message: &str) -> Self {
        if AUTH_FAILURE_STATUSES.contains(&status) {
            Self::Authentication {
                status: status.to_string(),
                message: message.to_string(),
            }
        } else {
            Self::Upstream {
                status: status.to_string(),
                message: message.to_string(),
            }
        }
    }

    /// 배치 전체를 중단해야 하는 오류인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// 재시도 가능한 오류인지 확인합니다.
    ///
    /// 네트워크 오류, 5xx/429 응답, 요청 제한 초과(020)만 재시도합니다.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Upstream { status, .. } => status == RATE_LIMIT_STATUS,
            _ => false,
        }
    }
}

impl From<zip::result::ZipError> for DataError {
    fn from(err: zip::result::ZipError) -> Self {
        DataError::Archive(err.to_string())
    }
}

impl From<quick_xml::Error> for DataError {
    fn from(err: quick_xml::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
