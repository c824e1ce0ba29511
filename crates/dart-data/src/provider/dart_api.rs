//! OpenDART Open API 클라이언트.
//!
//! 금융감독원 전자공시시스템(DART)의 Open API로 기업 정보를 수집합니다.
//!
//! # 지원 데이터
//!
//! - 고유번호 압축파일 (`corpCode.xml`)
//! - 기업개황 (`company.json`)
//! - 공시검색 (`list.json`, 페이지 단위)
//! - 공시서류 원본파일 (`document.xml`)
//! - 단일회사 전체 재무제표 (`fnlttSinglAcntAll.json`)
//! - 대량보유 상황보고 (`majorstock.json`), 임원·주요주주 소유보고 (`elestock.json`)
//!
//! # 인증키 관리
//!
//! 인증키는 `SecretString`으로 보관하며 쿼리 파라미터(`crtfc_key`)로만 전달합니다.
//! 로그에는 절대 남기지 않습니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use dart_data::DartApiClient;
//! use secrecy::SecretString;
//!
//! let client = DartApiClient::new(
//!     SecretString::from(api_key),
//!     "https://opendart.fss.or.kr",
//!     Duration::from_secs(30),
//! )?;
//!
//! let overview = client.fetch_company("00126380").await?;
//! ```

use async_trait::async_trait;
use dart_core::{
    CompanyOverview, DisclosureFiling, ExecutiveShareholding, FinancialStatementLine,
    MajorShareholding, ReportCode, StatementScope, STATUS_OK,
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::archive;
use crate::error::{DataError, Result, NO_DATA_STATUS, RATE_LIMIT_STATUS};

/// OpenDART 기본 주소.
pub const DEFAULT_BASE_URL: &str = "https://opendart.fss.or.kr";

/// 공시검색 페이지 크기 (API 최대값).
const DISCLOSURE_PAGE_COUNT: u32 = 100;

/// 고유번호 압축파일 공급자.
///
/// 파이프라인의 네트워크 단계를 테스트에서 대체할 수 있도록 분리합니다.
#[async_trait]
pub trait CorpCodeSource: Send + Sync {
    /// 고유번호 압축파일 원본 바이트를 가져옵니다.
    async fn fetch_corp_code_archive(&self) -> Result<Vec<u8>>;
}

/// 기업개황 공급자.
#[async_trait]
pub trait CompanySource: Send + Sync {
    /// 고유번호 하나의 기업개황을 가져옵니다.
    ///
    /// 인증 오류와 요청 제한(020)은 `Err`로, 그 외 에러 코드는 레코드 그대로 `Ok`로 반환합니다.
    async fn fetch_company(&self, corp_code: &str) -> Result<CompanyOverview>;
}

/// OpenDART Open API 클라이언트.
pub struct DartApiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl std::fmt::Debug for DartApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DartApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// 목록형 응답 공통 구조.
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    total_page: Option<u32>,
    #[serde(default = "Vec::new")]
    list: Vec<T>,
}

impl DartApiClient {
    /// 새 클라이언트를 생성합니다.
    ///
    /// # Arguments
    /// * `api_key` - OpenDART 인증키 (40자)
    /// * `base_url` - API 주소 (테스트 시 mock 서버 주소)
    /// * `timeout` - 요청 타임아웃
    pub fn new(api_key: SecretString, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dart-collector/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// GET 요청 후 성공 응답 본문을 반환합니다.
    async fn get_bytes(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<u8>> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        debug!(endpoint, ?params, "OpenDART 요청");

        let response = self
            .client
            .get(&url)
            .query(&[("crtfc_key", self.api_key.expose_secret())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// 목록형 JSON 엔드포인트 한 페이지를 조회합니다.
    ///
    /// 013(데이터 없음)은 빈 목록으로 취급합니다.
    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<(Vec<T>, u32)> {
        let body = self.get_bytes(endpoint, params).await?;
        let envelope: ListEnvelope<T> = serde_json::from_slice(&body)?;

        match envelope.status.as_str() {
            STATUS_OK => Ok((envelope.list, envelope.total_page.unwrap_or(1))),
            NO_DATA_STATUS => Ok((Vec::new(), 0)),
            status => Err(DataError::from_status(status, &envelope.message)),
        }
    }

    /// 공시검색.
    ///
    /// 모든 페이지를 순서대로 조회해 합칩니다.
    ///
    /// # Arguments
    /// * `corp_code` - 고유번호 (8자리)
    /// * `bgn_de` / `end_de` - 검색 기간 (YYYYMMDD)
    pub async fn search_disclosures(
        &self,
        corp_code: &str,
        bgn_de: &str,
        end_de: &str,
    ) -> Result<Vec<DisclosureFiling>> {
        let page_count = DISCLOSURE_PAGE_COUNT.to_string();
        let mut filings = Vec::new();
        let mut page_no: u32 = 1;

        loop {
            let page = page_no.to_string();
            let params = [
                ("corp_code", corp_code),
                ("bgn_de", bgn_de),
                ("end_de", end_de),
                ("page_no", page.as_str()),
                ("page_count", page_count.as_str()),
            ];
            let (list, total_page) = self.get_list::<DisclosureFiling>("list.json", &params).await?;
            filings.extend(list);

            if page_no >= total_page {
                break;
            }
            page_no += 1;
        }

        info!(corp_code, count = filings.len(), "공시검색 완료");
        Ok(filings)
    }

    /// 공시서류 원본파일을 내려받아 문서 본문을 반환합니다.
    ///
    /// 압축파일 안의 `{rcept_no}.xml`을 우선하고, 없으면 첫 번째 XML 문서를 사용합니다.
    /// UTF-8이 아니면 EUC-KR로, 그것도 아니면 손실 허용 UTF-8로 해석합니다.
    pub async fn fetch_document(&self, rcept_no: &str) -> Result<String> {
        let body = self
            .get_bytes("document.xml", &[("rcept_no", rcept_no)])
            .await?;

        let preferred = format!("{}.xml", rcept_no);
        let (name, contents) = archive::read_entry(&body, &preferred, ".xml")?;
        debug!(rcept_no, entry = %name, bytes = contents.len(), "공시서류 원본 수신");

        match String::from_utf8(contents) {
            Ok(text) => Ok(text),
            Err(e) => {
                let (text, _, had_errors) = encoding_rs::EUC_KR.decode(e.as_bytes());
                if had_errors {
                    warn!(rcept_no, "문서 인코딩 판별 실패, 손실 허용 UTF-8로 해석");
                    return Ok(String::from_utf8_lossy(e.as_bytes()).into_owned());
                }
                Ok(text.into_owned())
            }
        }
    }

    /// 단일회사 전체 재무제표.
    pub async fn fetch_financial_statements(
        &self,
        corp_code: &str,
        bsns_year: i32,
        report: ReportCode,
        scope: StatementScope,
    ) -> Result<Vec<FinancialStatementLine>> {
        let year = bsns_year.to_string();
        let params = [
            ("corp_code", corp_code),
            ("bsns_year", year.as_str()),
            ("reprt_code", report.as_str()),
            ("fs_div", scope.as_str()),
        ];
        let (lines, _) = self.get_list("fnlttSinglAcntAll.json", &params).await?;
        info!(corp_code, bsns_year, count = lines.len(), "재무제표 조회 완료");
        Ok(lines)
    }

    /// 대량보유 상황보고.
    pub async fn fetch_major_shareholdings(&self, corp_code: &str) -> Result<Vec<MajorShareholding>> {
        let (list, _) = self
            .get_list("majorstock.json", &[("corp_code", corp_code)])
            .await?;
        Ok(list)
    }

    /// 임원·주요주주 소유보고.
    pub async fn fetch_executive_shareholdings(
        &self,
        corp_code: &str,
    ) -> Result<Vec<ExecutiveShareholding>> {
        let (list, _) = self
            .get_list("elestock.json", &[("corp_code", corp_code)])
            .await?;
        Ok(list)
    }
}

#[async_trait]
impl CorpCodeSource for DartApiClient {
    async fn fetch_corp_code_archive(&self) -> Result<Vec<u8>> {
        let body = self.get_bytes("corpCode.xml", &[]).await?;
        archive::ensure_zip(&body)?;
        info!(bytes = body.len(), "고유번호 압축파일 수신");
        Ok(body)
    }
}

#[async_trait]
impl CompanySource for DartApiClient {
    async fn fetch_company(&self, corp_code: &str) -> Result<CompanyOverview> {
        let body = self
            .get_bytes("company.json", &[("corp_code", corp_code)])
            .await?;
        let overview: CompanyOverview = serde_json::from_slice(&body)?;

        if overview.is_success() {
            return Ok(overview);
        }

        let error = DataError::from_status(&overview.status, &overview.message);
        if error.is_fatal() || overview.status == RATE_LIMIT_STATUS {
            return Err(error);
        }

        warn!(
            corp_code,
            status = %overview.status,
            message = %overview.message,
            "기업개황 에러 응답 (레코드 유지)"
        );
        Ok(overview)
    }
}
