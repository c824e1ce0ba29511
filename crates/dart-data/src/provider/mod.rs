//! 데이터 Provider 모듈.
//!
//! ## OpenDART Open API
//! - `DartApiClient`: 인증키 기반 API 클라이언트
//! - 고유번호 압축파일, 기업개황, 공시검색, 공시서류 원본파일, 재무제표, 지분공시
//! - `CorpCodeSource`/`CompanySource` 트레이트로 네트워크 단계를 대체 가능
//!
//! ## 고유번호 목록
//! - `CorpCodeReader`: `CORPCODE.xml` 스트리밍 파서
//! - `CorpDirectory`: 고유번호/종목코드/회사명 해석기
//!
//! ## 참조 데이터
//! - `load_classification_table`: 표준산업분류코드 CSV (CP949) 로더
//! - `extract_document_text`: 공시 원본 문서 텍스트 추출

pub mod archive;
pub mod classification;
pub mod corp_code;
pub mod dart_api;
pub mod document;

pub use classification::{load_classification_table, parse_classification_table, ReferenceTableOptions};
pub use corp_code::{parse_corp_code_listing, CorpCodeReader, CorpDirectory};
pub use dart_api::{CompanySource, CorpCodeSource, DartApiClient, DEFAULT_BASE_URL};
pub use document::extract_document_text;
