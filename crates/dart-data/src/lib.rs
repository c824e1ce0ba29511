//! OpenDART 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - OpenDART Open API 클라이언트 (고유번호, 기업개황, 공시검색, 원본파일, 재무제표, 지분공시)
//! - 고유번호 압축파일 해제 및 스트리밍 XML 파서
//! - 회사 지정자(고유번호/종목코드/회사명) 해석기
//! - 표준산업분류 참조 파일 로더 (CP949)
//! - 공시 원본 문서 텍스트 추출
//! - 원자적 CSV 내보내기

pub mod error;
pub mod export;
pub mod provider;

pub use error::{DataError, Result};
pub use export::{export_table, stage_table, write_lines, ExportOptions, StagedTable};

pub use provider::{
    extract_document_text, load_classification_table, parse_corp_code_listing, CompanySource,
    CorpCodeReader, CorpCodeSource, CorpDirectory, DartApiClient, ReferenceTableOptions,
};
