//! OpenDART 상장기업 정보 수집기.
//!
//! 이 crate는 배치 수집 바이너리와 그 단계들을 제공합니다:
//! - 고유번호 목록 수집 및 상장 회사 선별
//! - 기업개황 병렬 수집 (재시도, 순서 유지)
//! - 식별자 정규화 및 표준산업분류 결합
//! - 공시검색, 공시 원문, 재무제표, 지분공시 조회

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, PipelineStage, Result};
pub use stats::CollectionStats;
