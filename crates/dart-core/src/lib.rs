//! # DART Core
//!
//! OpenDART 기업정보 수집기의 핵심 도메인 모델과 규칙을 제공합니다.
//!
//! 이 크레이트는 네트워크나 파일 시스템에 의존하지 않는 순수한 단계들을 담습니다:
//! - 고유번호 목록 레코드 및 상장 여부 판정 (공백 정책)
//! - 기업개황 레코드 및 고정 폭 식별자 정규화
//! - 표준산업분류 테이블과 업종코드 결합
//! - 공시/지분/재무제표 레코드
//! - 표 형식 출력을 위한 행(row) 트레이트
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
