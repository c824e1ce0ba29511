//! 고유번호 목록 수집 단계.

use dart_core::{eligible_corp_codes, AbsencePolicy, EntityDirectoryRecord};
use dart_data::provider::corp_code::extract_listing;
use dart_data::{parse_corp_code_listing, CorpCodeSource};
use std::path::Path;
use tracing::info;

use crate::error::{CollectorError, PipelineStage};
use crate::Result;

/// 고유번호 압축파일을 받아 스테이징 디렉토리에 풀고 목록을 파싱합니다.
pub async fn fetch_directory<S>(source: &S, staging_dir: &Path) -> Result<Vec<EntityDirectoryRecord>>
where
    S: CorpCodeSource + ?Sized,
{
    info!(staging_dir = %staging_dir.display(), "고유번호 목록 수집 시작");

    let archive = source
        .fetch_corp_code_archive()
        .await
        .map_err(CollectorError::at(PipelineStage::DirectoryFetch))?;
    let listing = extract_listing(&archive, staging_dir)
        .map_err(CollectorError::at(PipelineStage::DirectoryFetch))?;

    parse_corp_code_listing(&listing).map_err(CollectorError::at(PipelineStage::ListingParse))
}

/// 상장 회사의 고유번호만 추립니다.
pub fn select_listed(records: &[EntityDirectoryRecord], policy: AbsencePolicy) -> Vec<String> {
    let eligible = eligible_corp_codes(records, policy);
    info!(
        directory = records.len(),
        eligible = eligible.len(),
        policy = ?policy,
        "상장 회사 선별 완료"
    );
    eligible
}
