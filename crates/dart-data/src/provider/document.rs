//! 공시서류 원본 문서 텍스트 추출.
//!
//! DART 원본 문서는 HTML에 가까운 마크업이라 관대한 HTML 파서로 읽고
//! 텍스트 노드만 이어 붙인 뒤 줄 단위로 나눕니다.

use scraper::Html;

/// 문서에서 텍스트 줄을 추출합니다.
///
/// 각 줄은 앞뒤 공백을 제거하며, 빈 줄은 버립니다. 순서는 문서 순서를 따릅니다.
pub fn extract_document_text(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let text: String = document.root_element().text().collect();

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
