//! 표준산업분류코드 참조 파일 로더.
//!
//! 통계청에서 내려받은 CSV는 보통 CP949로 저장되어 있습니다.
//! 인코딩은 설정으로 바꿀 수 있으며, 컬럼은 헤더 이름으로 찾습니다.

use dart_core::ClassificationTable;
use encoding_rs::Encoding;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{DataError, Result};

/// 참조 파일 읽기 옵션.
#[derive(Debug, Clone)]
pub struct ReferenceTableOptions {
    /// 파일 인코딩 (`cp949`, `euc-kr`, `utf-8` 등)
    pub encoding: String,
    /// 코드 컬럼 헤더
    pub code_column: String,
    /// 명칭 컬럼 헤더
    pub name_column: String,
    /// 구분자
    pub delimiter: u8,
}

impl Default for ReferenceTableOptions {
    fn default() -> Self {
        Self {
            encoding: "cp949".to_string(),
            code_column: "산업분류코드".to_string(),
            name_column: "산업분류명칭".to_string(),
            delimiter: b',',
        }
    }
}

fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    let normalized = label.trim().to_ascii_lowercase();
    // WHATWG 라벨에는 cp949가 없으므로 windows-949로 맞춘다
    let lookup = match normalized.as_str() {
        "cp949" | "ms949" | "uhc" => "windows-949",
        other => other,
    };

    Encoding::for_label(lookup.as_bytes())
        .ok_or_else(|| DataError::Encoding(format!("지원하지 않는 인코딩: {}", label)))
}

/// 원본 바이트를 디코딩하고 테이블을 만듭니다.
pub fn parse_classification_table(
    bytes: &[u8],
    options: &ReferenceTableOptions,
) -> Result<ClassificationTable> {
    let encoding = resolve_encoding(&options.encoding)?;
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DataError::Encoding(format!(
            "참조 파일을 {}로 해석할 수 없습니다",
            encoding.name()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let position = |column: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
            .ok_or_else(|| DataError::ParseError(format!("참조 파일에 '{}' 컬럼이 없습니다", column)))
    };
    let code_idx = position(&options.code_column)?;
    let name_idx = position(&options.name_column)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let code = record.get(code_idx).unwrap_or_default().to_string();
        let name = record.get(name_idx).unwrap_or_default().trim().to_string();
        rows.push((code, name));
    }

    let table = ClassificationTable::from_rows(rows);
    if table.is_empty() {
        warn!("참조 파일에 숫자 산업분류코드가 없습니다");
    }
    Ok(table)
}

/// 참조 파일을 읽습니다.
pub fn load_classification_table(
    path: impl AsRef<Path>,
    options: &ReferenceTableOptions,
) -> Result<ClassificationTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let table = parse_classification_table(&bytes, options)?;

    info!(
        path = %path.display(),
        codes = table.len(),
        rejected = table.rejected,
        duplicates = table.duplicates,
        "표준산업분류 테이블 로드 완료"
    );
    Ok(table)
}
