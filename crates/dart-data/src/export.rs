//! 표 형식 산출물 내보내기.
//!
//! 헤더는 위치 기반으로 붙이므로 라벨 수가 필드 수와 다르면 파일을 만들기 전에 실패합니다.
//! 쓰기는 같은 디렉토리의 임시 파일에 한 뒤 이름을 바꿔, 실패해도 이전 산출물이
//! 부분적으로 덮어써지지 않습니다.

use dart_core::{relabel, TableRow};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{DataError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 내보내기 옵션.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// 스프레드시트에서 한글이 깨지지 않도록 UTF-8 BOM을 붙입니다.
    pub utf8_bom: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { utf8_bom: true }
    }
}

fn temp_file_beside(path: &Path) -> Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    Ok(NamedTempFile::new_in(parent)?)
}

fn persist(file: NamedTempFile, path: &Path) -> Result<()> {
    file.persist(path)
        .map_err(|e| DataError::Io(e.error))?;
    Ok(())
}

/// 아직 대상 경로로 옮기지 않은 산출물.
///
/// `commit` 전에 버려지면 임시 파일은 삭제되고 대상 경로는 그대로입니다.
#[derive(Debug)]
pub struct StagedTable {
    file: NamedTempFile,
    path: PathBuf,
    rows: usize,
}

impl StagedTable {
    /// 최종 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 기록한 행 수
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 임시 파일을 최종 경로로 옮깁니다.
    pub fn commit(self) -> Result<PathBuf> {
        persist(self.file, &self.path)?;
        info!(path = %self.path.display(), rows = self.rows, "산출물 저장 완료");
        Ok(self.path)
    }
}

/// 행 목록을 대상 디렉토리의 임시 파일에 CSV로 씁니다.
///
/// 여러 산출물을 함께 저장할 때 모두 쓴 뒤에 `commit`합니다.
pub fn stage_table<R, S>(
    path: impl AsRef<Path>,
    rows: &[R],
    labels: &[S],
    options: &ExportOptions,
) -> Result<StagedTable>
where
    R: TableRow,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let header = relabel::<R, S>(labels)?;

    let mut file = temp_file_beside(path)?;
    if options.utf8_bom {
        file.write_all(UTF8_BOM)?;
    }

    {
        let mut writer = csv::Writer::from_writer(file.as_file_mut());
        writer.write_record(&header)?;
        for row in rows {
            writer.write_record(row.values())?;
        }
        writer.flush()?;
    }

    Ok(StagedTable {
        file,
        path: path.to_path_buf(),
        rows: rows.len(),
    })
}

/// 행 목록을 CSV로 내보냅니다.
///
/// # Arguments
/// * `path` - 산출물 경로
/// * `rows` - 출력할 행
/// * `labels` - 필드 순서대로 붙일 헤더 라벨
///
/// # Returns
/// 기록한 행 수
pub fn export_table<R, S>(
    path: impl AsRef<Path>,
    rows: &[R],
    labels: &[S],
    options: &ExportOptions,
) -> Result<usize>
where
    R: TableRow,
    S: AsRef<str>,
{
    let staged = stage_table(path, rows, labels, options)?;
    let rows = staged.rows();
    staged.commit()?;
    Ok(rows)
}

/// 텍스트 줄을 파일로 저장합니다 (줄마다 개행).
pub fn write_lines<S: AsRef<str>>(path: impl AsRef<Path>, lines: &[S]) -> Result<usize> {
    let path = path.as_ref();
    let mut file = temp_file_beside(path)?;

    for line in lines {
        file.write_all(line.as_ref().as_bytes())?;
        file.write_all(b"\n")?;
    }
    file.flush()?;

    persist(file, path)?;
    info!(path = %path.display(), lines = lines.len(), "텍스트 저장 완료");
    Ok(lines.len())
}
