//! 고유번호 목록 (`CORPCODE.xml`) 처리.
//!
//! 목록은 수만 건 규모라 트리를 만들지 않고 pull 방식으로 한 번에 한 `<list>`씩 읽습니다.
//! 필드는 위치가 아니라 태그 이름으로 매칭합니다 (`corp_eng_name` 등 필드가 추가되어도 안전).
//!
//! ```xml
//! <result>
//!   <list>
//!     <corp_code>00434003</corp_code>
//!     <corp_name>다코</corp_name>
//!     <corp_eng_name>Daco corporation</corp_eng_name>
//!     <stock_code> </stock_code>
//!     <modify_date>20170630</modify_date>
//!   </list>
//! </result>
//! ```
//!
//! 텍스트는 trim하지 않습니다. 공백 한 칸 자리표시자와 빈 값을 구분해야 하기 때문입니다.

use dart_core::EntityDirectoryRecord;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::archive;
use crate::error::{DataError, Result};

/// 압축파일 안의 목록 파일 이름.
pub const LISTING_FILE_NAME: &str = "CORPCODE.xml";

/// 고유번호 압축파일을 스테이징 디렉토리에 해제합니다.
///
/// # Returns
/// 해제된 목록 파일 경로
pub fn extract_listing(archive_body: &[u8], staging_dir: &Path) -> Result<PathBuf> {
    let (name, contents) = archive::read_entry(archive_body, LISTING_FILE_NAME, ".xml")?;

    std::fs::create_dir_all(staging_dir)?;
    let path = staging_dir.join(&name);
    std::fs::write(&path, &contents)?;

    info!(path = %path.display(), bytes = contents.len(), "고유번호 목록 압축 해제 완료");
    Ok(path)
}

#[derive(Debug, Clone, Copy)]
enum ListingField {
    CorpCode,
    CorpName,
    CorpEngName,
    StockCode,
    ModifyDate,
}

impl ListingField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"corp_code" => Some(Self::CorpCode),
            b"corp_name" => Some(Self::CorpName),
            b"corp_eng_name" => Some(Self::CorpEngName),
            b"stock_code" => Some(Self::StockCode),
            b"modify_date" => Some(Self::ModifyDate),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct PartialRecord {
    corp_code: Option<String>,
    corp_name: Option<String>,
    corp_eng_name: Option<String>,
    stock_code: Option<String>,
    modify_date: Option<String>,
}

impl PartialRecord {
    fn set(&mut self, field: ListingField, value: String) {
        let slot = match field {
            ListingField::CorpCode => &mut self.corp_code,
            ListingField::CorpName => &mut self.corp_name,
            ListingField::CorpEngName => &mut self.corp_eng_name,
            ListingField::StockCode => &mut self.stock_code,
            ListingField::ModifyDate => &mut self.modify_date,
        };
        *slot = Some(value);
    }

    fn finish(self, position: u64) -> Result<EntityDirectoryRecord> {
        let corp_code = self
            .corp_code
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                DataError::ParseError(format!("corp_code 없는 <list> 항목 (offset {})", position))
            })?;

        Ok(EntityDirectoryRecord {
            corp_code: corp_code.trim().to_string(),
            corp_name: self.corp_name.unwrap_or_default(),
            corp_eng_name: self.corp_eng_name.filter(|n| !n.trim().is_empty()),
            stock_code: self.stock_code.unwrap_or_default(),
            modify_date: self.modify_date.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// `CORPCODE.xml` 스트리밍 파서.
pub struct CorpCodeReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    finished: bool,
}

impl CorpCodeReader<BufReader<File>> {
    /// 파일에서 읽는 파서를 만듭니다.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> CorpCodeReader<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            finished: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<EntityDirectoryRecord>> {
        let mut current: Option<PartialRecord> = None;
        let mut field: Option<ListingField> = None;
        let mut text = String::new();

        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();

            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"list" => current = Some(PartialRecord::default()),
                    tag if current.is_some() => {
                        field = ListingField::from_tag(tag);
                        text.clear();
                    }
                    _ => {}
                },
                Event::Text(t) if field.is_some() => text.push_str(&t.unescape()?),
                Event::CData(t) if field.is_some() => {
                    text.push_str(&String::from_utf8_lossy(&t.into_inner()))
                }
                Event::End(e) => {
                    if e.name().as_ref() == b"list" {
                        if let Some(partial) = current.take() {
                            return partial.finish(position as u64).map(Some);
                        }
                    } else if let (Some(f), Some(partial)) = (field.take(), current.as_mut()) {
                        partial.set(f, std::mem::take(&mut text));
                    }
                }
                Event::Empty(e) => {
                    if let (Some(f), Some(partial)) =
                        (ListingField::from_tag(e.name().as_ref()), current.as_mut())
                    {
                        partial.set(f, String::new());
                    }
                }
                Event::Eof => {
                    if current.is_some() {
                        return Err(DataError::ParseError(
                            "<list> 항목이 닫히기 전에 파일이 끝났습니다".to_string(),
                        ));
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for CorpCodeReader<R> {
    type Item = Result<EntityDirectoryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// 목록 파일 전체를 읽습니다.
pub fn parse_corp_code_listing(path: impl AsRef<Path>) -> Result<Vec<EntityDirectoryRecord>> {
    let records = CorpCodeReader::from_path(path.as_ref())?.collect::<Result<Vec<_>>>()?;
    info!(count = records.len(), "고유번호 목록 파싱 완료");
    Ok(records)
}

/// 회사 지정자 해석기.
///
/// 8자리 숫자는 고유번호, 6자리 숫자는 종목코드, 그 외는 회사명으로 찾습니다.
pub struct CorpDirectory {
    records: Vec<EntityDirectoryRecord>,
    by_corp_code: HashMap<String, usize>,
    by_stock_code: HashMap<String, usize>,
}

impl CorpDirectory {
    pub fn new(records: Vec<EntityDirectoryRecord>) -> Self {
        let mut by_corp_code = HashMap::with_capacity(records.len());
        let mut by_stock_code = HashMap::new();

        for (index, record) in records.iter().enumerate() {
            by_corp_code.entry(record.corp_code.clone()).or_insert(index);
            let stock_code = record.stock_code.trim();
            if !stock_code.is_empty() {
                by_stock_code.entry(stock_code.to_string()).or_insert(index);
            }
        }

        Self {
            records,
            by_corp_code,
            by_stock_code,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EntityDirectoryRecord] {
        &self.records
    }

    /// 지정자를 목록 항목으로 해석합니다.
    ///
    /// 같은 회사명이 여럿이면 종목코드가 있는 항목을 우선합니다.
    pub fn resolve(&self, query: &str) -> Option<&EntityDirectoryRecord> {
        let query = query.trim();
        let numeric = !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit());

        let found = match (numeric, query.len()) {
            (true, 8) => self.by_corp_code.get(query).map(|&i| &self.records[i]),
            (true, 6) => self.by_stock_code.get(query).map(|&i| &self.records[i]),
            _ => self
                .best_match(|r| r.corp_name == query)
                .or_else(|| {
                    self.best_match(|r| {
                        r.corp_eng_name
                            .as_deref()
                            .is_some_and(|n| n.eq_ignore_ascii_case(query))
                    })
                }),
        };

        debug!(query, corp_code = ?found.map(|r| &r.corp_code), "회사 지정자 해석");
        found
    }

    fn best_match<F>(&self, predicate: F) -> Option<&EntityDirectoryRecord>
    where
        F: Fn(&EntityDirectoryRecord) -> bool,
    {
        let mut first = None;
        for record in self.records.iter().filter(|r| predicate(r)) {
            if !record.stock_code.trim().is_empty() {
                return Some(record);
            }
            first.get_or_insert(record);
        }
        first
    }
}
