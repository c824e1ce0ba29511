//! OpenDART 압축 응답 처리.
//!
//! 고유번호(`corpCode.xml`)와 공시서류 원본파일(`document.xml`)은 ZIP으로 내려옵니다.
//! 인증키 오류 등은 ZIP 대신 짧은 XML/JSON 상태 응답으로 오므로, 본문이 ZIP이
//! 아니면 상태 코드를 꺼내 에러로 분류합니다.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Deserialize;
use std::io::{Cursor, Read};

use crate::error::{DataError, Result};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// 본문이 ZIP 파일인지 확인합니다.
pub fn is_zip(body: &[u8]) -> bool {
    body.starts_with(ZIP_MAGIC)
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: String,
    #[serde(default)]
    message: String,
}

/// ZIP이 아닌 응답 본문에서 (status, message)를 꺼냅니다.
pub fn status_from_body(body: &[u8]) -> Option<(String, String)> {
    if let Ok(envelope) = serde_json::from_slice::<StatusEnvelope>(body) {
        return Some((envelope.status, envelope.message));
    }

    xml_status(body)
}

#[derive(Debug, Clone, Copy)]
enum StatusField {
    Status,
    Message,
}

impl StatusField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"status" => Some(Self::Status),
            b"message" => Some(Self::Message),
            _ => None,
        }
    }
}

/// `<result><status>…</status><message>…</message></result>` 형태의 XML 상태 응답.
fn xml_status(body: &[u8]) -> Option<(String, String)> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    let mut field: Option<StatusField> = None;
    let mut text = String::new();
    let mut status: Option<String> = None;
    let mut message: Option<String> = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf).ok()? {
            Event::Start(e) => {
                field = StatusField::from_tag(e.name().as_ref());
                text.clear();
            }
            Event::Text(t) if field.is_some() => text.push_str(&t.unescape().ok()?),
            Event::CData(t) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&t.into_inner()))
            }
            Event::End(_) => match field.take() {
                Some(StatusField::Status) => status = Some(text.trim().to_string()),
                Some(StatusField::Message) => message = Some(text.trim().to_string()),
                None => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Some((status?, message.unwrap_or_default()))
}

/// ZIP이 아니면 상태 응답을 에러로 변환합니다.
pub fn ensure_zip(body: &[u8]) -> Result<()> {
    if is_zip(body) {
        return Ok(());
    }

    match status_from_body(body) {
        Some((status, message)) => Err(DataError::from_status(&status, &message)),
        None => Err(DataError::Archive(format!(
            "ZIP 형식이 아닌 응답입니다 ({} bytes)",
            body.len()
        ))),
    }
}

/// ZIP에서 항목 하나를 읽습니다.
///
/// `preferred` 이름과 일치하는 항목이 있으면 그것을, 없으면 `fallback_ext`로
/// 끝나는 첫 번째 파일 항목을 반환합니다. 반환 이름은 경로를 제외한 파일명입니다.
pub fn read_entry(body: &[u8], preferred: &str, fallback_ext: &str) -> Result<(String, Vec<u8>)> {
    ensure_zip(body)?;
    let mut archive = zip::ZipArchive::new(Cursor::new(body))?;

    let mut chosen: Option<usize> = None;
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = file_name(entry.name());
        if name.eq_ignore_ascii_case(preferred) {
            chosen = Some(index);
            break;
        }
        if chosen.is_none() && name.to_lowercase().ends_with(fallback_ext) {
            chosen = Some(index);
        }
    }

    let index = chosen.ok_or_else(|| {
        DataError::Archive(format!("압축파일에 {} 항목이 없습니다", preferred))
    })?;

    let mut entry = archive.by_index(index)?;
    let name = file_name(entry.name()).to_string();
    // 헤더의 크기 값은 신뢰하지 않는다
    let mut contents = Vec::new();
    entry.read_to_end(&mut contents)?;

    Ok((name, contents))
}

fn file_name(entry_name: &str) -> &str {
    entry_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(entry_name)
}
