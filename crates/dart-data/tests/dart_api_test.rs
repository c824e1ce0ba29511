//! DartApiClient 통합 테스트.
//!
//! mock 서버로 OpenDART 응답을 흉내 내어 다음을 확인합니다:
//! - 기업개황 정상/에러 코드/인증 실패 응답 처리
//! - 고유번호 압축파일 수신 및 해제
//! - 공시검색 페이지 연결
//! - HTTP 오류 분류

use dart_core::{ReportCode, StatementScope};
use dart_data::provider::corp_code::extract_listing;
use dart_data::{parse_corp_code_listing, CompanySource, CorpCodeSource, DartApiClient, DataError};
use mockito::{Matcher, Server};
use secrecy::SecretString;
use std::io::{Cursor, Write};
use std::time::Duration;

// ============================================================================
// 테스트 헬퍼 함수
// ============================================================================

const TEST_KEY: &str = "0123456789abcdef0123456789abcdef01234567";

fn client(server: &Server) -> DartApiClient {
    DartApiClient::new(
        SecretString::from(TEST_KEY.to_string()),
        server.url(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn key_matcher() -> Matcher {
    Matcher::UrlEncoded("crtfc_key".into(), TEST_KEY.into())
}

fn zip_with(name: &str, contents: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(name, zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(contents).unwrap();
    writer.finish().unwrap().into_inner()
}

// ============================================================================
// 기업개황
// ============================================================================

#[tokio::test]
async fn test_fetch_company_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/company.json")
        .match_query(Matcher::AllOf(vec![
            key_matcher(),
            Matcher::UrlEncoded("corp_code".into(), "00164779".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status":"000","message":"정상","corp_code":"00164779",
                "corp_name":"에스케이하이닉스(주)","stock_code":"000660",
                "induty_code":"261","acc_mt":"12"}"#,
        )
        .create_async()
        .await;

    let overview = client(&server).fetch_company("00164779").await.unwrap();

    mock.assert_async().await;
    assert!(overview.is_success());
    assert_eq!(overview.stock_code.as_deref(), Some("000660"));
    assert_eq!(overview.industry_key(), Some(261));
}

#[tokio::test]
async fn test_fetch_company_keeps_error_coded_record() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/company.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"013","message":"조회된 데이타가 없습니다."}"#)
        .create_async()
        .await;

    let overview = client(&server).fetch_company("99999999").await.unwrap();

    assert!(!overview.is_success());
    assert_eq!(overview.status, "013");
    assert_eq!(overview.corp_code, None);
}

#[tokio::test]
async fn test_fetch_company_auth_failure_is_fatal() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/company.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"010","message":"등록되지 않은 키입니다."}"#)
        .create_async()
        .await;

    let err = client(&server).fetch_company("00164779").await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_fetch_company_rate_limit_is_retryable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/company.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"020","message":"요청 제한을 초과하였습니다."}"#)
        .create_async()
        .await;

    let err = client(&server).fetch_company("00164779").await.unwrap_err();
    assert!(!err.is_fatal());
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/company.json")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let err = client(&server).fetch_company("00164779").await.unwrap_err();
    match &err {
        DataError::Http { status, body } => {
            assert_eq!(*status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_retryable());
}

// ============================================================================
// 고유번호 압축파일
// ============================================================================

#[tokio::test]
async fn test_corp_code_archive_roundtrip_to_listing() {
    let listing = "<result><list><corp_code>00126380</corp_code><corp_name>삼성전자(주)</corp_name>\
                   <stock_code>005930</stock_code><modify_date>20230101</modify_date></list>\
                   <list><corp_code>00434003</corp_code><corp_name>다코</corp_name>\
                   <stock_code> </stock_code><modify_date>20170630</modify_date></list></result>";

    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/corpCode.xml")
        .match_query(key_matcher())
        .with_status(200)
        .with_header("content-type", "application/x-msdownload")
        .with_body(zip_with("CORPCODE.xml", listing.as_bytes()))
        .create_async()
        .await;

    let body = client(&server).fetch_corp_code_archive().await.unwrap();

    let staging = tempfile::tempdir().unwrap();
    let path = extract_listing(&body, staging.path()).unwrap();
    let records = parse_corp_code_listing(&path).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].stock_code, "005930");
    assert_eq!(records[1].stock_code, " ");
}

#[tokio::test]
async fn test_corp_code_archive_auth_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/corpCode.xml")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<result><status>011</status><message>사용할 수 없는 키입니다.</message></result>")
        .create_async()
        .await;

    let err = client(&server).fetch_corp_code_archive().await.unwrap_err();
    assert!(matches!(err, DataError::Authentication { .. }));
}

// ============================================================================
// 공시검색 / 원본파일 / 재무제표 / 지분공시
// ============================================================================

#[tokio::test]
async fn test_search_disclosures_concatenates_pages() {
    let mut server = Server::new_async().await;
    let page1 = server
        .mock("GET", "/api/list.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("corp_code".into(), "00126380".into()),
            Matcher::UrlEncoded("page_no".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"status":"000","message":"정상","page_no":1,"page_count":100,"total_count":3,"total_page":2,
                "list":[{"corp_code":"00126380","rcept_no":"20230307000542","report_nm":"사업보고서"},
                        {"corp_code":"00126380","rcept_no":"20230306000111","report_nm":"주요사항보고서"}]}"#,
        )
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/api/list.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("corp_code".into(), "00126380".into()),
            Matcher::UrlEncoded("page_no".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"status":"000","message":"정상","page_no":2,"page_count":100,"total_count":3,"total_page":2,
                "list":[{"corp_code":"00126380","rcept_no":"20230102000001","report_nm":"임원ㆍ주요주주특정증권등소유상황보고서"}]}"#,
        )
        .create_async()
        .await;

    let filings = client(&server)
        .search_disclosures("00126380", "20230101", "20231231")
        .await
        .unwrap();

    page1.assert_async().await;
    page2.assert_async().await;
    let receipts: Vec<_> = filings.iter().filter_map(|f| f.rcept_no.as_deref()).collect();
    assert_eq!(receipts, vec!["20230307000542", "20230306000111", "20230102000001"]);
}

#[tokio::test]
async fn test_search_disclosures_no_data() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/list.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"013","message":"조회된 데이타가 없습니다."}"#)
        .create_async()
        .await;

    let filings = client(&server)
        .search_disclosures("00126380", "20230101", "20230102")
        .await
        .unwrap();
    assert!(filings.is_empty());
}

#[tokio::test]
async fn test_fetch_document_prefers_receipt_entry() {
    let mut server = Server::new_async().await;
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("20210318001017_00760.xml", options).unwrap();
    writer.write_all(b"<DOCUMENT>attachment</DOCUMENT>").unwrap();
    writer.start_file("20210318001017.xml", options).unwrap();
    writer.write_all("<DOCUMENT><P>사업보고서</P></DOCUMENT>".as_bytes()).unwrap();
    let body = writer.finish().unwrap().into_inner();

    server
        .mock("GET", "/api/document.xml")
        .match_query(Matcher::UrlEncoded("rcept_no".into(), "20210318001017".into()))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let text = client(&server).fetch_document("20210318001017").await.unwrap();
    assert!(text.contains("사업보고서"));
    assert_eq!(dart_data::extract_document_text(&text), vec!["사업보고서"]);
}

#[tokio::test]
async fn test_fetch_document_euc_kr() {
    let mut server = Server::new_async().await;
    let (encoded, _, _) = encoding_rs::EUC_KR.encode("<P>휴켐스</P>");

    server
        .mock("GET", "/api/document.xml")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(zip_with("20210318001017.xml", &encoded))
        .create_async()
        .await;

    let text = client(&server).fetch_document("20210318001017").await.unwrap();
    assert_eq!(text, "<P>휴켐스</P>");
}

#[tokio::test]
async fn test_fetch_financial_statements_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/fnlttSinglAcntAll.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("corp_code".into(), "00126380".into()),
            Matcher::UrlEncoded("bsns_year".into(), "2022".into()),
            Matcher::UrlEncoded("reprt_code".into(), "11011".into()),
            Matcher::UrlEncoded("fs_div".into(), "CFS".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"status":"000","message":"정상","list":[
                {"rcept_no":"20230307000542","bsns_year":"2022","corp_code":"00126380",
                 "sj_div":"BS","account_nm":"자산총계","thstrm_amount":"448,424,507,000,000"}]}"#,
        )
        .create_async()
        .await;

    let lines = client(&server)
        .fetch_financial_statements(
            "00126380",
            2022,
            ReportCode::Annual,
            StatementScope::Consolidated,
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(lines.len(), 1);
    assert!(lines[0].current_amount().is_some());
}

#[tokio::test]
async fn test_fetch_shareholdings() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/majorstock.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"status":"000","message":"정상","list":[
                {"rcept_no":"20230110000123","corp_code":"00126380","repror":"국민연금공단",
                 "stkqy":"508,812,203","stkrt":"8.52"}]}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/elestock.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"013","message":"조회된 데이타가 없습니다."}"#)
        .create_async()
        .await;

    let api = client(&server);
    let major = api.fetch_major_shareholdings("00126380").await.unwrap();
    assert_eq!(major.len(), 1);
    assert_eq!(major[0].repror.as_deref(), Some("국민연금공단"));
    assert!(major[0].holding_ratio().is_some());

    let executives = api.fetch_executive_shareholdings("00126380").await.unwrap();
    assert!(executives.is_empty());
}
