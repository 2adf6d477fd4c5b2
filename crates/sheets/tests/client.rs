use rollcall_sheets::{
    CellAddress, CellRange, CellUpdate, ClientOptions, RangeClient, SheetRange, SheetsClient,
    SheetsError, StaticToken,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHEET_ID: &str = "sheet-id";

fn client_for(server: &MockServer) -> SheetsClient {
    SheetsClient::with_options(
        SHEET_ID,
        Arc::new(StaticToken::new("test-token")),
        ClientOptions {
            base_url: format!("{}/v4/", server.uri()),
            timeout_secs: 5,
        },
    )
    .unwrap()
}

fn header_range() -> SheetRange {
    SheetRange::new("6A1", CellRange::row(3, "H", "S").unwrap())
}

#[tokio::test]
async fn test_read_range_returns_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-id/values/6A1!H3:S3"))
        .and(query_param("majorDimension", "ROWS"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "'6A1'!H3:S3",
            "majorDimension": "ROWS",
            "values": [["20/11", "21/11", "22/11"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client_for(&server).read_range(&header_range()).await.unwrap();
    assert_eq!(rows, vec![vec![json!("20/11"), json!("21/11"), json!("22/11")]]);
}

#[tokio::test]
async fn test_read_empty_range_has_no_values_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "'6A1'!H3:S3",
            "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;

    let rows = client_for(&server).read_range(&header_range()).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_read_range_surfaces_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "Unable to parse range: 9Z9!H3:S3",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .read_range(&header_range())
        .await
        .unwrap_err();
    assert!(matches!(err, SheetsError::Api { status: 400, .. }));
    assert_eq!(err.to_string(), "Unable to parse range: 9Z9!H3:S3");
}

#[tokio::test]
async fn test_read_range_without_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .read_range(&header_range())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503 - Service Unavailable");
}

#[tokio::test]
async fn test_batch_write_sends_user_entered_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-id/values:batchUpdate"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "valueInputOption": "USER_ENTERED",
            "data": [
                { "range": "6A1!J5", "values": [["P"]] },
                { "range": "6A1!J6", "values": [["A"]] }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": SHEET_ID,
            "totalUpdatedRows": 2,
            "totalUpdatedColumns": 1,
            "totalUpdatedCells": 2,
            "totalUpdatedSheets": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updates = vec![
        CellUpdate::new(
            SheetRange::new("6A1", CellRange::single(CellAddress::at("J", 5).unwrap())),
            "P",
        ),
        CellUpdate::new(
            SheetRange::new("6A1", CellRange::single(CellAddress::at("J", 6).unwrap())),
            "A",
        ),
    ];
    let written = client_for(&server).batch_write(&updates).await.unwrap();
    assert_eq!(written, 2);
}

#[tokio::test]
async fn test_batch_write_keeps_numbers_typed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-id/values:batchUpdate"))
        .and(body_json(json!({
            "valueInputOption": "USER_ENTERED",
            "data": [{ "range": "6A1!J5", "values": [[1]] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalUpdatedCells": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updates = vec![CellUpdate::new(
        SheetRange::new("6A1", CellRange::single(CellAddress::at("J", 5).unwrap())),
        json!(1),
    )];
    let written = client_for(&server).batch_write(&updates).await.unwrap();
    assert_eq!(written, 1);
}

#[tokio::test]
async fn test_batch_write_failure_is_single_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "The caller does not have permission" }
        })))
        .mount(&server)
        .await;

    let updates = vec![CellUpdate::new(
        SheetRange::new("6A1", CellRange::single(CellAddress::at("H", 5).unwrap())),
        "P",
    )];
    let err = client_for(&server).batch_write(&updates).await.unwrap_err();
    assert!(matches!(err, SheetsError::Api { status: 403, .. }));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let result = SheetsClient::with_options(
        SHEET_ID,
        Arc::new(StaticToken::new("t")),
        ClientOptions {
            base_url: "not a url".to_string(),
            timeout_secs: 5,
        },
    );
    assert!(matches!(result, Err(SheetsError::Http(_))));
}

#[test]
fn test_spreadsheet_id() {
    let client = SheetsClient::new(SHEET_ID, Arc::new(StaticToken::new("t"))).unwrap();
    assert_eq!(client.spreadsheet_id(), SHEET_ID);
}
