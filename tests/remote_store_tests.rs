use rworklog::errors::AppError;
use rworklog::models::DailyReport;
use rworklog::store::{RecordStore, RemoteStore, RowFilter};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::sample_record;

const EMAIL: &str = "taro@example.com";
const KEY: &str = "anon-key";

fn store_for(server: &MockServer) -> RemoteStore {
    RemoteStore::new(server.uri(), KEY, EMAIL)
}

#[tokio::test]
async fn test_insert_sends_credentials_and_author() {
    let server = MockServer::start().await;
    let record = sample_record("A社", "保守", "09:00", "12:00", 180);

    Mock::given(method("POST"))
        .and(path("/rest/v1/workhistories"))
        .and(header("apikey", KEY))
        .and(header("Authorization", "Bearer anon-key"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!({
            "id": record.id.to_string(),
            "client_name": "A社",
            "duration": 180,
            "user_email": EMAIL
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "id": record.id }])))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).append_record(&record).await.unwrap();
}

#[tokio::test]
async fn test_report_goes_to_its_own_table() {
    let server = MockServer::start().await;
    let record = sample_record("A社", "保守", "09:00", "12:00", 180);
    let report = DailyReport::shell("テスト太郎", record.date, std::slice::from_ref(&record));

    Mock::given(method("POST"))
        .and(path("/rest/v1/daily_reports"))
        .and(body_partial_json(json!({
            "related_history_ids": [record.id.to_string()],
            "user_email": EMAIL
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).append_report(&report).await.unwrap();
}

#[tokio::test]
async fn test_load_filters_on_the_author() {
    let server = MockServer::start().await;
    let record = sample_record("A社", "保守", "09:00", "12:00", 180);
    let mut row = serde_json::to_value(&record).unwrap();
    row["user_email"] = json!(EMAIL);

    Mock::given(method("GET"))
        .and(path("/rest/v1/workhistories"))
        .and(query_param("select", "*"))
        .and(query_param("user_email", "eq.taro@example.com"))
        .and(header("apikey", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .expect(1)
        .mount(&server)
        .await;

    let loaded = store_for(&server).load_records().await.unwrap();

    assert_eq!(loaded, vec![record]);
}

#[tokio::test]
async fn test_select_with_date_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/daily_reports"))
        .and(query_param("date", "eq.2025-07-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = RowFilter {
        user_email: None,
        date: Some("2025-07-01".into()),
    };
    let rows: Vec<DailyReport> = store_for(&server).select("daily_reports", &filter).await.unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_mark_included_patches_by_id_list() {
    let server = MockServer::start().await;
    let a = sample_record("A社", "保守", "09:00", "12:00", 180);
    let b = sample_record("B社", "開発", "13:00", "17:00", 240);

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/workhistories"))
        .and(query_param("id", format!("in.({},{})", a.id, b.id)))
        .and(header("apikey", KEY))
        .and(body_json(json!({ "daily_report_included": true })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).mark_included(&[a.id, b.id]).await.unwrap();
}

#[tokio::test]
async fn test_mark_included_with_no_ids_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    store_for(&server).mark_included(&[]).await.unwrap();
}

#[tokio::test]
async fn test_error_status_maps_to_storage_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/workhistories"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"message":"relation not found"}"#),
        )
        .mount(&server)
        .await;

    let err = store_for(&server).load_records().await.unwrap_err();

    match err {
        AppError::Storage(msg) => {
            assert!(msg.starts_with("HTTP 404: "));
            assert!(msg.contains("relation not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_insert_maps_to_storage_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/workhistories"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let record = sample_record("A社", "保守", "09:00", "12:00", 180);
    let err = store_for(&server).append_record(&record).await.unwrap_err();

    assert_eq!(err.to_string(), "Storage error: HTTP 401: invalid api key");
}

#[tokio::test]
async fn test_ping_counts_own_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/workhistories"))
        .and(query_param("user_email", "eq.taro@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{}, {}])))
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).ping().await.unwrap(), 2);
}

#[tokio::test]
async fn test_unreachable_remote_store_reports_an_error() {
    let store = RemoteStore::new("http://127.0.0.1:9", "key", EMAIL);
    let record = sample_record("A社", "保守", "09:00", "12:00", 180);

    assert!(matches!(
        store.append_record(&record).await,
        Err(AppError::Http(_))
    ));
    assert!(store.load_records().await.is_err());
}
