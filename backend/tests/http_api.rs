#![cfg(feature = "http-server")]

mod support;

use std::io::Write;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use room_usage::http::{create_router, AppState};
use room_usage::models::{Event, EventId};
use room_usage::source::{EventSource, FileEventSource, LocalEventSource};
use support::{bangkok, MARCH_EVENTS_JSON};

fn server_with(source: Arc<dyn EventSource>) -> TestServer {
    let app = create_router(AppState::new(source, bangkok()));
    TestServer::new(app).unwrap()
}

/// Events happening right now, so GET requests land in today's window.
fn current_events() -> Vec<Event> {
    let start = Utc::now();
    let event = |id: &str, title: &str, location: &str, minutes: i64| Event {
        id: EventId::from(id),
        title: title.to_string(),
        start_dt: start.fixed_offset(),
        end_dt: (start + Duration::minutes(minutes)).fixed_offset(),
        location: Some(location.to_string()),
        who: None,
        notes: None,
    };
    vec![
        event("1", "cpe Lecture", "Room A", 60),
        event("2", "mcpe Lab", "Room A", 120),
        event("3", "Room reservation", "Room B", 30),
    ]
}

#[tokio::test]
async fn test_health_check() {
    let server = server_with(Arc::new(LocalEventSource::new()));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["source"], "local");
    assert_eq!(body["source_status"], "available");
}

#[tokio::test]
async fn test_health_reports_missing_file() {
    let server = server_with(Arc::new(FileEventSource::new("/nonexistent/events.json")));

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["source"], "file");
    assert_eq!(body["source_status"], "unavailable");
}

#[tokio::test]
async fn test_get_summary_today() {
    let server = server_with(Arc::new(LocalEventSource::with_events(current_events())));

    let response = server.get("/v1/summary").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_events"], 3);
    assert_eq!(body["rooms"][0]["room"], "Room A");
    assert_eq!(body["rooms"][0]["total"], 2);
    assert_eq!(body["rooms"][0]["majors"]["CPE"], 1);
    assert_eq!(body["rooms"][0]["majors"]["MCPE"], 1);
    assert_eq!(body["rooms"][1]["majors"]["OTHER"], 1);
    assert_eq!(body["statistics"]["average_duration"], "70.00");
    assert_eq!(body["listing"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_summary_with_filters_and_search() {
    let server = server_with(Arc::new(LocalEventSource::with_events(current_events())));

    let response = server
        .get("/v1/summary")
        .add_query_param("mode", "week")
        .add_query_param("filters", "cpe")
        .add_query_param("search", "lab")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["request"]["mode"], "week");
    assert_eq!(body["request"]["filters"]["cpe"], true);
    assert_eq!(body["total_events"], 2);
    let listing = body["listing"].as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["title"], "mcpe Lab");
}

#[tokio::test]
async fn test_unknown_filter_is_bad_request() {
    let server = server_with(Arc::new(LocalEventSource::new()));

    let response = server
        .get("/v1/summary")
        .add_query_param("filters", "cpe,physics")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_source_failure_is_internal_error() {
    let server = server_with(Arc::new(FileEventSource::new("/nonexistent/events.json")));

    let response = server.get("/v1/summary").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "SOURCE_ERROR");
    assert_eq!(body["details"], "/nonexistent/events.json");
}

#[tokio::test]
async fn test_malformed_source_file_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{not json").unwrap();
    let server = server_with(Arc::new(FileEventSource::new(file.path())));

    let response = server.get("/v1/summary").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "SOURCE_ERROR");
    assert!(body["details"].as_str().unwrap().contains("Invalid JSON syntax"));
}

#[tokio::test]
async fn test_post_summary_uses_posted_events_and_now() {
    let server = server_with(Arc::new(LocalEventSource::new()));
    let events: Value = serde_json::from_str(MARCH_EVENTS_JSON).unwrap();

    let response = server
        .post("/v1/summary")
        .json(&json!({
            "events": events,
            "mode": "month",
            "now": "2024-03-05T05:00:00Z"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_events"], 4);
    assert_eq!(body["raw_category_counts"]["CPE"], 3);
    assert_eq!(body["statistics"]["average_duration"], "82.50");
    assert_eq!(body["statistics"]["peak_hour"], "09:00 - 10:00");
    assert_eq!(body["charts"]["room_usage"]["entries"][0]["color"], "hsl(0, 70%, 50%)");
}

#[tokio::test]
async fn test_post_summary_rejects_bad_event() {
    let server = server_with(Arc::new(LocalEventSource::new()));

    let response = server
        .post("/v1/summary")
        .json(&json!({
            "events": [{"id": "1", "title": "cpe Lecture"}],
            "now": "2024-03-05T05:00:00Z"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "PARSE_ERROR");
    assert!(body["message"].as_str().unwrap().contains("index 0"));
    assert_eq!(body["details"], "events");
}

#[tokio::test]
async fn test_post_summary_rejects_unknown_filter() {
    let server = server_with(Arc::new(LocalEventSource::new()));

    let response = server
        .post("/v1/summary")
        .json(&json!({"events": [], "filters": ["Physics"]}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_summary_without_events_is_bad_request() {
    let server = server_with(Arc::new(LocalEventSource::new()));

    let response = server.post("/v1/summary").json(&json!({"mode": "day"})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_chart() {
    let server = server_with(Arc::new(LocalEventSource::with_events(current_events())));

    let response = server.get("/v1/charts/event-count").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["kind"], "event-count");
    assert_eq!(body["data"]["title"], "Event Count");
    let values: Vec<u64> = body["data"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["value"].as_u64().unwrap())
        .collect();
    // ISNE, CPE ("cpe Lecture" and "mcpe Lab"), MCPE
    assert_eq!(values, vec![0, 2, 1]);
}

#[tokio::test]
async fn test_get_statistics_chart_by_tab_id() {
    let server = server_with(Arc::new(LocalEventSource::new()));

    let body: Value = server.get("/v1/charts/statistic").await.json();
    assert_eq!(body["kind"], "statistics");
    assert_eq!(body["data"]["peak_hour"], "N/A");
    assert_eq!(body["data"]["average_duration"], "N/A");
}

#[tokio::test]
async fn test_unknown_chart_is_bad_request() {
    let server = server_with(Arc::new(LocalEventSource::new()));

    let response = server.get("/v1/charts/pie").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters() {
    let server = server_with(Arc::new(LocalEventSource::new()));

    let body: Value = server.get("/v1/filters").await.json();

    let filters = body["filters"].as_array().unwrap();
    assert_eq!(filters.len(), 6);
    assert_eq!(filters[3]["name"], "RoomReservation");
    assert_eq!(filters[3]["keyword"], "Room reservation");
    assert_eq!(body["modes"], json!(["day", "week", "month"]));
}
