// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /        (liveness/version)
// - GET /news    (snapshot passthrough)
// - GET /important
// - GET /city, POST /city (success + missing-field error)

use std::sync::Arc;

use axum::{
    body::{self, Body},
    Router,
};
use http::{Request, StatusCode};
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`

use newswatch::api::{create_router, AppState};
use newswatch::store::{CityCell, ClassifiedItem, NewsStore, Snapshot};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

struct TestApp {
    router: Router,
    store: Arc<NewsStore>,
}

fn test_app(city: &str) -> TestApp {
    let store = Arc::new(NewsStore::new());
    let state = AppState::new(store.clone(), Arc::new(CityCell::new(city)));
    TestApp {
        router: create_router(state),
        store,
    }
}

fn sample_item(title: &str, important: bool) -> ClassifiedItem {
    ClassifiedItem {
        title: title.to_string(),
        link: "https://news.example/1".to_string(),
        category: if important { "keyword" } else { "general" }.to_string(),
        score: if important { 0.75 } else { 0.0 },
        time: "2026-08-24 12:00:00".to_string(),
        is_important: important,
    }
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET request");
    let resp = router.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("parse json"))
}

async fn post_json(router: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST request");
    let resp = router.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("parse json"))
}

#[tokio::test]
async fn root_reports_version() {
    let app = test_app("Delhi");
    let (status, v) = get_json(app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(v.get("msg").is_some(), "missing 'msg'");
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn news_is_empty_before_first_cycle() {
    let app = test_app("Delhi");
    let (status, v) = get_json(app.router, "/news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["news"], json!([]));
}

#[tokio::test]
async fn news_and_important_serve_the_published_snapshot() {
    let app = test_app("Delhi");
    app.store.publish(Snapshot {
        news: vec![sample_item("calm day", false), sample_item("riot downtown", true)],
        important: vec![sample_item("riot downtown", true)],
        cycle: 1,
    });

    let (status, v) = get_json(app.router.clone(), "/news").await;
    assert_eq!(status, StatusCode::OK);
    let news = v["news"].as_array().expect("news array");
    assert_eq!(news.len(), 2);
    assert_eq!(news[1]["title"], "riot downtown");
    assert_eq!(news[1]["is_important"], true);
    assert_eq!(news[1]["score"], 0.75);

    let (status, v) = get_json(app.router, "/important").await;
    assert_eq!(status, StatusCode::OK);
    let important = v["important"].as_array().expect("important array");
    assert_eq!(important.len(), 1);
    assert_eq!(important[0]["category"], "keyword");
}

#[tokio::test]
async fn city_roundtrip_updates_the_shared_cell() {
    let app = test_app("Delhi");

    let (status, v) = get_json(app.router.clone(), "/city").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["city"], "Delhi");

    let (status, v) = post_json(app.router.clone(), "/city", json!({ "city": " Mumbai " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "success");
    assert_eq!(v["city"], "Mumbai");

    let (_, v) = get_json(app.router, "/city").await;
    assert_eq!(v["city"], "Mumbai");
}

#[tokio::test]
async fn city_update_without_field_is_a_structured_error() {
    let app = test_app("Delhi");
    let (status, v) = post_json(app.router.clone(), "/city", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["status"], "error");
    assert_eq!(v["message"], "City not provided");

    // Blank values are rejected the same way.
    let (status, _) = post_json(app.router.clone(), "/city", json!({ "city": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The configured city is untouched.
    let (_, v) = get_json(app.router, "/city").await;
    assert_eq!(v["city"], "Delhi");
}
