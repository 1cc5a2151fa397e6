// tests/app_boot.rs
//
// Full in-process app as the binary builds it, with the mock client.

use std::time::Duration;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

async fn build_app() -> Router {
    sector_news_feed::app()
        .await
        .expect("app() should build Router in tests")
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[serial_test::serial]
#[tokio::test]
async fn initial_load_completes_and_metrics_are_exposed() {
    std::env::set_var("AI_TEST_MODE", "mock");
    std::env::set_var("DEBUG_ROUTES", "1");
    std::env::set_var("FEED_CONFIG_PATH", "does/not/exist.toml");
    std::env::remove_var("FEED_AD_FREQUENCY");
    std::env::remove_var("FEED_ITEM_COUNT");

    let app = build_app().await;

    let mut snap = Value::Null;
    for _ in 0..50 {
        let (status, body) = get_json(&app, "/api/feed").await;
        assert_eq!(status, StatusCode::OK);
        snap = serde_json::from_str(&body).unwrap();
        if snap["loading"] == false && snap["news_count"] != 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(snap["sector"], "ALL");
    assert_eq!(snap["news_count"], 6);
    assert_eq!(snap["feed_items"].as_array().unwrap().len(), 7);

    let (status, text) = get_json(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("feed_fetch_total"), "metrics body: {text}");
    assert!(text.contains("feed_items_current"), "metrics body: {text}");

    std::env::remove_var("AI_TEST_MODE");
    std::env::remove_var("DEBUG_ROUTES");
    std::env::remove_var("FEED_CONFIG_PATH");
}
