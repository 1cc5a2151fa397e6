// tests/gemini_http.rs
//
// Gemini provider over real HTTP against an in-process upstream.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;
use parking_lot::Mutex;
use sector_news_feed::ai::{GeminiProvider, GenerationClient, GenerationRequest};
use sector_news_feed::config::AiConfig;
use sector_news_feed::error::FetchError;
use sector_news_feed::fallback::fallback_news;
use sector_news_feed::fetcher::{NewsFetcher, NewsOrigin};
use sector_news_feed::Sector;
use serde_json::{json, Value};

const MODEL: &str = "gemini-test";
const KEY: &str = "test-key";

#[derive(Debug, Clone)]
struct Seen {
    path: String,
    api_key: Option<String>,
    body: Value,
}

/// Canned upstream: answers every request with one fixed status and body.
#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

async fn generate_content(
    State(up): State<Upstream>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    up.seen.lock().push(Seen {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    (up.status, up.body.clone())
}

/// Start the upstream on an ephemeral port; returns a provider pointed at it.
async fn serve(status: StatusCode, body: String) -> (GeminiProvider, Arc<Mutex<Vec<Seen>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(generate_content).with_state(Upstream {
        status,
        body,
        seen: Arc::clone(&seen),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let cfg = AiConfig {
        enabled: true,
        model: MODEL.into(),
        api_key: KEY.into(),
        timeout_secs: Some(5),
        ..AiConfig::default()
    };
    let provider = GeminiProvider::from_config(&cfg)
        .unwrap()
        .with_base_url(format!("http://{addr}/v1beta/"));
    (provider, seen)
}

fn request() -> GenerationRequest {
    GenerationRequest {
        prompt: "news please".into(),
        response_schema: json!({ "type": "ARRAY" }),
        search_grounding: true,
    }
}

#[tokio::test]
async fn quota_status_maps_to_status_error_and_fallback() {
    let body = r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#.to_string();
    let (provider, seen) = serve(StatusCode::TOO_MANY_REQUESTS, body).await;

    match provider.generate(&request()).await {
        Err(FetchError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("RESOURCE_EXHAUSTED"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    let fetcher = NewsFetcher::new(Arc::new(provider));
    let out = fetcher.fetch(Sector::Energy).await;
    assert_eq!(out.origin, NewsOrigin::Fallback);
    assert_eq!(out.items, fallback_news(Sector::Energy));
    assert_eq!(seen.lock().len(), 2);
}

#[tokio::test]
async fn fenced_text_across_parts_is_parsed() {
    let items = r#"[{"title": "SMR 계약", "sector": "Energy", "summary": "전력 수요 증가.", "source": "WSJ", "date": "1h", "url": "https://www.wsj.com/x"},
 {"title": "핵융합 실증로 착공", "sector": "Nuclear Fusion", "summary": "상용화 일정 단축.", "source": "Reuters", "date": "3h"}]"#;
    let body = json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": "```json\n" }, { "text": format!("{items}\n```") }]
            }
        }]
    })
    .to_string();
    let (provider, seen) = serve(StatusCode::OK, body).await;

    let fetcher = NewsFetcher::new(Arc::new(provider)).with_item_count(2);
    let out = fetcher.fetch(Sector::Energy).await;
    assert_eq!(out.origin, NewsOrigin::Remote);
    assert_eq!(out.items.len(), 2);
    assert_eq!(out.items[0].sector, Sector::Energy);
    assert_eq!(out.items[0].url, "https://www.wsj.com/x");
    assert_eq!(out.items[1].sector, Sector::NuclearFusion);
    assert_eq!(out.items[1].url, "#");

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    let call = &seen[0];
    assert_eq!(call.path, format!("/v1beta/models/{MODEL}:generateContent"));
    assert_eq!(call.api_key.as_deref(), Some(KEY));
    assert!(call.body["tools"][0].get("google_search").is_some());
    assert_eq!(
        call.body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    let prompt = call.body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Energy"));
}

#[tokio::test]
async fn empty_candidates_fall_back() {
    let (provider, _seen) = serve(StatusCode::OK, r#"{"candidates": []}"#.to_string()).await;

    let err = provider.generate(&request()).await.unwrap_err();
    assert_eq!(err.kind(), "empty_candidate");

    let fetcher = NewsFetcher::new(Arc::new(provider));
    let out = fetcher.fetch(Sector::Space).await;
    assert_eq!(out.origin, NewsOrigin::Fallback);
    assert_eq!(out.items, fallback_news(Sector::Space));
}
