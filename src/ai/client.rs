//! Remote generation seam: provider abstraction + Gemini provider + stubs.
//!
//! The fetcher only sees `DynGenerationClient`; the process never holds a
//! global client, so tests inject stubs directly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ai::AiConfig;
use crate::error::FetchError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// One structured-generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Response schema in the service's OpenAPI subset.
    pub response_schema: Value,
    pub search_grounding: bool,
}

/// Trait object used by the fetcher (and tests).
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Raw response text; may be wrapped in Markdown code fences.
    async fn generate(&self, req: &GenerationRequest) -> Result<String, FetchError>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

pub type DynGenerationClient = Arc<dyn GenerationClient>;

/// Factory: build a client according to config and environment variables.
///
/// * `AI_TEST_MODE=mock` returns a stub with a canned six-item body.
/// * `AI_TEST_MODE=fail` returns a client that always fails (fallback path).
/// * Else if `config.enabled == false`, returns a disabled client.
/// * Else builds the Gemini provider.
pub fn build_client_from_config(config: &AiConfig) -> anyhow::Result<DynGenerationClient> {
    match std::env::var("AI_TEST_MODE").ok().as_deref() {
        Some("mock") => return Ok(Arc::new(StubClient::new(MOCK_BODY))),
        Some("fail") => return Ok(Arc::new(FailingClient)),
        _ => {}
    }

    if !config.enabled {
        return Ok(Arc::new(DisabledClient));
    }

    match config.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiProvider::from_config(config)?)),
        other => anyhow::bail!("Unsupported provider in config: {other}"),
    }
}

// ------------------------------------------------------------
// Gemini
// ------------------------------------------------------------

pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn from_config(config: &AiConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent("sector-news-feed/0.1 (+github.com/lumlich/sector-news-feed)")
            .connect_timeout(Duration::from_secs(4));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point at a different endpoint (local mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
struct GenerateResp {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub(crate) fn build_body(req: &GenerationRequest) -> Value {
    let tools = if req.search_grounding {
        vec![json!({ "google_search": {} })]
    } else {
        Vec::new()
    };
    let body = GenerateBody {
        contents: vec![Content {
            role: "user",
            parts: vec![TextPart { text: &req.prompt }],
        }],
        tools,
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &req.response_schema,
        },
    };
    serde_json::to_value(body).unwrap_or(Value::Null)
}

#[async_trait]
impl GenerationClient for GeminiProvider {
    async fn generate(&self, req: &GenerationRequest) -> Result<String, FetchError> {
        if self.api_key.is_empty() {
            return Err(FetchError::MissingApiKey("gemini"));
        }

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_body(req))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(300).collect(),
            });
        }

        let body: GenerateResp = serde_json::from_str(&resp.text().await?)?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .ok_or(FetchError::EmptyCandidate)?;
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

// ------------------------------------------------------------
// Stubs
// ------------------------------------------------------------

/// Always fails; used when AI is disabled in config.
pub struct DisabledClient;

#[async_trait]
impl GenerationClient for DisabledClient {
    async fn generate(&self, _req: &GenerationRequest) -> Result<String, FetchError> {
        Err(FetchError::Disabled)
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Always fails with a transport-like error.
pub struct FailingClient;

#[async_trait]
impl GenerationClient for FailingClient {
    async fn generate(&self, _req: &GenerationRequest) -> Result<String, FetchError> {
        Err(FetchError::Other("forced failure".to_string()))
    }
    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

/// Returns a fixed body and counts calls.
pub struct StubClient {
    body: String,
    calls: AtomicUsize,
}

impl StubClient {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for StubClient {
    async fn generate(&self, _req: &GenerationRequest) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

/// Canned response for `AI_TEST_MODE=mock`.
pub const MOCK_BODY: &str = r#"```json
[
  {"title": "엔비디아, 차세대 GPU 출하 확대", "sector": "AI", "summary": "데이터센터 수요가 견조합니다. 실적 가이던스 상향이 기대됩니다.", "source": "Bloomberg", "date": "1시간 전", "url": "https://www.bloomberg.com"},
  {"title": "애플, 온디바이스 AI 전략 공개", "sector": "Big Tech", "summary": "서비스 매출 성장 동력이 강화됩니다.", "source": "The Verge", "date": "2시간 전", "url": ""},
  {"title": "휴머노이드 로봇 양산 계획 발표", "sector": "Robotics", "summary": "공급망 수혜 기업에 주목할 필요가 있습니다.", "source": "Reuters", "date": "4시간 전"},
  {"title": "SMR 전력 공급 계약 잇따라", "sector": "Energy", "summary": "전력 인프라 투자가 가속화됩니다.", "source": "WSJ", "date": "6시간 전", "url": "https://www.wsj.com"},
  {"title": "TSMC, 2나노 공정 수율 개선", "sector": "Semiconductors", "summary": "파운드리 경쟁 구도에 변화가 예상됩니다.", "source": "Nikkei", "date": "8시간 전", "url": "https://asia.nikkei.com"},
  {"title": "위성 인터넷 가입자 급증", "sector": "Space", "summary": "우주 인프라 매출 가시성이 높아졌습니다.", "source": "SpaceNews", "date": "1일 전", "url": "https://spacenews.com"}
]
```"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn req(grounding: bool) -> GenerationRequest {
        GenerationRequest {
            prompt: "hello".into(),
            response_schema: json!({ "type": "ARRAY" }),
            search_grounding: grounding,
        }
    }

    #[test]
    fn body_carries_schema_and_search_tool() {
        let v = build_body(&req(true));
        assert_eq!(v["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(v["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(v["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(v["tools"][0].get("google_search").is_some());
    }

    #[test]
    fn body_omits_tools_without_grounding() {
        let v = build_body(&req(false));
        assert!(v.get("tools").is_none());
    }

    #[tokio::test]
    async fn provider_without_key_fails_before_network() {
        let cfg = AiConfig {
            enabled: true,
            api_key: String::new(),
            ..AiConfig::default()
        };
        let p = GeminiProvider::from_config(&cfg).unwrap();
        let err = p.generate(&req(true)).await.unwrap_err();
        assert_eq!(err.kind(), "missing_key");
    }

    #[tokio::test]
    async fn stub_counts_calls() {
        let s = StubClient::new("[]");
        assert_eq!(s.generate(&req(false)).await.unwrap(), "[]");
        assert_eq!(s.calls(), 1);
    }
}
