//! # News Fetcher
//! Sector → prompt → remote structured generation → normalized `NewsItem`s.
//!
//! Single attempt, no retry. Any failure (transport, status, quota, body
//! that is not a JSON array of the expected objects) discards the whole
//! response and returns the fallback set for the requested sector. The
//! fetcher itself never fails and mutates no local state.

use std::time::Instant;

use metrics::{counter, histogram};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::ai::client::{DynGenerationClient, GenerationRequest};
use crate::config::feed::DEFAULT_ITEM_COUNT;
use crate::error::FetchError;
use crate::fallback::fallback_news;
use crate::model::{NewsItem, PLACEHOLDER_URL};
use crate::normalize::normalize_text;
use crate::sector::{Sector, CONCRETE_SECTORS};
use crate::sector_mapper::map_sector;

/// Where a fetch result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsOrigin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub items: Vec<NewsItem>,
    pub origin: NewsOrigin,
}

#[derive(Clone)]
pub struct NewsFetcher {
    client: DynGenerationClient,
    item_count: usize,
    search_grounding: bool,
}

impl NewsFetcher {
    pub fn new(client: DynGenerationClient) -> Self {
        Self {
            client,
            item_count: DEFAULT_ITEM_COUNT,
            search_grounding: true,
        }
    }

    pub fn with_item_count(mut self, n: usize) -> Self {
        self.item_count = n.max(1);
        self
    }

    pub fn with_search_grounding(mut self, on: bool) -> Self {
        self.search_grounding = on;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    /// Live news for `sector`, or the fallback set on any failure.
    pub async fn fetch_news(&self, sector: Sector) -> Vec<NewsItem> {
        self.fetch(sector).await.items
    }

    /// Same as [`fetch_news`](Self::fetch_news) but reports the origin.
    pub async fn fetch(&self, sector: Sector) -> FetchOutcome {
        crate::metrics::ensure_described();
        counter!("feed_fetch_total", "sector" => sector.as_str()).increment(1);
        let t0 = Instant::now();

        let req = GenerationRequest {
            prompt: build_prompt(sector, self.item_count),
            response_schema: response_schema(),
            search_grounding: self.search_grounding,
        };

        let result = match self.client.generate(&req).await {
            Ok(text) => parse_news(&text, now_millis()),
            Err(e) => Err(e),
        };
        histogram!("feed_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        match result {
            Ok(items) => {
                debug!(
                    target: "fetcher",
                    sector = %sector,
                    provider = self.client.provider_name(),
                    count = items.len(),
                    "remote news parsed"
                );
                FetchOutcome {
                    items,
                    origin: NewsOrigin::Remote,
                }
            }
            Err(e) => {
                warn!(
                    target: "fetcher",
                    sector = %sector,
                    provider = self.client.provider_name(),
                    kind = e.kind(),
                    error = %e,
                    "failed to fetch news; serving fallback"
                );
                counter!("feed_fetch_failures_total", "kind" => e.kind()).increment(1);
                counter!("feed_fallback_total").increment(1);
                FetchOutcome {
                    items: fallback_news(sector),
                    origin: NewsOrigin::Fallback,
                }
            }
        }
    }
}

// ------------------------------------------------------------
// Prompt + schema
// ------------------------------------------------------------

pub fn search_query(sector: Sector) -> String {
    if sector.is_all() {
        "latest investment news in AI, Big Tech, Energy, and Space sectors".to_string()
    } else {
        format!("latest investment news and breakthroughs in {sector} sector")
    }
}

pub fn build_prompt(sector: Sector, item_count: usize) -> String {
    let allowed = CONCRETE_SECTORS
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are a professional investment analyst.\n\
         Task: Search for the latest, most impactful news regarding \"{query}\".\n\
         \n\
         Return exactly {item_count} distinct news items in JSON format.\n\
         For each item, provide:\n\
         1. title: A catchy, concise title (in Korean).\n\
         2. sector: The specific sector (Choose strictly from: {allowed}).\n\
         3. summary: A \"Key Takeaway\" summary (max 2 sentences, in Korean) explaining why this is important for investors.\n\
         4. source: A plausible source name (e.g., Bloomberg, TechCrunch).\n\
         5. date: A relative date (e.g., '2 hours ago').\n\
         6. url: The URL to the news article if found, otherwise use a placeholder.\n\
         \n\
         Ensure the tone is professional, insightful, and concise.",
        query = search_query(sector),
    )
}

/// Array of objects; `url` is the only optional field.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title":   { "type": "STRING" },
                "sector":  { "type": "STRING" },
                "summary": { "type": "STRING" },
                "source":  { "type": "STRING" },
                "date":    { "type": "STRING" },
                "url":     { "type": "STRING" }
            },
            "required": ["title", "sector", "summary", "source", "date"]
        }
    })
}

// ------------------------------------------------------------
// Response handling
// ------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawNewsItem {
    title: String,
    sector: String,
    summary: String,
    source: String,
    date: String,
    #[serde(default)]
    url: Option<String>,
}

/// Remove an optional surrounding Markdown code fence (```` ```json ```` or
/// bare ```` ``` ````).
pub fn strip_code_fences(text: &str) -> &str {
    let t = text.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse the model's text into news items. `now_ms` seeds the identifiers
/// (`news-<now_ms>-<index>`). Empty text is an empty list; anything that is
/// not an array of complete objects is an error (no partial salvage).
pub fn parse_news(text: &str, now_ms: i64) -> Result<Vec<NewsItem>, FetchError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<RawNewsItem> = serde_json::from_str(body)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(index, it)| to_news_item(it, index, now_ms))
        .collect())
}

fn to_news_item(raw: RawNewsItem, index: usize, now_ms: i64) -> NewsItem {
    let url = raw
        .url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_URL.to_string());

    NewsItem {
        id: format!("news-{now_ms}-{index}"),
        title: normalize_text(&raw.title),
        sector: map_sector(&raw.sector),
        summary: normalize_text(&raw.summary),
        source: normalize_text(&raw.source),
        date: normalize_text(&raw.date),
        url,
        image_url: placeholder_image(&raw.sector, index),
    }
}

/// Stable image address for a (raw sector label, index) pair.
pub fn placeholder_image(sector_label: &str, index: usize) -> String {
    let seed = format!("{sector_label}-{index}");
    format!(
        "https://picsum.photos/seed/{}/800/600",
        urlencoding::encode(&seed)
    )
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
