// src/lib.rs
// Public library surface for integration tests (and the binary).

pub mod ads;
pub mod ai;
pub mod ai_bootstrap;
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod fetcher;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod sector;
pub mod sector_mapper;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::controller::{FeedController, FeedSnapshot};
pub use crate::feed::assemble;
pub use crate::fetcher::NewsFetcher;
pub use crate::model::{AdItem, FeedItem, NewsItem};
pub use crate::sector::Sector;
pub use crate::sector_mapper::map_sector;

use std::sync::Arc;

use axum::Router;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::ai::client::build_client_from_config;
use crate::config::{AiConfig, FeedConfig};

/// Wire configs into shared state. No fetch is started.
pub fn build_state(ai: &AiConfig, feed: &FeedConfig) -> anyhow::Result<AppState> {
    let client = build_client_from_config(ai)?;
    let fetcher = NewsFetcher::new(client)
        .with_item_count(feed.item_count)
        .with_search_grounding(ai.search_grounding);
    Ok(AppState {
        feed: Arc::new(FeedController::new(fetcher, feed.ad_frequency)),
    })
}

/// Full in-process app: configs from disk/env, initial load kicked off,
/// `/metrics` mounted when `DEBUG_ROUTES=1`.
pub async fn app() -> anyhow::Result<Router> {
    let ai = AiConfig::load_default()?;
    let feed = FeedConfig::load_default()?;
    info!(
        provider = %ai.provider,
        enabled = ai.enabled,
        ad_frequency = feed.ad_frequency,
        item_count = feed.item_count,
        initial = %feed.initial_sector,
        "feed service configured"
    );

    let state = build_state(&ai, &feed)?;
    state.feed.spawn_load(feed.initial_sector);

    let mut router = api::router(state);
    if std::env::var("DEBUG_ROUTES").ok().as_deref() == Some("1") {
        static METRICS: OnceCell<crate::metrics::Metrics> = OnceCell::new();
        match METRICS.get_or_try_init(crate::metrics::Metrics::init) {
            Ok(m) => router = router.merge(m.router()),
            Err(e) => warn!(error = ?e, "metrics recorder unavailable; /metrics not mounted"),
        }
    }
    Ok(router)
}

/// Call this from the entrypoint (after tracing init) to perform a one-off
/// probe of the remote client. It won't panic on failure; it just logs.
pub async fn run_ai_quick_probe() -> anyhow::Result<()> {
    let ai = ai_bootstrap::AiRuntime::from_config(AiConfig::load_default()?)?;
    ai.quick_probe().await;
    Ok(())
}
