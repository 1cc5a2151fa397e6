//! # Feed Controller
//! Owns the feed view state: selected sector, current news, assembled feed,
//! `loading`, and `error`.
//!
//! Every sector selection (or retry) issues a new request token. A fetch
//! result is applied only if its token is still the latest one; older
//! results are dropped, so a slow response for a previous sector can never
//! overwrite a newer selection. State is replaced wholesale, never patched.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use metrics::{counter, gauge};
use serde::Serialize;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

use crate::feed::assemble_with_sample_ads;
use crate::fetcher::NewsFetcher;
use crate::model::{FeedItem, NewsItem};
use crate::sector::Sector;

/// Shown when the fetch task itself dies (panic/cancellation).
pub const LOAD_ERROR: &str = "Failed to load news. Please try again.";

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub sector: Sector,
    pub heading: String,
    /// News items only; ads excluded.
    pub news_count: usize,
    pub feed_items: Vec<FeedItem>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct FeedState {
    sector: Sector,
    news: Vec<NewsItem>,
    feed_items: Vec<FeedItem>,
    loading: bool,
    error: Option<String>,
    latest_token: u64,
}

pub struct FeedController {
    fetcher: NewsFetcher,
    ad_frequency: usize,
    state: RwLock<FeedState>,
}

impl FeedController {
    pub fn new(fetcher: NewsFetcher, ad_frequency: usize) -> Self {
        Self {
            fetcher,
            ad_frequency: ad_frequency.max(1),
            state: RwLock::new(FeedState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FeedState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FeedState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn sector(&self) -> Sector {
        self.read().sector
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let st = self.read();
        FeedSnapshot {
            sector: st.sector,
            heading: st.sector.heading(),
            news_count: st.news.len(),
            feed_items: st.feed_items.clone(),
            loading: st.loading,
            error: st.error.clone(),
        }
    }

    /// Start a request for `sector`: records the selection, sets `loading`,
    /// clears `error`, and returns the new request token.
    pub fn begin(&self, sector: Sector) -> u64 {
        let mut st = self.write();
        st.latest_token += 1;
        st.sector = sector;
        st.loading = true;
        st.error = None;
        info!(target: "feed", %sector, token = st.latest_token, "fetch started");
        st.latest_token
    }

    /// Apply the outcome of request `token`. Returns `false` (and leaves the
    /// state untouched) if a newer request has been issued since.
    pub fn complete(&self, token: u64, outcome: Result<Vec<NewsItem>, JoinError>) -> bool {
        let mut st = self.write();
        if token != st.latest_token {
            info!(target: "feed", token, latest = st.latest_token, "stale fetch result discarded");
            counter!("feed_stale_discarded_total").increment(1);
            return false;
        }

        match outcome {
            Ok(news) => {
                st.feed_items = assemble_with_sample_ads(&news, self.ad_frequency);
                st.news = news;
                st.error = None;
                gauge!("feed_items_current").set(st.feed_items.len() as f64);
                info!(
                    target: "feed",
                    sector = %st.sector,
                    news = st.news.len(),
                    feed = st.feed_items.len(),
                    "feed applied"
                );
            }
            Err(e) => {
                error!(target: "feed", error = %e, sector = %st.sector, "fetch task failed");
                counter!("feed_fetch_task_errors_total").increment(1);
                st.error = Some(LOAD_ERROR.to_string());
            }
        }
        st.loading = false;
        true
    }

    /// Run request `token` on its own task: the fetch, then `complete`.
    /// The outer task owns the completion, so dropping the caller's future
    /// never leaves `loading` set.
    fn launch(self: &Arc<Self>, token: u64, sector: Sector) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let fetcher = this.fetcher.clone();
            let outcome = tokio::spawn(async move { fetcher.fetch_news(sector).await }).await;
            this.complete(token, outcome);
        })
    }

    /// Sector setter: fetch for `sector`, wait for it, return the resulting view.
    ///
    /// The returned snapshot is the controller's state at completion time. If
    /// a newer selection superseded this one meanwhile, it reflects that newer
    /// selection (possibly still `loading`), not `sector`.
    pub async fn select_sector(self: &Arc<Self>, sector: Sector) -> FeedSnapshot {
        let token = self.begin(sector);
        if let Err(e) = self.launch(token, sector).await {
            error!(target: "feed", error = %e, token, "fetch completion task failed");
        }
        self.snapshot()
    }

    /// Explicit user retry of the current sector.
    pub async fn retry(self: &Arc<Self>) -> FeedSnapshot {
        self.select_sector(self.sector()).await
    }

    /// Fire-and-forget load; `loading` is set before this returns.
    pub fn spawn_load(self: &Arc<Self>, sector: Sector) -> JoinHandle<()> {
        let token = self.begin(sector);
        self.launch(token, sector)
    }
}
