//! Feed data model: news cards, sponsored cards, and the mixed feed.

use serde::{Deserialize, Serialize};

use crate::sector::Sector;

/// URL used when the model returns none.
pub const PLACEHOLDER_URL: &str = "#";

/// A single news card. Created fresh on every fetch; `id` is unique within
/// one fetch only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    /// Always one of the eight concrete sectors.
    pub sector: Sector,
    pub summary: String,
    pub source: String,
    /// Relative, display-only ("3시간 전", "2 hours ago").
    pub date: String,
    pub url: String,
    pub image_url: String,
}

/// Sponsored card. Ads come from a fixed pool and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdItem {
    pub title: &'static str,
    pub description: &'static str,
    pub cta_text: &'static str,
    pub sponsor: &'static str,
    pub image_url: &'static str,
}

/// One entry of the rendered feed. Order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedItem {
    News(NewsItem),
    Ad(AdItem),
}

impl FeedItem {
    pub fn is_ad(&self) -> bool {
        matches!(self, FeedItem::Ad(_))
    }

    pub fn as_news(&self) -> Option<&NewsItem> {
        match self {
            FeedItem::News(n) => Some(n),
            FeedItem::Ad(_) => None,
        }
    }
}
