//! # Feed Assembler
//! Pure, deterministic interleaving of news and sponsored cards.
//!
//! After the news item at 1-based position `k`, when `k % period == 0`, the
//! ad at `ads[(k / period) % ads.len()]` is appended. No news means no ads.
//! With the default period of 5 the first injected ad is `ads[1]`.

use crate::ads::{AD_FREQUENCY, SAMPLE_ADS};
use crate::model::{AdItem, FeedItem, NewsItem};

/// Assemble with the fixed period `AD_FREQUENCY`.
pub fn assemble(news: &[NewsItem], ads: &[AdItem]) -> Vec<FeedItem> {
    assemble_with_period(news, ads, AD_FREQUENCY)
}

/// Assemble with an explicit ad period. A period of 0 is treated as 1;
/// an empty ad pool disables injection.
pub fn assemble_with_period(news: &[NewsItem], ads: &[AdItem], period: usize) -> Vec<FeedItem> {
    let period = period.max(1);
    let mut out = Vec::with_capacity(news.len() + news.len() / period);

    for (index, item) in news.iter().enumerate() {
        out.push(FeedItem::News(item.clone()));
        let k = index + 1;
        if k % period == 0 && !ads.is_empty() {
            out.push(FeedItem::Ad(ads[(k / period) % ads.len()].clone()));
        }
    }

    out
}

/// Assemble against the built-in ad pool.
pub fn assemble_with_sample_ads(news: &[NewsItem], period: usize) -> Vec<FeedItem> {
    assemble_with_period(news, &SAMPLE_ADS, period)
}
