// src/config/feed.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ads::AD_FREQUENCY;
use crate::sector::Sector;

pub const DEFAULT_FEED_CONFIG_PATH: &str = "config/feed.toml";
pub const ENV_FEED_CONFIG_PATH: &str = "FEED_CONFIG_PATH";
pub const ENV_AD_FREQUENCY: &str = "FEED_AD_FREQUENCY";
pub const ENV_ITEM_COUNT: &str = "FEED_ITEM_COUNT";

pub const DEFAULT_ITEM_COUNT: usize = 6;
const MAX_ITEM_COUNT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// One ad after every `ad_frequency` news items.
    pub ad_frequency: usize,
    /// Number of items requested from the model per fetch.
    pub item_count: usize,
    /// Sector loaded at startup.
    pub initial_sector: Sector,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ad_frequency: AD_FREQUENCY,
            item_count: DEFAULT_ITEM_COUNT,
            initial_sector: Sector::All,
        }
    }
}

impl FeedConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading feed config from {}", path.display()))?;
        let cfg: FeedConfig = toml::from_str(&content)
            .with_context(|| format!("parsing feed config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Load using env var + fallbacks, then apply per-field env overrides:
    /// 1) $FEED_CONFIG_PATH
    /// 2) config/feed.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        let path = std::env::var(ENV_FEED_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FEED_CONFIG_PATH));

        let mut cfg = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };

        if let Some(v) = parse_usize_env(ENV_AD_FREQUENCY) {
            cfg.ad_frequency = v;
        }
        if let Some(v) = parse_usize_env(ENV_ITEM_COUNT) {
            cfg.item_count = v;
        }
        Ok(cfg.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.ad_frequency = self.ad_frequency.max(1);
        self.item_count = self.item_count.clamp(1, MAX_ITEM_COUNT);
        self
    }
}

fn parse_usize_env(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
