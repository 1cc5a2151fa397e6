// src/ai_bootstrap.rs
use crate::ai::client::build_client_from_config;
use crate::config::ai::AiConfig;
use crate::fetcher::{NewsFetcher, NewsOrigin};
use crate::sector::Sector;
use tracing::{info, warn};

pub struct AiRuntime {
    pub cfg: AiConfig,
    pub fetcher: NewsFetcher,
}

impl AiRuntime {
    pub fn from_config(cfg: AiConfig) -> anyhow::Result<Self> {
        // Safe diagnostics: only provider + model + enabled + key length
        info!(
            "AI cfg loaded: provider={}, model={}, enabled={}, key_len={}",
            cfg.provider,
            cfg.model,
            cfg.enabled,
            cfg.api_key.len()
        );
        let client = build_client_from_config(&cfg)?;
        let fetcher = NewsFetcher::new(client).with_search_grounding(cfg.search_grounding);
        Ok(Self { cfg, fetcher })
    }

    /// One live fetch for `ALL`; logs where the items came from.
    pub async fn quick_probe(&self) -> NewsOrigin {
        if !self.cfg.enabled {
            warn!("AI quick_probe: AI is disabled in config, fallback will be served");
        }
        let out = self.fetcher.fetch(Sector::All).await;
        info!(
            origin = ?out.origin,
            count = out.items.len(),
            provider = self.fetcher.provider_name(),
            "AI quick_probe finished"
        );
        out.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[serial_test::serial]
    #[tokio::test]
    async fn disabled_probe_reports_fallback() {
        std::env::remove_var("AI_TEST_MODE");
        let rt = AiRuntime::from_config(AiConfig::default()).unwrap();
        assert_eq!(rt.quick_probe().await, NewsOrigin::Fallback);
    }
}
