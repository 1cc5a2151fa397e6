// src/config/ai.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_AI_CONFIG_PATH: &str = "config/ai.json";
pub const ENV_AI_CONFIG_PATH: &str = "AI_CONFIG_PATH";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_api_key() -> String {
    "ENV".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub enabled: bool,
    /// Only "gemini" is wired (case-insensitive).
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// "ENV" means: read from GEMINI_API_KEY, then API_KEY
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Ask the service to ground answers with web search.
    #[serde(default = "default_true")]
    pub search_grounding: bool,
    /// Whole-request timeout. `None` leaves only the transport's own bound.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            model: default_model(),
            api_key: default_api_key(),
            search_grounding: true,
            timeout_secs: None,
        }
    }
}

impl AiConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: AiConfig = serde_json::from_str(&data)?;

        cfg.provider = cfg.provider.trim().to_lowercase();
        if cfg.model.trim().is_empty() {
            cfg.model = default_model();
        }

        // Resolve api key if "ENV"
        if cfg.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.api_key = match cfg.provider.as_str() {
                "gemini" => resolve_gemini_key().unwrap_or_default(),
                other => anyhow::bail!("Unsupported provider in config: {other}"),
            };
        }

        if cfg.timeout_secs == Some(0) {
            cfg.timeout_secs = None;
        }

        Ok(cfg)
    }

    /// `$AI_CONFIG_PATH`, else `config/ai.json`. A missing file yields the
    /// disabled default; a present but broken file is an error.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = env::var(ENV_AI_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_AI_CONFIG_PATH.into());
        if !Path::new(&path).exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}

fn resolve_gemini_key() -> Option<String> {
    ["GEMINI_API_KEY", "API_KEY"]
        .iter()
        .filter_map(|k| env::var(k).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
