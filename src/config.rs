// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "DASHBOARD_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";

pub const DEFAULT_NEWS_ENDPOINT: &str = "https://finance-insight.api.slray.com/api/news";
pub const DEFAULT_QUOTE_BASE_URL: &str = "https://www.alphavantage.co/query";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub news_endpoint: String,
    pub quote_base_url: String,
    /// Empty key means quotes run entirely on synthetic data.
    pub quote_api_key: String,
    pub watched_symbols: Vec<String>,
    pub static_dir: String,
    pub bind_addr: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            news_endpoint: DEFAULT_NEWS_ENDPOINT.to_string(),
            quote_base_url: DEFAULT_QUOTE_BASE_URL.to_string(),
            quote_api_key: String::new(),
            watched_symbols: ["AAPL", "MSFT", "AMZN", "GOOGL", "NVDA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            static_dir: "static".to_string(),
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load order: $DASHBOARD_CONFIG_PATH, then `config/dashboard.toml`,
    /// then built-in defaults. Environment variables override individual
    /// fields afterwards, so a `.env` with just the API key works.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            Self::load_from(&pb)
                .with_context(|| format!("{ENV_CONFIG_PATH} points at {}", pb.display()))?
        } else {
            let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
            if pb.exists() {
                Self::load_from(&pb)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading dashboard config from {}", path.display()))?;
        let cfg: Self = toml::from_str(&content)
            .with_context(|| format!("parsing dashboard config at {}", path.display()))?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("NEWS_ENDPOINT") {
            if !v.is_empty() {
                self.news_endpoint = v;
            }
        }
        if let Ok(v) = std::env::var("ALPHAVANTAGE_API_KEY") {
            if !v.is_empty() {
                self.quote_api_key = v;
            }
        }
        if let Ok(v) = std::env::var("DASHBOARD_BIND_ADDR") {
            if !v.is_empty() {
                self.bind_addr = v;
            }
        }
    }
}
