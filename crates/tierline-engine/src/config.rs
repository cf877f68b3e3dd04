//! Engine configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_HISTORY_PAGE_LIMIT, DEFAULT_HORIZON_URL};

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Wallet activity lookup configuration
    pub horizon: HorizonSettings,
}

impl EngineConfig {
    /// Load configuration from environment and .env files
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(url) = std::env::var("TIERLINE_HORIZON_URL") {
            cfg.horizon.base_url = url;
        }
        if let Ok(val) = std::env::var("TIERLINE_HORIZON_TIMEOUT_MS") {
            if let Ok(v) = val.parse() {
                cfg.horizon.fetch_timeout_ms = v;
            }
        }
        if let Ok(val) = std::env::var("TIERLINE_HORIZON_PAGE_LIMIT") {
            if let Ok(v) = val.parse() {
                cfg.horizon.page_limit = v;
            }
        }

        Ok(cfg)
    }
}

/// Wallet-activity lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonSettings {
    /// Horizon base URL
    pub base_url: String,

    /// Budget for one activity fetch, in milliseconds. Expiry is treated
    /// as unavailable activity, not as a fatal error.
    pub fetch_timeout_ms: u64,

    /// Page size for transaction and operation history
    pub page_limit: u32,
}

impl Default for HorizonSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HORIZON_URL.to_string(),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            page_limit: DEFAULT_HISTORY_PAGE_LIMIT,
        }
    }
}
