//! Backend API configuration constants and runtime settings.

use std::time::Duration;

use anyhow::{Context, bail};

/// Relative endpoint paths exposed by the analysis backend
pub struct Endpoints {
    pub tickers: &'static str,
    pub analyze: &'static str,
    /// Followed by `/{job_id}`
    pub status: &'static str,
    /// Followed by `/{job_id}`
    pub results: &'static str,
    /// Followed by `/{relative_path}`
    pub static_assets: &'static str,
}

/// Status polling behaviour
pub struct PollingConfig {
    /// Delay between a status reply and the next status request
    pub interval_ms: u64,
    /// Consecutive transport errors tolerated before polling halts
    pub max_consecutive_errors: u32,
}

/// The Master API Configuration
pub struct ApiConfig {
    /// Environment variable holding the backend base URL
    pub base_url_env: &'static str,
    /// Used when neither the CLI nor the environment provide a URL
    pub default_base_url: &'static str,
    pub default_timeout_secs: u64,
    pub endpoints: Endpoints,
    pub polling: PollingConfig,
}

pub const API: ApiConfig = ApiConfig {
    base_url_env: "PORTFOLIO_API_URL",
    default_base_url: "http://localhost:8000",
    default_timeout_secs: 30,
    endpoints: Endpoints {
        tickers: "/tickers/available",
        analyze: "/portfolio/analyze",
        status: "/portfolio/status",
        results: "/portfolio/results",
        static_assets: "/static",
    },
    polling: PollingConfig {
        interval_ms: 2_000,
        // 15 x 2s: half a minute without a single good reply
        max_consecutive_errors: 15,
    },
};

/// Baked in at build time. The browser build has no other source.
const COMPILE_TIME_BASE_URL: Option<&str> = option_env!("PORTFOLIO_API_URL");

/// Resolved settings for talking to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    /// Absolute base URL without a trailing slash
    pub base_url: String,
    /// Per-request timeout. Ignored on wasm, where reqwest cannot enforce one.
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: API.default_base_url.to_string(),
            request_timeout: Duration::from_secs(API.default_timeout_secs),
        }
    }
}

impl ApiSettings {
    /// Resolve the base URL: explicit value (CLI flag or runtime env via clap),
    /// then the compile-time env var, then the localhost default.
    pub fn resolve(explicit_url: Option<&str>, timeout_secs: Option<u64>) -> anyhow::Result<Self> {
        let raw = explicit_url
            .or(COMPILE_TIME_BASE_URL)
            .unwrap_or(API.default_base_url);

        let base_url = normalize_base_url(raw)
            .with_context(|| format!("invalid {} value '{}'", API.base_url_env, raw))?;

        let request_timeout =
            Duration::from_secs(timeout_secs.unwrap_or(API.default_timeout_secs).max(1));

        Ok(Self {
            base_url,
            request_timeout,
        })
    }

    pub fn poll_interval() -> Duration {
        Duration::from_millis(API.polling.interval_ms)
    }
}

fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("base URL is empty");
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!("base URL must start with http:// or https://");
    }
    Ok(trimmed.to_string())
}
