#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::ApiSettings;
pub use data::{HttpPortfolioApi, PortfolioApi};
pub use engine::{AnalysisEngine, AnalysisSession};
pub use ui::PortfolioApp;
pub use utils::app_time;

use anyhow::Context;
use std::sync::Arc;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the analysis backend
    #[arg(long, env = "PORTFOLIO_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
}

impl Cli {
    pub fn api_settings(&self) -> anyhow::Result<ApiSettings> {
        ApiSettings::resolve(self.api_url.as_deref(), self.request_timeout_secs)
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    settings: &ApiSettings,
) -> anyhow::Result<Box<dyn eframe::App>> {
    let client = HttpPortfolioApi::new(settings).context("failed to build the HTTP client")?;
    let api: Arc<dyn PortfolioApi> = Arc::new(client);

    let app = PortfolioApp::new(cc, api, settings.base_url.clone());
    Ok(Box::new(app))
}
