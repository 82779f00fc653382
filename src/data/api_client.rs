//! HTTP client for the portfolio analysis backend.
//!
//! The backend exposes four JSON endpoints (ticker list, job creation, job
//! status, job results) plus a static file root for generated charts.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::config::{API, ApiSettings};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{AnalysisRequest, AnalysisResults, JobId, JobSnapshot};

/// Errors surfaced by backend calls
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced a response (connection refused, timeout, ...)
    Network(String),
    /// Response body could not be decoded
    Parse(String),
    /// Non-2xx reply, with the server's `detail` when it sent one
    Server { status: u16, detail: Option<String> },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Parse(msg) => write!(f, "Unexpected response: {}", msg),
            ApiError::Server {
                detail: Some(detail),
                ..
            } => write!(f, "{}", detail),
            ApiError::Server {
                status,
                detail: None,
            } => write!(f, "Request failed with status {}", status),
        }
    }
}

impl std::error::Error for ApiError {}

/// `Send + Sync` on native, where calls run on the Tokio pool.
/// Browser futures are single-threaded, so nothing is required there.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

/// Reply to `POST /portfolio/analyze`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmittedJob {
    pub id: JobId,
    #[serde(flatten)]
    pub snapshot: JobSnapshot,
}

#[derive(Deserialize)]
struct TickersResponse {
    tickers: Vec<String>,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PortfolioApi: MaybeSend {
    /// `GET /tickers/available`
    async fn list_tickers(&self) -> Result<Vec<String>, ApiError>;

    /// `POST /portfolio/analyze`
    async fn submit_analysis(&self, request: &AnalysisRequest) -> Result<SubmittedJob, ApiError>;

    /// `GET /portfolio/status/{id}`
    async fn job_status(&self, id: &JobId) -> Result<JobSnapshot, ApiError>;

    /// `GET /portfolio/results/{id}`
    async fn job_results(&self, id: &JobId) -> Result<AnalysisResults, ApiError>;

    /// Absolute URL of a chart asset under the static root
    fn asset_url(&self, relative_path: &str) -> String;
}

/// reqwest-backed implementation used by the app
pub struct HttpPortfolioApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPortfolioApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(settings.request_timeout);

        let client = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: settings.base_url.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Endpoint with the job id appended as an escaped path segment
    fn job_url(&self, path: &str, id: &JobId) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.endpoint(path))
            .map_err(|e| ApiError::Network(format!("invalid URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Network(format!("cannot append a path to {}", self.base_url)))?
            .push(id.as_str());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned + Send>(&self, url: Url) -> Result<T, ApiError> {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_api_calls {
            log::debug!("GET {}", url);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_response(response).await
    }
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Server {
            status: status.as_u16(),
            detail: server_detail(&body),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Pull FastAPI's `{"detail": ...}` out of an error body.
/// Non-string details (validation error lists) are returned as JSON text.
fn server_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PortfolioApi for HttpPortfolioApi {
    async fn list_tickers(&self) -> Result<Vec<String>, ApiError> {
        let url = Url::parse(&self.endpoint(API.endpoints.tickers))
            .map_err(|e| ApiError::Network(format!("invalid URL: {}", e)))?;
        let reply: TickersResponse = self.get_json(url).await?;
        Ok(reply.tickers)
    }

    async fn submit_analysis(&self, request: &AnalysisRequest) -> Result<SubmittedJob, ApiError> {
        let url = self.endpoint(API.endpoints.analyze);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_api_calls {
            log::debug!("POST {} ({} tickers)", url, request.tickers.len());
        }

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_response(response).await
    }

    async fn job_status(&self, id: &JobId) -> Result<JobSnapshot, ApiError> {
        let url = self.job_url(API.endpoints.status, id)?;
        self.get_json(url).await
    }

    async fn job_results(&self, id: &JobId) -> Result<AnalysisResults, ApiError> {
        let url = self.job_url(API.endpoints.results, id)?;
        self.get_json(url).await
    }

    fn asset_url(&self, relative_path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            API.endpoints.static_assets,
            relative_path.trim_start_matches('/')
        )
    }
}
