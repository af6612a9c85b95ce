//! HTTP client for the FixMySheet backend (GET /, POST /dedupe).

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::dedupe::DedupeRequest;
use crate::error::{ClientError, ClientResult};

/// Label used when the health body carries no `status`.
pub const DEFAULT_STATUS_LABEL: &str = "running";

/// Body of GET /. Any JSON value counts as healthy; only `status` is read.
#[derive(Debug)]
pub struct HealthResponse {
    pub status: Option<String>,
}

impl From<serde_json::Value> for HealthResponse {
    fn from(body: serde_json::Value) -> Self {
        let status = body.get("status").and_then(|s| s.as_str()).map(str::to_string);
        Self { status }
    }
}

impl HealthResponse {
    pub fn label(&self) -> &str {
        self.status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_STATUS_LABEL)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

/// A non-2xx response whose body may or may not be readable.
#[derive(Debug)]
pub struct ErrorBody {
    status: u16,
    body: Option<Vec<u8>>,
}

impl ErrorBody {
    pub fn new(status: u16, body: Option<Vec<u8>>) -> Self {
        Self { status, body }
    }

    async fn read(resp: reqwest::Response) -> Self {
        let status = resp.status().as_u16();
        let body = match resp.bytes().await {
            Ok(b) => Some(b.to_vec()),
            Err(e) => {
                debug!("error body unreadable: {}", e);
                None
            }
        };
        Self::new(status, body)
    }

    /// Non-blank `error` field of a JSON body.
    pub fn try_json(&self) -> Option<String> {
        let envelope: ErrorEnvelope = serde_json::from_slice(self.body.as_deref()?).ok()?;
        envelope.error.filter(|e| !e.trim().is_empty())
    }

    /// Raw body text, if any.
    pub fn try_text(&self) -> Option<String> {
        let text = String::from_utf8_lossy(self.body.as_deref()?);
        if text.trim().is_empty() {
            None
        } else {
            Some(text.into_owned())
        }
    }

    /// JSON `error`, then text, then `HTTP <status>`.
    pub fn message(&self) -> String {
        self.try_json()
            .or_else(|| self.try_text())
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }

    pub fn into_error(self) -> ClientError {
        ClientError::Server {
            status: self.status,
            message: self.message(),
        }
    }
}

/// Stateless apart from the connection pool; the base URL is resolved per call.
#[derive(Clone, Default)]
pub struct BackendClient {
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET `{base}/`; needs a 2xx status and a JSON body.
    pub async fn health_check(&self, base_url: &str) -> ClientResult<HealthResponse> {
        let url = format!("{}/", base_url);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            let err = ErrorBody::read(resp).await.into_error();
            warn!("health check {} failed: {}", url, err);
            return Err(err);
        }
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ClientError::InvalidBody(e.to_string()))?;
        let health = HealthResponse::from(body);
        info!("health check {} ok ({})", url, health.label());
        Ok(health)
    }

    /// POST `{base}/dedupe` and return the spreadsheet bytes.
    pub async fn dedupe(&self, base_url: &str, request: DedupeRequest) -> ClientResult<Vec<u8>> {
        let url = format!("{}/dedupe", base_url);
        info!(
            "dedupe {} mode={} keep_policy={} file={} ({} bytes)",
            url,
            request.mode,
            request.keep_policy,
            request.file.file_name,
            request.file.bytes.len()
        );
        let resp = self
            .client
            .post(&url)
            .multipart(request.into_form())
            .send()
            .await?;
        if !resp.status().is_success() {
            let err = ErrorBody::read(resp).await.into_error();
            warn!("dedupe {} failed: {}", url, err);
            return Err(err);
        }
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}
