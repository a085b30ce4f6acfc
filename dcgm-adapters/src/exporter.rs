//! DCGM exporter adapter.
//!
//! Scrapes the Prometheus text exposition served by `dcgm-exporter`,
//! which is typically available at `http://localhost:9400/metrics`.
//!
//! The adapter only fetches text. Parsing is left to the caller, so one
//! scrape can be fed to whatever extraction pipeline needs it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dcgm_adapters::exporter::DcgmExporterAdapter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = DcgmExporterAdapter::builder().build()?;
//!
//!     let text = adapter.scrape().await?;
//!     for line in text.lines().filter(|l| l.starts_with("DCGM_FI_DEV_GPU_TEMP")) {
//!         println!("{}", line);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::AdapterError;

/// Default scrape endpoint of a local `dcgm-exporter`.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9400/metrics";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Adapter fetching one exposition payload per call.
#[derive(Debug, Clone)]
pub struct DcgmExporterAdapter {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl DcgmExporterAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> DcgmExporterAdapterBuilder {
        DcgmExporterAdapterBuilder::default()
    }

    /// The URL scraped by [`Self::scrape`].
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform one GET and return the response body as text.
    ///
    /// Any non-2xx status is an error; the body of such a response is
    /// discarded.
    pub async fn scrape(&self) -> Result<String, AdapterError> {
        debug!(endpoint = %self.endpoint, "scraping exposition text");

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AdapterError::Body(e.to_string()))?;

        debug!(bytes = text.len(), "scrape complete");
        Ok(text)
    }
}

/// Builder for DcgmExporterAdapter.
#[derive(Debug, Default)]
pub struct DcgmExporterAdapterBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl DcgmExporterAdapterBuilder {
    /// Set the scrape URL (default: `http://localhost:9400/metrics`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<DcgmExporterAdapter, AdapterError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Client(e.to_string()))?;

        Ok(DcgmExporterAdapter {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout,
        })
    }
}
