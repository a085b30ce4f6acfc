//! # dcgm-adapters
//!
//! Adapters for scraping exposition text from GPU monitoring agents.
//!
//! ## Supported Agents
//!
//! - **DCGM exporter** (`exporter` feature) - Fetches the Prometheus text
//!   exposition served by NVIDIA's `dcgm-exporter`, typically on port 9400
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dcgm_adapters::exporter::DcgmExporterAdapter;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = DcgmExporterAdapter::builder()
//!         .endpoint("http://localhost:9400/metrics")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let text = adapter.scrape().await?;
//!     println!("Scraped {} bytes", text.len());
//!     Ok(())
//! }
//! ```

pub mod error;

#[cfg(feature = "exporter")]
pub mod exporter;

pub use error::AdapterError;
