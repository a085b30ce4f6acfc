//! # dcgm-doctor
//!
//! A diagnostic tool and library that takes one snapshot of the metrics
//! served by a local DCGM exporter and shows it as a per-GPU table.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────────────────────────┐    ┌──────────┐
//! │  source  │───▶│             data              │───▶│  render  │
//! │ (fetch)  │    │ filter → extract → convert    │    │ (output) │
//! └──────────┘    └───────────────────────────────┘    └──────────┘
//!  HttpSource        MetricRegistry → MetricsTable      table | json
//!  FileSource
//! ```
//!
//! - **[`source`]**: [`ExpositionSource`] trait with an HTTP source (one
//!   bounded GET against the exporter) and a file/stdin source
//! - **[`data`]**: the extraction pipeline producing a [`MetricsTable`]
//! - **[`render`]**: fixed-width table and JSON output
//! - **[`config`]**: endpoint and timeout settings
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Scrape the local exporter
//! dcgm-doctor
//!
//! # Render a saved scrape as JSON
//! dcgm-doctor --file scrape.txt --format json
//! ```
//!
//! ### As a library
//!
//! ```
//! use dcgm_doctor::{extract_table, render, MetricRegistry, OutputFormat};
//!
//! let text = "\
//! DCGM_FI_DEV_GPU_UTIL{gpu=\"0\"} 55.2
//! DCGM_FI_DEV_GPU_TEMP{gpu=\"0\"} 63
//! DCGM_FI_DEV_POWER_USAGE{gpu=\"0\"} 120.5
//! DCGM_FI_DEV_MEM_COPY_UTIL{gpu=\"0\"} 10.0
//! ";
//!
//! let registry = MetricRegistry::dcgm();
//! let table = extract_table(text, &registry).unwrap();
//!
//! let mut out = Vec::new();
//! render(&mut out, &table, &registry, OutputFormat::Table).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("120.5W"));
//! ```
//!
//! ### Fetching over HTTP
//!
//! ```no_run
//! use dcgm_doctor::{ExpositionSource, HttpSource};
//! use dcgm_adapters::exporter::DcgmExporterAdapter;
//!
//! let adapter = DcgmExporterAdapter::builder()
//!     .endpoint("http://localhost:9400/metrics")
//!     .build()
//!     .unwrap();
//! let mut source = HttpSource::new(adapter).unwrap();
//! let text = source.fetch().unwrap();
//! ```
//!
//! The adapter can also be driven directly from async code:
//!
//! ```no_run
//! use dcgm_adapters::exporter::DcgmExporterAdapter;
//!
//! # tokio_test::block_on(async {
//! let adapter = DcgmExporterAdapter::builder().build().unwrap();
//! let text = adapter.scrape().await.unwrap();
//! # });
//! ```

pub mod config;
pub mod data;
pub mod render;
pub mod source;

pub use config::Settings;
pub use data::{extract_table, ExtractError};
pub use render::{render, OutputFormat, RenderError};
pub use source::{ExpositionSource, FetchError, FileSource, HttpSource};

// Re-export types for convenience
pub use dcgm_types::{
    ConverterKind, DeviceId, DeviceRecord, MetricRegistry, MetricSpec, MetricsTable, TypedValue,
};
