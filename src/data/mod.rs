//! Extraction pipeline from exposition text to a per-GPU table.
//!
//! ## Submodules
//!
//! - [`filter`]: selects lines carrying a metric marker
//! - [`record`]: parses the device id and raw value of a line
//! - [`convert`]: turns raw values into [`TypedValue`](dcgm_types::TypedValue)s
//! - [`aggregate`]: drives the stages over a whole [`MetricRegistry`](dcgm_types::MetricRegistry)
//!
//! ## Data Flow
//!
//! ```text
//! exposition text
//!        │
//!        ▼  for each MetricSpec, in registry order
//! filter(text, marker) ──▶ extract(line) ──▶ convert(raw, kind)
//!                                                  │
//!                                                  ▼
//!                              MetricsTable[device][display_name] = "<value><suffix>"
//! ```

pub mod aggregate;
pub mod convert;
pub mod error;
pub mod filter;
pub mod record;

pub use aggregate::extract_table;
pub use convert::{convert, ConversionError};
pub use error::ExtractError;
pub use filter::filter;
pub use record::{extract, MalformedReason, RawRecord};
