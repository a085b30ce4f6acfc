//! # dcgm-types
//!
//! Core types for point-in-time GPU metric snapshots scraped from a DCGM
//! exporter. This crate defines the metric catalog, the typed values parsed
//! out of the exposition text, and the per-GPU table handed to renderers.
//!
//! ## Features
//!
//! - `serde`: serialization of [`MetricsTable`] and its records via serde
//!
//! ## Example
//!
//! ```rust
//! use dcgm_types::{DeviceId, MetricRegistry, MetricsTable, TypedValue};
//!
//! let registry = MetricRegistry::dcgm();
//! let temp = registry.get("temp.").unwrap();
//!
//! let mut table = MetricsTable::new();
//! table
//!     .record_mut(DeviceId::new(0))
//!     .insert(&temp.display_name, temp.format(&TypedValue::Int(63)));
//!
//! assert_eq!(table.value(DeviceId::new(0), "temp."), Some("63C"));
//! ```

mod registry;
mod table;
mod value;

pub use registry::*;
pub use table::*;
pub use value::*;
