//! Errors raised while turning exposition text into a table.

use dcgm_types::DeviceId;
use thiserror::Error;

use super::convert::ConversionError;
use super::record::MalformedReason;

/// Any failure of the extraction pipeline. One error fails the whole
/// snapshot; no partial table is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A line carrying a registered marker could not be parsed.
    #[error("malformed {marker} line {line:?}: {reason}")]
    MalformedLine {
        marker: String,
        /// The full offending line, marker included.
        line: String,
        reason: MalformedReason,
    },

    /// A value did not parse as its metric's declared kind.
    #[error("metric {metric:?}: {source}")]
    Conversion {
        metric: String,
        #[source]
        source: ConversionError,
    },

    /// The same device reported one metric more than once.
    #[error("metric {metric:?} reported gpu {device} more than once")]
    DuplicateDevice { metric: String, device: DeviceId },
}
