//! Raw value conversion.

use dcgm_types::{ConverterKind, TypedValue};
use thiserror::Error;

/// A raw value token that does not parse as its metric's declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{raw:?} is not a valid {kind} value")]
pub struct ConversionError {
    pub raw: String,
    pub kind: ConverterKind,
}

/// Convert a raw value token according to `kind`.
///
/// Integers are base 10 with no fractional part. Floats accept decimal and
/// scientific literals as well as `NaN` and `+Inf`/`-Inf`.
pub fn convert(raw: &str, kind: ConverterKind) -> Result<TypedValue, ConversionError> {
    let parsed = match kind {
        ConverterKind::Int => raw.parse::<i64>().ok().map(TypedValue::Int),
        ConverterKind::Float => raw.parse::<f64>().ok().map(TypedValue::Float),
    };

    parsed.ok_or_else(|| ConversionError {
        raw: raw.to_string(),
        kind,
    })
}
