//! Typed metric values.

use std::fmt;

/// A raw value token after conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedValue {
    Int(i64),
    Float(f64),
}

/// Integers print in base 10. Finite floats print in their shortest
/// round-trip form and always keep a fractional part, so `10.0` stays
/// distinguishable from the integer `10`. Exponent notation is never used:
/// `1e16` prints as `10000000000000000.0` and `1e-7` as `0.0000001`.
impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypedValue::Int(v) => write!(f, "{}", v),
            TypedValue::Float(v) => {
                let text = v.to_string();
                if v.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}
