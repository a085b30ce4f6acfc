//! The catalog of metrics extracted from each snapshot.

use std::fmt;

use thiserror::Error;

use crate::TypedValue;

/// Errors raised when building a [`MetricRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An empty marker would select every line of the exposition text.
    #[error("metric {display_name:?} has an empty marker")]
    EmptyMarker { display_name: String },
}

/// How the raw value token of a metric is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    /// Base-10 integer, no fractional part.
    Int,
    /// Decimal or scientific floating point literal.
    Float,
}

impl ConverterKind {
    /// Lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConverterKind::Int => "integer",
            ConverterKind::Float => "float",
        }
    }
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single metric column: where to find it and how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSpec {
    /// Column header, unique within a registry.
    pub display_name: String,
    /// Literal line prefix identifying the metric in the exposition text.
    pub marker: String,
    /// Conversion applied to the raw value token.
    pub kind: ConverterKind,
    /// Appended to the formatted value (e.g. `"%"`, `"W"`).
    pub unit_suffix: String,
}

impl MetricSpec {
    /// Create a new metric spec.
    pub fn new(
        display_name: impl Into<String>,
        marker: impl Into<String>,
        kind: ConverterKind,
        unit_suffix: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            marker: marker.into(),
            kind,
            unit_suffix: unit_suffix.into(),
        }
    }

    /// Format a converted value as `"<value><suffix>"`.
    pub fn format(&self, value: &TypedValue) -> String {
        format!("{}{}", value, self.unit_suffix)
    }
}

/// Ordered, immutable catalog of [`MetricSpec`]s.
///
/// Registry order defines the column order of rendered tables. Build one
/// at startup and pass it by reference to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRegistry {
    specs: Vec<MetricSpec>,
}

impl MetricRegistry {
    /// Create a builder for a custom registry.
    pub fn builder() -> MetricRegistryBuilder {
        MetricRegistryBuilder::default()
    }

    /// The default catalog read from a DCGM exporter.
    pub fn dcgm() -> Self {
        Self {
            specs: vec![
                MetricSpec::new("GPU util", "DCGM_FI_DEV_GPU_UTIL", ConverterKind::Float, "%"),
                MetricSpec::new("temp.", "DCGM_FI_DEV_GPU_TEMP", ConverterKind::Int, "C"),
                MetricSpec::new("power", "DCGM_FI_DEV_POWER_USAGE", ConverterKind::Float, "W"),
                MetricSpec::new("mem util", "DCGM_FI_DEV_MEM_COPY_UTIL", ConverterKind::Float, "%"),
            ],
        }
    }

    /// Iterate specs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &MetricSpec> {
        self.specs.iter()
    }

    /// Display names in registry order.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.display_name.as_str())
    }

    /// Look up a spec by display name.
    pub fn get(&self, display_name: &str) -> Option<&MetricSpec> {
        self.specs.iter().find(|s| s.display_name == display_name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::dcgm()
    }
}

impl<'a> IntoIterator for &'a MetricRegistry {
    type Item = &'a MetricSpec;
    type IntoIter = std::slice::Iter<'a, MetricSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

/// Builder for [`MetricRegistry`].
#[derive(Debug, Default)]
pub struct MetricRegistryBuilder {
    specs: Vec<MetricSpec>,
}

impl MetricRegistryBuilder {
    /// Append a metric.
    ///
    /// A display name that is already registered is replaced in place, so
    /// it keeps its original column position.
    pub fn metric(
        self,
        display_name: impl Into<String>,
        marker: impl Into<String>,
        kind: ConverterKind,
        unit_suffix: impl Into<String>,
    ) -> Self {
        self.spec(MetricSpec::new(display_name, marker, kind, unit_suffix))
    }

    /// Append a prebuilt spec, with the same replacement rule as [`Self::metric`].
    pub fn spec(mut self, spec: MetricSpec) -> Self {
        match self
            .specs
            .iter_mut()
            .find(|s| s.display_name == spec.display_name)
        {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
        self
    }

    /// Build the registry, rejecting any spec with an empty marker.
    pub fn build(self) -> Result<MetricRegistry, RegistryError> {
        if let Some(spec) = self.specs.iter().find(|s| s.marker.is_empty()) {
            return Err(RegistryError::EmptyMarker {
                display_name: spec.display_name.clone(),
            });
        }
        Ok(MetricRegistry { specs: self.specs })
    }
}
