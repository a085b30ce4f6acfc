//! Per-GPU tables assembled from one snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifier of one monitored GPU, taken from its `gpu="N"` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DeviceId(u32);

impl DeviceId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DeviceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for DeviceId {
    type Err = ParseDeviceIdError;

    /// Strict base-10 parse: digits only, no sign and no surrounding spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDeviceIdError {
            text: s.to_string(),
        };
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u32>().map(Self).map_err(|_| invalid())
    }
}

/// Error returned when a label value is not a valid [`DeviceId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid device id {text:?}")]
pub struct ParseDeviceIdError {
    text: String,
}

impl ParseDeviceIdError {
    /// The text that failed to parse.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Formatted metric values for one GPU, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRecord {
    values: Vec<(String, String)>,
}

impl DeviceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a formatted value under a metric display name.
    ///
    /// New names are appended; an existing name keeps its position and the
    /// previous value is returned.
    pub fn insert(
        &mut self,
        metric: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let metric = metric.into();
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == metric) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.values.push((metric, value));
                None
            }
        }
    }

    pub fn get(&self, metric: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == metric)
            .map(|(_, value)| value.as_str())
    }

    /// `(display name, formatted value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DeviceRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// All device records of one snapshot, keyed by [`DeviceId`].
///
/// Iteration is always by ascending device id, independent of the order in
/// which devices were first observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MetricsTable {
    devices: BTreeMap<DeviceId, DeviceRecord>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for a device, created empty on first access.
    pub fn record_mut(&mut self, device: DeviceId) -> &mut DeviceRecord {
        self.devices.entry(device).or_default()
    }

    pub fn record(&self, device: DeviceId) -> Option<&DeviceRecord> {
        self.devices.get(&device)
    }

    /// Explicit cell lookup. `None` when the device or the metric is absent.
    pub fn value(&self, device: DeviceId, metric: &str) -> Option<&str> {
        self.devices.get(&device).and_then(|r| r.get(metric))
    }

    /// Device ids in ascending order.
    pub fn device_ids(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.devices.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
