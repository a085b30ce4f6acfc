//! Device id and raw value extraction from a filtered line.

use dcgm_types::{DeviceId, ParseDeviceIdError};
use thiserror::Error;

/// Label carrying the device id, up to and including its opening quote.
const DEVICE_LABEL: &str = "gpu=\"";

/// One measurement as found in the text, before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub device: DeviceId,
    /// Final whitespace-delimited token of the line.
    pub value: &'a str,
}

/// Why a filtered line could not be split into a [`RawRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("no gpu=\"...\" label")]
    MissingDeviceLabel,
    #[error("unterminated gpu label")]
    UnterminatedDeviceLabel,
    #[error("device id {:?} is not a non-negative integer", .0.text())]
    InvalidDeviceId(#[from] ParseDeviceIdError),
    #[error("no value after the labels")]
    MissingValue,
}

/// Parse the device id and trailing value out of a line whose marker has
/// already been stripped.
///
/// The `gpu="N"` label may sit anywhere before the value token, among any
/// other labels. It must start the line or follow `{`, `,` or whitespace,
/// so labels such as `vgpu="1"` are not taken for it. This is stricter
/// than a plain substring search for `gpu="`: a line whose only match is
/// `vgpu="9"` reports [`MalformedReason::MissingDeviceLabel`].
pub fn extract(line: &str) -> Result<RawRecord<'_>, MalformedReason> {
    let line = line.trim_end();
    if line.is_empty() {
        return Err(MalformedReason::MissingValue);
    }

    let id_start =
        find_device_label(line).ok_or(MalformedReason::MissingDeviceLabel)? + DEVICE_LABEL.len();
    let id_end = line[id_start..]
        .find('"')
        .map(|len| id_start + len)
        .ok_or(MalformedReason::UnterminatedDeviceLabel)?;

    let device = line[id_start..id_end].parse::<DeviceId>()?;

    // The value token must come after the label's closing quote
    let value = match line.rfind(char::is_whitespace) {
        Some(ws) if ws > id_end => line[ws..].trim_start(),
        _ => return Err(MalformedReason::MissingValue),
    };

    Ok(RawRecord { device, value })
}

fn find_device_label(line: &str) -> Option<usize> {
    line.match_indices(DEVICE_LABEL)
        .map(|(idx, _)| idx)
        .find(|&idx| {
            line[..idx]
                .chars()
                .next_back()
                .map_or(true, |c| c == '{' || c == ',' || c.is_whitespace())
        })
}
