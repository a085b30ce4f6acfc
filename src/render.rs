//! Output of a finished [`MetricsTable`].
//!
//! Every renderer checks that each device has a value for every registered
//! metric before writing anything, so a failed render never leaves a
//! half-printed table behind.

use std::io::{self, Write};

use clap::ValueEnum;
use dcgm_types::{DeviceId, MetricRegistry, MetricsTable};
use thiserror::Error;

/// Width of every metric column.
pub const CELL_WIDTH: usize = 10;

/// Width of the device id column, matching its `GPU` header.
const DEVICE_WIDTH: usize = 3;

const DEVICE_HEADER: &str = "GPU";

/// Errors raised while rendering a table.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A device record lacks a registered metric.
    #[error("gpu {device} has no value for metric {metric:?}")]
    MissingMetric { device: DeviceId, metric: String },

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text table
    #[default]
    Table,
    /// Pretty-printed JSON keyed by device id
    Json,
}

/// Render `table` to `out` in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    table: &MetricsTable,
    registry: &MetricRegistry,
    format: OutputFormat,
) -> Result<(), RenderError> {
    let text = match format {
        OutputFormat::Table => format_table(table, registry)?,
        OutputFormat::Json => format_json(table, registry)?,
    };
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Format the fixed-width table.
///
/// ```text
/// GPU |  GPU util |      temp. |      power |   mem util
///   0 |     55.2% |        63C |     120.5W |      10.0%
/// ```
///
/// Rows are ordered by ascending device id; columns follow registry order.
pub fn format_table(
    table: &MetricsTable,
    registry: &MetricRegistry,
) -> Result<String, RenderError> {
    let header: Vec<String> = registry
        .display_names()
        .map(|name| format!("{:>width$}", name, width = CELL_WIDTH))
        .collect();

    let mut output = format!("{} |{}\n", DEVICE_HEADER, header.join(" | "));

    for device in table.device_ids() {
        let cells = registry
            .display_names()
            .map(|name| {
                cell(table, device, name).map(|v| format!("{:>width$}", v, width = CELL_WIDTH))
            })
            .collect::<Result<Vec<_>, _>>()?;

        output.push_str(&format!(
            "{:>width$} |{}\n",
            device,
            cells.join(" | "),
            width = DEVICE_WIDTH
        ));
    }

    Ok(output)
}

/// Format the table as pretty JSON, one object per device.
pub fn format_json(
    table: &MetricsTable,
    registry: &MetricRegistry,
) -> Result<String, RenderError> {
    ensure_complete(table, registry)?;
    let mut json = serde_json::to_string_pretty(table)?;
    json.push('\n');
    Ok(json)
}

/// Fail with [`RenderError::MissingMetric`] on the first absent cell.
pub fn ensure_complete(
    table: &MetricsTable,
    registry: &MetricRegistry,
) -> Result<(), RenderError> {
    for device in table.device_ids() {
        for name in registry.display_names() {
            cell(table, device, name)?;
        }
    }
    Ok(())
}

fn cell<'a>(
    table: &'a MetricsTable,
    device: DeviceId,
    metric: &str,
) -> Result<&'a str, RenderError> {
    table
        .value(device, metric)
        .ok_or_else(|| RenderError::MissingMetric {
            device,
            metric: metric.to_string(),
        })
}
