//! Table assembly across the whole registry.

use dcgm_types::{MetricRegistry, MetricsTable};
use tracing::debug;

use super::convert::convert;
use super::error::ExtractError;
use super::filter::filter;
use super::record::extract;

/// Build the per-GPU table for one exposition payload.
///
/// Metrics are processed in registry order, so each device record lists
/// its values in column order. The device set is the union over all
/// metrics: a GPU reporting only some metrics still gets a record holding
/// just those. The first malformed line, unconvertible value or duplicate
/// device aborts the whole snapshot.
///
/// This is a pure function of its inputs.
pub fn extract_table(
    text: &str,
    registry: &MetricRegistry,
) -> Result<MetricsTable, ExtractError> {
    let mut table = MetricsTable::new();

    for spec in registry {
        let mut devices = 0usize;

        for line in filter(text, &spec.marker) {
            let record = extract(line).map_err(|reason| ExtractError::MalformedLine {
                marker: spec.marker.clone(),
                line: format!("{}{}", spec.marker, line),
                reason,
            })?;

            let value =
                convert(record.value, spec.kind).map_err(|source| ExtractError::Conversion {
                    metric: spec.display_name.clone(),
                    source,
                })?;

            let previous = table
                .record_mut(record.device)
                .insert(&spec.display_name, spec.format(&value));
            if previous.is_some() {
                return Err(ExtractError::DuplicateDevice {
                    metric: spec.display_name.clone(),
                    device: record.device,
                });
            }

            devices += 1;
        }

        debug!(metric = %spec.display_name, marker = %spec.marker, devices, "extracted metric");
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::convert::ConversionError;
    use crate::data::record::MalformedReason;
    use dcgm_types::{ConverterKind, DeviceId};

    const SINGLE_GPU: &str = "\
DCGM_FI_DEV_GPU_UTIL{gpu=\"0\"} 55.2
DCGM_FI_DEV_GPU_TEMP{gpu=\"0\"} 63
DCGM_FI_DEV_POWER_USAGE{gpu=\"0\"} 120.5
DCGM_FI_DEV_MEM_COPY_UTIL{gpu=\"0\"} 10.0
";

    #[test]
    fn test_single_gpu_table() {
        let table = extract_table(SINGLE_GPU, &MetricRegistry::dcgm()).unwrap();

        assert_eq!(table.len(), 1);
        let record = table.record(DeviceId::new(0)).unwrap();
        let cells: Vec<_> = record.iter().collect();
        assert_eq!(
            cells,
            vec![
                ("GPU util", "55.2%"),
                ("temp.", "63C"),
                ("power", "120.5W"),
                ("mem util", "10.0%"),
            ]
        );
    }

    #[test]
    fn test_record_order_follows_registry_not_input() {
        let text = "\
DCGM_FI_DEV_MEM_COPY_UTIL{gpu=\"0\"} 1
DCGM_FI_DEV_POWER_USAGE{gpu=\"0\"} 2
DCGM_FI_DEV_GPU_TEMP{gpu=\"0\"} 3
DCGM_FI_DEV_GPU_UTIL{gpu=\"0\"} 4
";
        let table = extract_table(text, &MetricRegistry::dcgm()).unwrap();
        let names: Vec<_> = table
            .record(DeviceId::new(0))
            .unwrap()
            .iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["GPU util", "temp.", "power", "mem util"]);
    }

    #[test]
    fn test_multi_gpu_sorted_by_id() {
        let text = "\
# HELP DCGM_FI_DEV_GPU_UTIL GPU utilization (in %).
# TYPE DCGM_FI_DEV_GPU_UTIL gauge
DCGM_FI_DEV_GPU_UTIL{gpu=\"1\",UUID=\"GPU-b\"} 12.5
DCGM_FI_DEV_GPU_UTIL{gpu=\"0\",UUID=\"GPU-a\"} 99.0
DCGM_FI_DEV_GPU_TEMP{gpu=\"1\",UUID=\"GPU-b\"} 45
DCGM_FI_DEV_GPU_TEMP{gpu=\"0\",UUID=\"GPU-a\"} 71
DCGM_FI_DEV_POWER_USAGE{gpu=\"1\",UUID=\"GPU-b\"} 60.25
DCGM_FI_DEV_POWER_USAGE{gpu=\"0\",UUID=\"GPU-a\"} 300.0
DCGM_FI_DEV_MEM_COPY_UTIL{gpu=\"1\",UUID=\"GPU-b\"} 0
DCGM_FI_DEV_MEM_COPY_UTIL{gpu=\"0\",UUID=\"GPU-a\"} 42
";
        let table = extract_table(text, &MetricRegistry::dcgm()).unwrap();

        let ids: Vec<_> = table.device_ids().map(|d| d.get()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(table.value(DeviceId::new(0), "GPU util"), Some("99.0%"));
        assert_eq!(table.value(DeviceId::new(1), "temp."), Some("45C"));
        assert_eq!(table.value(DeviceId::new(1), "power"), Some("60.25W"));
        assert_eq!(table.value(DeviceId::new(1), "mem util"), Some("0.0%"));
    }

    #[test]
    fn test_partial_device_still_present() {
        let text = "\
DCGM_FI_DEV_GPU_TEMP{gpu=\"0\"} 63
DCGM_FI_DEV_GPU_TEMP{gpu=\"4\"} 50
DCGM_FI_DEV_POWER_USAGE{gpu=\"0\"} 100.0
";
        let table = extract_table(text, &MetricRegistry::dcgm()).unwrap();

        assert_eq!(table.len(), 2);
        let record = table.record(DeviceId::new(4)).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("temp."), Some("50C"));
        assert_eq!(record.get("power"), None);
    }

    #[test]
    fn test_empty_text_gives_empty_table() {
        let table = extract_table("", &MetricRegistry::dcgm()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_label_fails_snapshot() {
        let text = "\
DCGM_FI_DEV_GPU_UTIL{gpu=\"0\"} 55.2
DCGM_FI_DEV_GPU_TEMP{UUID=\"GPU-a\"} 63
";
        let err = extract_table(text, &MetricRegistry::dcgm()).unwrap_err();
        assert_eq!(
            err,
            ExtractError::MalformedLine {
                marker: "DCGM_FI_DEV_GPU_TEMP".to_string(),
                line: "DCGM_FI_DEV_GPU_TEMP{UUID=\"GPU-a\"} 63".to_string(),
                reason: MalformedReason::MissingDeviceLabel,
            }
        );
    }

    #[test]
    fn test_conversion_error_names_metric() {
        let text = "DCGM_FI_DEV_GPU_TEMP{gpu=\"0\"} 63.5\n";
        let err = extract_table(text, &MetricRegistry::dcgm()).unwrap_err();
        assert_eq!(
            err,
            ExtractError::Conversion {
                metric: "temp.".to_string(),
                source: ConversionError {
                    raw: "63.5".to_string(),
                    kind: ConverterKind::Int,
                },
            }
        );
        assert_eq!(
            err.to_string(),
            "metric \"temp.\": \"63.5\" is not a valid integer value"
        );
    }

    #[test]
    fn test_duplicate_device_is_rejected() {
        let text = "\
DCGM_FI_DEV_GPU_TEMP{gpu=\"0\"} 63
DCGM_FI_DEV_GPU_TEMP{gpu=\"0\"} 64
";
        let err = extract_table(text, &MetricRegistry::dcgm()).unwrap_err();
        assert_eq!(
            err,
            ExtractError::DuplicateDevice {
                metric: "temp.".to_string(),
                device: DeviceId::new(0),
            }
        );
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let registry = MetricRegistry::dcgm();
        let first = extract_table(SINGLE_GPU, &registry).unwrap();
        let second = extract_table(SINGLE_GPU, &registry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_registry() {
        let registry = MetricRegistry::builder()
            .metric("fan", "DCGM_FI_DEV_FAN_SPEED", ConverterKind::Int, "%")
            .build()
            .unwrap();
        let text = format!("{}DCGM_FI_DEV_FAN_SPEED{{gpu=\"2\"}} 30\n", SINGLE_GPU);

        let table = extract_table(&text, &registry).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(DeviceId::new(2), "fan"), Some("30%"));
    }
}
