use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dcgm_adapters::exporter::DcgmExporterAdapter;
use dcgm_doctor::{
    extract_table, render, ExpositionSource, FileSource, HttpSource, MetricRegistry, OutputFormat,
    Settings,
};

#[derive(Parser, Debug)]
#[command(name = "dcgm-doctor")]
#[command(about = "One-shot table of GPU metrics from a local DCGM exporter")]
struct Args {
    /// Exporter metrics URL (default: http://localhost:9400/metrics,
    /// or DCGM_DOCTOR_ENDPOINT)
    #[arg(short, long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Request timeout in milliseconds (default: 5000, or DCGM_DOCTOR_TIMEOUT_MS)
    #[arg(short, long, conflicts_with = "file")]
    timeout_ms: Option<u64>,

    /// Read a saved scrape instead of fetching; "-" reads stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let registry = MetricRegistry::dcgm();
    let mut source = build_source(&args)?;

    let text = source
        .fetch()
        .with_context(|| format!("failed to fetch snapshot ({})", source.description()))?;

    let table = extract_table(&text, &registry).context("failed to parse snapshot")?;
    info!(devices = table.len(), "snapshot extracted");

    let stdout = io::stdout();
    render(&mut stdout.lock(), &table, &registry, args.format)
        .context("failed to render snapshot")?;

    Ok(())
}

/// Pick the file source when `--file` is given, otherwise scrape over HTTP.
fn build_source(args: &Args) -> Result<Box<dyn ExpositionSource>> {
    if let Some(path) = &args.file {
        return Ok(Box::new(FileSource::new(path)));
    }

    let settings = resolve_settings(args, Settings::load().context("failed to load settings")?);
    debug!(?settings, "resolved settings");

    let adapter = DcgmExporterAdapter::builder()
        .endpoint(settings.endpoint.clone())
        .timeout(settings.timeout())
        .build()?;

    Ok(Box::new(HttpSource::new(adapter)?))
}

/// Apply command-line overrides on top of loaded settings.
fn resolve_settings(args: &Args, mut settings: Settings) -> Settings {
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        settings.timeout_ms = timeout_ms;
    }
    settings
}

/// Logs go to stderr so stdout carries only the rendered snapshot.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["dcgm-doctor"]).unwrap();
        assert!(args.endpoint.is_none());
        assert!(args.file.is_none());
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_file_and_format() {
        let args =
            Args::try_parse_from(["dcgm-doctor", "--file", "-", "--format", "json", "-vv"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("-")));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_file_conflicts_with_endpoint() {
        let result = Args::try_parse_from([
            "dcgm-doctor",
            "--file",
            "scrape.txt",
            "--endpoint",
            "http://localhost:9400/metrics",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_settings() {
        let args = Args::try_parse_from([
            "dcgm-doctor",
            "--endpoint",
            "http://gpu-node:9400/metrics",
            "--timeout-ms",
            "750",
        ])
        .unwrap();

        let settings = resolve_settings(&args, Settings::default());
        assert_eq!(settings.endpoint, "http://gpu-node:9400/metrics");
        assert_eq!(settings.timeout_ms, 750);
    }

    #[test]
    fn test_settings_kept_without_flags() {
        let args = Args::try_parse_from(["dcgm-doctor"]).unwrap();
        let loaded = Settings {
            endpoint: "http://from-env:9400/metrics".to_string(),
            timeout_ms: 100,
        };
        assert_eq!(resolve_settings(&args, loaded.clone()), loaded);
    }
}
