//! Dredge binary entry point.
//!
//! This is a thin wrapper around the dredge-cli library that:
//! 1. Initializes logging
//! 2. Parses and validates configuration
//! 3. Runs the ingestion driver
//! 4. Prints the report to stdout
//!
//! Logs go to stderr so the report can be piped.

use anyhow::{Context, Result};
use dredge_cli::{CountingSink, Driver, IngestConfig, IngestReport, JsonLinesSink, ReportFormat};
use std::fs::File;
use std::io::{self, BufWriter, Write};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = IngestConfig::from_args();
    config.validate()?;

    tracing::info!(
        "Configuration loaded: collection={}, input={}, threads={}",
        config.collection,
        config.input.display(),
        config.threads
    );

    let driver = Driver::from_config(&config);
    let report = match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            let mut sink = JsonLinesSink::new(BufWriter::new(file));
            let report = driver.run_kind(config.collection, &config.input, &mut sink)?;
            tracing::info!("Wrote {} documents to {}", sink.written(), path.display());
            report
        }
        None => {
            let mut sink = CountingSink::default();
            driver.run_kind(config.collection, &config.input, &mut sink)?
        }
    };

    print_report(&report, config.report)?;
    Ok(())
}

fn print_report(report: &IngestReport, format: ReportFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        ReportFormat::Text => report.write_text(&mut out)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
