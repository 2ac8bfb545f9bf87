//! Ingestion configuration management.
//!
//! Configuration can be provided via:
//! - CLI arguments (`--collection`, `--input`, etc.)
//! - Environment variables (`DREDGE_COLLECTION`, `DREDGE_INPUT`, etc.)
//! - Default values
//!
//! # Example
//!
//! ```no_run
//! use dredge_cli::IngestConfig;
//!
//! let config = IngestConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading {} from {}", config.collection, config.input.display());
//! ```

use crate::error::ConfigError;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Supported corpus formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionKind {
    /// TREC SGML newswire disks
    Trec,
    /// JSON lines or JSON arrays with `id` and `contents`
    Json,
    /// ClueWeb09 WARC/0.18 archives
    Clueweb09,
    /// ClueWeb12 WARC/1.0 archives
    Clueweb12,
    /// CommonCrawl WET extracted-text archives
    CcWet,
}

impl CollectionKind {
    /// Name as accepted on the command line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trec => "trec",
            Self::Json => "json",
            Self::Clueweb09 => "clueweb09",
            Self::Clueweb12 => "clueweb12",
            Self::CcWet => "cc-wet",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the final report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One line per segment plus totals
    #[default]
    Text,
    /// The report as one JSON object
    Json,
}

/// Ingestion configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dredge",
    about = "Walk a document collection and emit its documents",
    version
)]
pub struct IngestConfig {
    /// Collection format
    #[arg(long, env = "DREDGE_COLLECTION", value_enum)]
    pub collection: CollectionKind,

    /// Collection root: a directory or a single segment file
    #[arg(long, env = "DREDGE_INPUT")]
    pub input: PathBuf,

    /// Worker threads; each processes whole segments
    #[arg(long, env = "DREDGE_THREADS", default_value_t = 1)]
    pub threads: usize,

    /// Write documents as JSON lines to this file
    #[arg(long, env = "DREDGE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,

    /// Also emit documents that are not indexable
    #[arg(long)]
    pub include_unindexable: bool,
}

impl IngestConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - the input path doesn't exist
    /// - the thread count is zero
    /// - the output file's directory doesn't exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input.exists() {
            return Err(ConfigError::InputNotFound(self.input.clone()));
        }

        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads(self.threads));
        }

        if let Some(parent) = self
            .output
            .as_deref()
            .and_then(std::path::Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            && !parent.is_dir()
        {
            return Err(ConfigError::OutputDirNotFound(parent.to_path_buf()));
        }

        Ok(())
    }
}
