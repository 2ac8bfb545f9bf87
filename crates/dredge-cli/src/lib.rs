//! Corpus ingestion driver.
//!
//! This crate ties the collection readers together into a runnable pipeline:
//! - `config`: command-line and environment configuration
//! - `driver`: walks a collection and drains each segment into a sink
//! - `sink`: where documents go (memory, JSON lines, counting only)
//! - `report`: per-segment and per-run totals
//!
//! # Example
//!
//! ```no_run
//! use dredge_cli::{CollectionKind, CountingSink, Driver};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let mut sink = CountingSink::default();
//!     let report = Driver::new()
//!         .with_threads(4)
//!         .run_kind(CollectionKind::Clueweb12, Path::new("/corpora/cw12"), &mut sink)?;
//!
//!     println!("{} documents", report.documents);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod driver;
pub mod error;
pub mod report;
pub mod sink;

pub use config::{CollectionKind, IngestConfig, ReportFormat};
pub use driver::Driver;
pub use error::{ConfigError, DriverError, SinkError};
pub use report::{IngestReport, SegmentReport};
pub use sink::{CountingSink, DocumentSink, JsonLinesSink};
