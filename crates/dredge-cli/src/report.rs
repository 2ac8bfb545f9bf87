//! Per-segment and per-run ingestion reports.

use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// What happened to one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    /// Segment file
    pub path: PathBuf,
    /// Documents produced, indexable or not
    pub documents: u64,
    /// Documents marked indexable
    pub indexable: u64,
    /// Records discarded as malformed
    pub skipped: u64,
    /// Whether the segment stopped on a read error
    pub faulted: bool,
    /// The read error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SegmentReport {
    /// Empty report for a segment path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            documents: 0,
            indexable: 0,
            skipped: 0,
            faulted: false,
            error: None,
        }
    }
}

/// Totals for a whole run, plus the per-segment breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Collection name
    pub collection: String,
    /// Documents produced across all segments
    pub documents: u64,
    /// Indexable documents across all segments
    pub indexable: u64,
    /// Skipped records across all segments
    pub skipped: u64,
    /// Segments that stopped on a read error
    pub faulted: u64,
    /// Paths that could not be opened
    pub unopened: u64,
    /// One entry per opened segment, in discovery order
    pub segments: Vec<SegmentReport>,
}

impl IngestReport {
    /// Empty report for a collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }

    /// Add a finished segment to the totals.
    pub fn push(&mut self, segment: SegmentReport) {
        self.documents += segment.documents;
        self.indexable += segment.indexable;
        self.skipped += segment.skipped;
        self.faulted += u64::from(segment.faulted);
        self.segments.push(segment);
    }

    /// Count a path that could not be opened.
    pub const fn record_unopened(&mut self) {
        self.unopened += 1;
    }

    /// Print one line per segment and a summary line.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for segment in &self.segments {
            write!(
                out,
                "{}\t{} documents\t{} indexable\t{} skipped",
                segment.path.display(),
                segment.documents,
                segment.indexable,
                segment.skipped
            )?;
            match &segment.error {
                Some(err) => writeln!(out, "\terror: {err}")?,
                None => writeln!(out)?,
            }
        }
        writeln!(
            out,
            "{}: {} segments, {} documents ({} indexable), {} skipped, {} faulted, {} unopened",
            self.collection,
            self.segments.len(),
            self.documents,
            self.indexable,
            self.skipped,
            self.faulted,
            self.unopened
        )
    }
}
