//! Ingestion driver: walks a collection and drains every segment into a sink.
//!
//! Segments are the unit of parallelism. With more than one thread, workers
//! pull segment paths from a shared cursor and each opens, drains and
//! releases its own segments; documents from one segment are handed to the
//! sink in stream order, but segments interleave.

use crate::config::{CollectionKind, IngestConfig};
use crate::error::{DriverError, SinkError};
use crate::report::{IngestReport, SegmentReport};
use crate::sink::DocumentSink;
use dredge_collection::{Collection, Document};
use dredge_formats::{JsonCollection, TrecCollection, WarcCollection, WarcFamily};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Drives ingestion of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Driver {
    threads: usize,
    include_unindexable: bool,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    /// Single-threaded driver that drops unindexable documents.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            threads: 1,
            include_unindexable: false,
        }
    }

    /// Driver settings from a validated configuration.
    #[must_use]
    pub const fn from_config(config: &IngestConfig) -> Self {
        Self::new()
            .with_threads(config.threads)
            .with_unindexable(config.include_unindexable)
    }

    /// Number of worker threads. Zero is treated as one.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = if threads == 0 { 1 } else { threads };
        self
    }

    /// Whether documents marked not indexable reach the sink.
    #[must_use]
    pub const fn with_unindexable(mut self, include: bool) -> Self {
        self.include_unindexable = include;
        self
    }

    /// Configured worker threads
    #[must_use]
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Ingest the collection kind named on the command line.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_kind<S>(
        &self,
        kind: CollectionKind,
        root: &Path,
        sink: &mut S,
    ) -> Result<IngestReport, DriverError>
    where
        S: DocumentSink + Send,
    {
        match kind {
            CollectionKind::Trec => self.run(&TrecCollection::new(), root, sink),
            CollectionKind::Json => self.run(&JsonCollection::new(), root, sink),
            CollectionKind::Clueweb09 => {
                self.run(&WarcCollection::new(WarcFamily::clueweb09()), root, sink)
            }
            CollectionKind::Clueweb12 => {
                self.run(&WarcCollection::new(WarcFamily::clueweb12()), root, sink)
            }
            CollectionKind::CcWet => {
                self.run(&WarcCollection::new(WarcFamily::commoncrawl_wet()), root, sink)
            }
        }
    }

    /// Ingest every segment of `collection` under `root` into `sink`.
    ///
    /// Malformed records and failing segments are counted in the report and
    /// never stop the run. [`DocumentSink::finish`] is called once at the end.
    ///
    /// # Errors
    ///
    /// Returns `DriverError` if the root is missing, the sink fails or a
    /// worker thread panics.
    pub fn run<C, S>(
        &self,
        collection: &C,
        root: &Path,
        sink: &mut S,
    ) -> Result<IngestReport, DriverError>
    where
        C: Collection + Sync,
        S: DocumentSink + Send,
    {
        if !root.exists() {
            return Err(DriverError::RootNotFound(root.to_path_buf()));
        }

        let paths = collection.segment_paths(root);
        info!(
            "Ingesting {} segments of '{}' from {} with {} threads",
            paths.len(),
            collection.name(),
            root.display(),
            self.threads.min(paths.len().max(1))
        );

        let outcomes = if self.threads <= 1 || paths.len() <= 1 {
            let mut outcomes = Vec::with_capacity(paths.len());
            for path in &paths {
                outcomes.push(self.ingest_segment(collection, path, &mut |doc| sink.accept(doc))?);
            }
            outcomes
        } else {
            self.ingest_parallel(collection, &paths, sink)?
        };

        let mut report = IngestReport::new(collection.name());
        for outcome in outcomes {
            match outcome {
                Some(segment) => report.push(segment),
                None => report.record_unopened(),
            }
        }

        sink.finish()?;

        info!(
            "Finished '{}': {} documents ({} indexable), {} skipped, {} faulted segments",
            report.collection, report.documents, report.indexable, report.skipped, report.faulted
        );
        Ok(report)
    }

    fn ingest_parallel<C, S>(
        &self,
        collection: &C,
        paths: &[PathBuf],
        sink: &mut S,
    ) -> Result<Vec<Option<SegmentReport>>, DriverError>
    where
        C: Collection + Sync,
        S: DocumentSink + Send,
    {
        let cursor = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);
        let sink = Mutex::new(sink);
        let workers = self.threads.min(paths.len());

        let finished = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(|| -> Result<Vec<(usize, Option<SegmentReport>)>, SinkError> {
                        let mut done = Vec::new();
                        while !stop.load(Ordering::Relaxed) {
                            let index = cursor.fetch_add(1, Ordering::Relaxed);
                            let Some(path) = paths.get(index) else {
                                break;
                            };
                            let outcome = self
                                .ingest_segment(collection, path, &mut |doc| sink.lock().accept(doc))
                                .inspect_err(|_| stop.store(true, Ordering::Relaxed))?;
                            done.push((index, outcome));
                        }
                        Ok(done)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| DriverError::WorkerPanicked))
                .collect::<Result<Vec<_>, _>>()
        })?;

        let mut outcomes: Vec<(usize, Option<SegmentReport>)> = Vec::with_capacity(paths.len());
        for worker in finished {
            outcomes.extend(worker?);
        }
        outcomes.sort_unstable_by_key(|(index, _)| *index);
        Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
    }

    /// Drain one segment. `None` means the path could not be opened.
    fn ingest_segment<C: Collection>(
        &self,
        collection: &C,
        path: &Path,
        emit: &mut dyn FnMut(Document) -> Result<(), SinkError>,
    ) -> Result<Option<SegmentReport>, SinkError> {
        let mut segment = match collection.open_segment(path) {
            Ok(segment) => segment,
            Err(err) => {
                warn!("{err}");
                return Ok(None);
            }
        };

        let mut report = SegmentReport::new(path);
        while segment.probe() {
            let Ok(document) = dredge_collection::Segment::take(&mut segment) else {
                break;
            };
            report.documents += 1;
            if document.indexable() {
                report.indexable += 1;
            }
            if document.indexable() || self.include_unindexable {
                emit(document)?;
            }
        }

        report.skipped = segment.skipped();
        report.faulted = segment.is_faulted();
        report.error = segment.fault().map(ToString::to_string);
        segment.release();

        debug!(
            "Segment {}: {} documents, {} skipped",
            path.display(),
            report.documents,
            report.skipped
        );
        Ok(Some(report))
    }
}
