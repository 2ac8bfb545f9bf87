//! Lazy-pull iteration over one physical source file.
//!
//! A [`Segment`] owns exactly one decode step (and through it, one open
//! stream). Callers [`probe`](Segment::probe) for the next document,
//! [`take`](Segment::take) it, and [`release`](Segment::release) the segment
//! when done. Dropping a segment releases it as well.
//!
//! Each probe runs the decode step until it produces an item, runs dry, or
//! faults:
//!
//! - a per-record fault ([`Decoded::Skip`]) is counted and the next record is
//!   tried, so one corrupt record never costs the rest of the file;
//! - exhaustion ends iteration silently;
//! - a stream fault ends iteration, sets [`ReadStatus::Error`] and is logged
//!   once. It is never retried.
//!
//! # Example
//!
//! ```
//! use dredge_collection::{Decoded, Document, FnDecoder, Segment};
//!
//! let mut docs = vec![Document::new("b", "two", "two", true), Document::new("a", "one", "one", true)];
//! let mut segment = Segment::detached(FnDecoder::new(move || match docs.pop() {
//!     Some(doc) => Decoded::Produced(doc),
//!     None => Decoded::Exhausted,
//! }));
//!
//! assert!(segment.probe());
//! assert!(segment.probe()); // probing again does not advance
//! assert_eq!(Segment::take(&mut segment).unwrap().id(), "a");
//! assert_eq!(segment.by_ref().count(), 1);
//! assert!(Segment::take(&mut segment).is_err());
//! segment.release();
//! ```

use crate::decode::{DecodeStep, Decoded};
use crate::error::SegmentError;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

/// Outcome of the most recent read attempt on a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    /// Nothing special happened
    #[default]
    Void,
    /// The last attempt discarded a malformed record
    Skipped,
    /// The stream failed; the segment is finished
    Error,
}

/// A cursor over the documents of one source file.
pub struct Segment<D: DecodeStep> {
    path: Option<PathBuf>,
    decoder: Option<D>,
    buffered: Option<D::Item>,
    at_eof: bool,
    released: bool,
    skipped: u64,
    status: ReadStatus,
    fault: Option<io::Error>,
}

impl<D: DecodeStep> Segment<D> {
    /// Bind a decode step to the file it reads.
    pub fn new(path: impl Into<PathBuf>, decoder: D) -> Self {
        Self::with_path(Some(path.into()), decoder)
    }

    /// Create a segment with no backing path, e.g. over an in-memory buffer.
    pub fn detached(decoder: D) -> Self {
        Self::with_path(None, decoder)
    }

    fn with_path(path: Option<PathBuf>, decoder: D) -> Self {
        Self {
            path,
            decoder: Some(decoder),
            buffered: None,
            at_eof: false,
            released: false,
            skipped: 0,
            status: ReadStatus::Void,
            fault: None,
        }
    }

    /// Report whether a document is available, without consuming it.
    ///
    /// Repeated calls without an intervening [`take`](Self::take) neither
    /// read from the stream nor count skips again.
    pub fn probe(&mut self) -> bool {
        if self.buffered.is_some() {
            return true;
        }

        loop {
            if self.at_eof {
                return false;
            }
            let Some(decoder) = self.decoder.as_mut() else {
                self.at_eof = true;
                return false;
            };

            match decoder.decode_next() {
                Decoded::Produced(item) => {
                    self.buffered = Some(item);
                    self.status = ReadStatus::Void;
                    return true;
                }
                Decoded::Exhausted => {
                    trace!(segment = %self.label(), "segment exhausted");
                    self.at_eof = true;
                    return false;
                }
                Decoded::Skip(reason) => {
                    self.skipped += 1;
                    self.status = ReadStatus::Skipped;
                    debug!(
                        segment = %self.label(),
                        skipped = self.skipped,
                        "skipping record: {reason}"
                    );
                }
                Decoded::Fatal(err) => {
                    error!(segment = %self.label(), "read error, stopping segment: {err}");
                    self.status = ReadStatus::Error;
                    self.at_eof = true;
                    self.fault = Some(err);
                    return false;
                }
            }
        }
    }

    /// Return the buffered document and clear the buffer.
    ///
    /// Probes first if nothing is buffered. Fails once the segment is
    /// exhausted, faulted or released.
    pub fn take(&mut self) -> Result<D::Item, SegmentError> {
        if self.released {
            return Err(SegmentError::Released);
        }
        if self.buffered.is_none() && !self.probe() {
            return Err(match &self.fault {
                Some(err) => SegmentError::Faulted(err.to_string()),
                None => SegmentError::Exhausted,
            });
        }
        self.buffered.take().ok_or(SegmentError::Exhausted)
    }

    /// Close the underlying stream. Calling this twice is a no-op.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.at_eof = true;
        self.buffered = None;
        drop(self.decoder.take());
        trace!(
            segment = %self.label(),
            skipped = self.skipped,
            "segment released"
        );
    }

    /// Number of records discarded so far
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Outcome of the most recent read attempt
    pub const fn status(&self) -> ReadStatus {
        self.status
    }

    /// Whether the segment stopped on a stream fault
    pub const fn is_faulted(&self) -> bool {
        matches!(self.status, ReadStatus::Error)
    }

    /// The stream error that stopped the segment, if any
    pub const fn fault(&self) -> Option<&io::Error> {
        self.fault.as_ref()
    }

    /// Path of the source file, when the segment has one
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether [`release`](Self::release) has run
    pub const fn is_released(&self) -> bool {
        self.released
    }

    fn label(&self) -> String {
        self.path
            .as_deref()
            .map_or_else(|| "<detached>".to_string(), |p| p.display().to_string())
    }
}

impl<D: DecodeStep> Iterator for Segment<D> {
    type Item = D::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.probe() {
            self.buffered.take()
        } else {
            None
        }
    }
}

impl<D: DecodeStep> Drop for Segment<D> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<D: DecodeStep> std::fmt::Debug for Segment<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segment")
            .field("path", &self.path)
            .field("buffered", &self.buffered.is_some())
            .field("at_eof", &self.at_eof)
            .field("released", &self.released)
            .field("skipped", &self.skipped)
            .field("status", &self.status)
            .field("fault", &self.fault)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::decode::FnDecoder;
    use crate::error::SkipReason;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Replays a fixed script of outcomes and counts how often it is asked.
    struct Scripted {
        script: VecDeque<Decoded<u32>>,
        calls: Rc<Cell<usize>>,
        dropped: Rc<Cell<usize>>,
    }

    impl Scripted {
        fn new(script: Vec<Decoded<u32>>) -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
            let calls = Rc::new(Cell::new(0));
            let dropped = Rc::new(Cell::new(0));
            let decoder = Self {
                script: script.into(),
                calls: Rc::clone(&calls),
                dropped: Rc::clone(&dropped),
            };
            (decoder, calls, dropped)
        }
    }

    impl DecodeStep for Scripted {
        type Item = u32;

        fn decode_next(&mut self) -> Decoded<u32> {
            self.calls.set(self.calls.get() + 1);
            self.script.pop_front().unwrap_or(Decoded::Exhausted)
        }
    }

    impl Drop for Scripted {
        fn drop(&mut self) {
            self.dropped.set(self.dropped.get() + 1);
        }
    }

    fn skip() -> Decoded<u32> {
        Decoded::Skip(SkipReason::malformed("bad"))
    }

    #[test]
    fn test_yields_every_produced_item() {
        let (decoder, _, _) = Scripted::new(vec![
            Decoded::Produced(1),
            Decoded::Produced(2),
            Decoded::Produced(3),
        ]);
        let mut segment = Segment::new("a.txt", decoder);

        let items: Vec<u32> = segment.by_ref().collect();
        assert_eq!(items, vec![1, 2, 3]);
        assert!(matches!(Segment::take(&mut segment), Err(SegmentError::Exhausted)));
        assert_eq!(segment.status(), ReadStatus::Void);
        assert_eq!(segment.skipped(), 0);
    }

    #[test]
    fn test_probe_is_idempotent() {
        let (decoder, calls, _) = Scripted::new(vec![skip(), Decoded::Produced(7)]);
        let mut segment = Segment::detached(decoder);

        assert!(segment.probe());
        assert!(segment.probe());
        assert!(segment.probe());
        assert_eq!(calls.get(), 2);
        assert_eq!(segment.skipped(), 1);

        assert_eq!(Segment::take(&mut segment).unwrap(), 7);
        assert!(!segment.probe());
        assert!(!segment.probe());
        // one extra call discovered exhaustion; later probes do not ask again
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_skips_are_counted_and_iteration_continues() {
        let (decoder, _, _) = Scripted::new(vec![
            Decoded::Produced(1),
            skip(),
            Decoded::Produced(3),
            skip(),
            Decoded::Produced(5),
        ]);
        let mut segment = Segment::detached(decoder);

        let items: Vec<u32> = segment.by_ref().collect();
        assert_eq!(items, vec![1, 3, 5]);
        assert_eq!(segment.skipped(), 2);
    }

    #[test]
    fn test_status_tracks_last_attempt() {
        let (decoder, _, _) = Scripted::new(vec![skip(), Decoded::Produced(2), skip()]);
        let mut segment = Segment::detached(decoder);

        assert!(segment.probe());
        assert_eq!(segment.status(), ReadStatus::Void);
        Segment::take(&mut segment).unwrap();

        assert!(!segment.probe());
        assert_eq!(segment.status(), ReadStatus::Skipped);
        assert_eq!(segment.skipped(), 2);
    }

    #[test]
    fn test_fatal_stops_once() {
        let (decoder, calls, _) = Scripted::new(vec![
            Decoded::Produced(1),
            Decoded::Fatal(io::Error::other("disk on fire")),
            Decoded::Produced(3),
        ]);
        let mut segment = Segment::detached(decoder);

        assert_eq!(segment.next(), Some(1));
        assert_eq!(segment.next(), None);
        assert_eq!(segment.next(), None);
        assert_eq!(calls.get(), 2);

        assert!(segment.is_faulted());
        assert_eq!(segment.status(), ReadStatus::Error);
        assert!(segment.fault().is_some());
        assert!(matches!(Segment::take(&mut segment), Err(SegmentError::Faulted(_))));
    }

    #[test]
    fn test_release_is_idempotent_and_closes_stream() {
        let (decoder, _, dropped) = Scripted::new(vec![Decoded::Produced(1)]);
        let mut segment = Segment::detached(decoder);
        assert!(segment.probe());

        segment.release();
        assert_eq!(dropped.get(), 1);
        assert!(segment.is_released());
        assert!(!segment.probe());
        assert!(matches!(Segment::take(&mut segment), Err(SegmentError::Released)));

        segment.release();
        drop(segment);
        assert_eq!(dropped.get(), 1);
    }

    #[test]
    fn test_drop_releases_stream() {
        let (decoder, _, dropped) = Scripted::new(vec![]);
        {
            let _segment = Segment::new("x.gz", decoder);
        }
        assert_eq!(dropped.get(), 1);
    }

    #[test]
    fn test_skip_counter_never_decreases() {
        let mut remaining = 6;
        let mut segment = Segment::detached(FnDecoder::new(move || {
            remaining -= 1;
            match remaining {
                r if r < 0 => Decoded::Exhausted,
                r if r % 2 == 0 => skip(),
                r => Decoded::Produced(r as u32),
            }
        }));

        let mut last = 0;
        while segment.probe() {
            assert!(segment.skipped() >= last);
            last = segment.skipped();
            Segment::take(&mut segment).unwrap();
        }
        assert_eq!(segment.skipped(), 3);
    }
}
