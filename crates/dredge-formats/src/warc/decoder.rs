//! Record framing state machine.
//!
//! ```text
//! ScanningForMark -> ReadingHeader -> ReadingContent -> RecordReady
//!        ^                                                   |
//!        +---------------------------------------------------+
//! ScanningForMark | ReadingHeader | ReadingContent -> EndOfStream
//! ```
//!
//! A record starts at a line beginning with the version marker. Lines before
//! the marker are discarded. Header lines are collected until the sentinel
//! key is seen, then exactly `Content-Length` bytes of content are read.
//! A blank line or a new marker before the sentinel ends the header block
//! without a usable length.

use super::error::FramingError;
use super::header::{WarcHeader, field};
use super::line::{LineEnd, LineScanner, Utf8Policy, is_blank, trim_cr};
use super::record::WarcRecord;
use dredge_collection::{DecodeStep, Decoded};
use std::io::{self, BufRead};
use tracing::{debug, trace};

/// Default cap on one header line (64 KiB)
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Upper bound on the up-front payload allocation; larger payloads grow as read
const PREALLOC_LIMIT: u64 = 1 << 20;

/// What to do when a record's content length is missing or unparsable, or
/// its header block ends before the sentinel key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadLengthPolicy {
    /// End the segment. Without a length the content boundary is unknown,
    /// and scanning for the next marker inside binary content can surface
    /// garbage as records.
    #[default]
    EndSegment,
    /// Skip the record and scan forward for the next marker.
    Resync,
}

/// Framing parameters for one archive family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Prefix of the line that opens a record, e.g. `WARC/1.0`
    pub version_marker: String,
    /// Header key whose line ends the header block
    pub header_end_key: String,
    /// Text decoding for header lines and payload text
    pub utf8: Utf8Policy,
    /// Drop a blank line between the header block and the content
    pub consume_blank_separator: bool,
    /// Longest header line accepted, in bytes
    pub max_line_len: usize,
    /// Reaction to an unusable content length
    pub bad_length: BadLengthPolicy,
}

impl DecoderConfig {
    /// Config for a marker and sentinel, other settings at their defaults.
    pub fn new(version_marker: impl Into<String>, header_end_key: impl Into<String>) -> Self {
        Self {
            version_marker: version_marker.into(),
            header_end_key: header_end_key.into(),
            utf8: Utf8Policy::default(),
            consume_blank_separator: true,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            bad_length: BadLengthPolicy::default(),
        }
    }

    /// Set the text decoding policy.
    pub const fn with_utf8(mut self, utf8: Utf8Policy) -> Self {
        self.utf8 = utf8;
        self
    }

    /// Keep or drop the blank separator line.
    pub const fn with_blank_separator(mut self, consume: bool) -> Self {
        self.consume_blank_separator = consume;
        self
    }

    /// Set the header line cap.
    pub const fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Set the unusable-length policy.
    pub const fn with_bad_length(mut self, bad_length: BadLengthPolicy) -> Self {
        self.bad_length = bad_length;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new("WARC/1.0", field::CONTENT_LENGTH)
    }
}

/// Where the decoder is in the framing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Discarding lines until a version marker
    ScanningForMark,
    /// Collecting header lines until the sentinel key
    ReadingHeader,
    /// Reading the declared content bytes
    ReadingContent,
    /// A record was just produced
    RecordReady,
    /// No further records will be produced
    EndOfStream,
}

enum HeaderEnd {
    Sentinel,
    /// Blank line or next marker before the sentinel
    Unterminated,
    EndOfStream,
    Overlong,
}

/// Pulls framed records out of an archive byte stream.
#[derive(Debug)]
pub struct WarcDecoder<R> {
    scanner: LineScanner<R>,
    config: DecoderConfig,
    state: DecoderState,
    line: Vec<u8>,
    /// Marker line consumed while reading a header, not yet scanned
    pending_mark: Option<String>,
    records: u64,
}

impl<R: BufRead> WarcDecoder<R> {
    /// Decode `reader` with the given framing.
    pub const fn new(reader: R, config: DecoderConfig) -> Self {
        Self {
            scanner: LineScanner::new(reader),
            config,
            state: DecoderState::ScanningForMark,
            line: Vec::new(),
            pending_mark: None,
            records: 0,
        }
    }

    /// Frame the next record.
    ///
    /// - a record with a usable length yields `Produced`, with a short
    ///   payload if the stream ended inside the content;
    /// - no marker, no sentinel, or no content bytes at all yields
    ///   `Exhausted`;
    /// - an unusable length yields `Exhausted` or `Skip`, per
    ///   [`BadLengthPolicy`];
    /// - an I/O failure yields `Fatal`, except a truncated compressed
    ///   stream, which counts as end of stream.
    ///
    /// After `Exhausted` or `Fatal` every later call returns `Exhausted`.
    pub fn next_record(&mut self) -> Decoded<WarcRecord> {
        if self.state == DecoderState::EndOfStream {
            return Decoded::Exhausted;
        }
        self.state = DecoderState::ScanningForMark;

        let outcome = self.frame_next();
        self.state = match &outcome {
            Decoded::Produced(_) => {
                self.records += 1;
                DecoderState::RecordReady
            }
            Decoded::Skip(_) => DecoderState::ScanningForMark,
            Decoded::Exhausted | Decoded::Fatal(_) => DecoderState::EndOfStream,
        };
        outcome
    }

    fn frame_next(&mut self) -> Decoded<WarcRecord> {
        let version = match self.scan_for_mark() {
            Ok(Some(version)) => version,
            Ok(None) => return Decoded::Exhausted,
            Err(err) => return Decoded::from_io(err),
        };

        self.state = DecoderState::ReadingHeader;
        let mut header = WarcHeader::new(version);
        match self.read_header(&mut header) {
            Ok(HeaderEnd::Sentinel) => {}
            Ok(HeaderEnd::Unterminated) => {
                let err = if header.content_length_raw().is_none() {
                    FramingError::MissingContentLength
                } else {
                    FramingError::MissingSentinel(self.config.header_end_key.clone())
                };
                return self.unframed(err);
            }
            Ok(HeaderEnd::EndOfStream) => {
                debug!(
                    position = self.scanner.position(),
                    "stream ended before {}",
                    self.config.header_end_key
                );
                return Decoded::Exhausted;
            }
            Ok(HeaderEnd::Overlong) => {
                return Decoded::Skip(FramingError::OverlongHeaderLine(self.config.max_line_len).into());
            }
            Err(err) => return Decoded::from_io(err),
        }

        let Some(length) = header.content_length() else {
            let err = header.content_length_raw().map_or(
                FramingError::MissingContentLength,
                |raw| FramingError::InvalidContentLength(raw.to_string()),
            );
            return self.unframed(err);
        };

        self.state = DecoderState::ReadingContent;
        match self.read_content(length) {
            Ok(Some(payload)) => {
                let record = WarcRecord::from_parts(header, payload, length);
                if record.is_truncated() {
                    debug!(
                        declared = length,
                        read = record.payload().len(),
                        "record content cut short"
                    );
                }
                trace!(position = self.scanner.position(), "record framed");
                Decoded::Produced(record)
            }
            Ok(None) => Decoded::Exhausted,
            Err(err) => Decoded::from_io(err),
        }
    }

    /// Discard lines up to and including the next marker line.
    fn scan_for_mark(&mut self) -> io::Result<Option<String>> {
        if let Some(version) = self.pending_mark.take() {
            return Ok(Some(version));
        }
        let policy = self.config.utf8;
        loop {
            let end = self
                .scanner
                .next_line(&mut self.line, self.config.max_line_len)?;
            let line = trim_cr(&self.line);
            if line.starts_with(self.config.version_marker.as_bytes()) {
                return Ok(Some(policy.decode(line).trim().to_string()));
            }
            if end == LineEnd::Eof {
                return Ok(None);
            }
        }
    }

    fn read_header(&mut self, header: &mut WarcHeader) -> io::Result<HeaderEnd> {
        let policy = self.config.utf8;
        loop {
            let end = self
                .scanner
                .next_line(&mut self.line, self.config.max_line_len)?;
            if end == LineEnd::Capped {
                return Ok(HeaderEnd::Overlong);
            }

            let line = trim_cr(&self.line);
            if line.starts_with(self.config.version_marker.as_bytes()) {
                self.pending_mark = Some(policy.decode(line).trim().to_string());
                return Ok(HeaderEnd::Unterminated);
            }
            if is_blank(line) {
                return Ok(if end == LineEnd::Eof {
                    HeaderEnd::EndOfStream
                } else {
                    HeaderEnd::Unterminated
                });
            }

            let text = policy.decode(line);
            let key = header.push_line(&text);
            if key.eq_ignore_ascii_case(&self.config.header_end_key) {
                return Ok(HeaderEnd::Sentinel);
            }
            if end == LineEnd::Eof {
                return Ok(HeaderEnd::EndOfStream);
            }
        }
    }

    /// Read `length` content bytes. `None` when the stream had none left.
    fn read_content(&mut self, length: u64) -> io::Result<Option<Vec<u8>>> {
        if length == 0 {
            return Ok(Some(Vec::new()));
        }

        let capacity = usize::try_from(length.min(PREALLOC_LIMIT)).unwrap_or_default();
        let mut payload = Vec::with_capacity(capacity);
        let mut remaining = length;

        if self.config.consume_blank_separator {
            // Budgeted by the declared length so a record without a
            // separator never reads past its own content.
            let budget = usize::try_from(length)
                .unwrap_or(usize::MAX)
                .min(self.config.max_line_len);
            let before = self.scanner.position();
            let end = match self.scanner.next_line(&mut self.line, budget) {
                Ok(end) => end,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof && !self.line.is_empty() => {
                    debug!("stream cut short inside record content: {err}");
                    payload.extend_from_slice(&self.line);
                    return Ok(Some(payload));
                }
                Err(err) => return Err(err),
            };
            let consumed = self.scanner.position() - before;

            let separator = end == LineEnd::Newline && trim_cr(&self.line).is_empty();
            if !separator {
                payload.extend_from_slice(&self.line);
                if end == LineEnd::Newline {
                    payload.push(b'\n');
                }
                remaining -= consumed;
            }
        }

        match self.scanner.read_up_to(remaining, &mut payload) {
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof && !payload.is_empty() => {
                debug!("stream cut short inside record content: {err}");
            }
            Err(err) => return Err(err),
        }

        if payload.is_empty() {
            debug!(declared = length, "no content bytes before end of stream");
            return Ok(None);
        }
        Ok(Some(payload))
    }

    /// A header was read but the content boundary is unknown.
    fn unframed(&self, err: FramingError) -> Decoded<WarcRecord> {
        match self.config.bad_length {
            BadLengthPolicy::EndSegment => {
                debug!(position = self.scanner.position(), "{err}, ending segment");
                Decoded::Exhausted
            }
            BadLengthPolicy::Resync => {
                debug!(position = self.scanner.position(), "{err}, scanning for next record");
                Decoded::Skip(err.into())
            }
        }
    }

    /// Current framing state
    pub const fn state(&self) -> DecoderState {
        self.state
    }

    /// Bytes consumed from the stream so far
    pub const fn position(&self) -> u64 {
        self.scanner.position()
    }

    /// Records produced so far
    pub const fn records_read(&self) -> u64 {
        self.records
    }

    /// Framing configuration
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Recover the underlying reader, positioned just after the last
    /// consumed byte.
    pub fn into_inner(self) -> R {
        self.scanner.into_inner()
    }
}

impl<R: BufRead> DecodeStep for WarcDecoder<R> {
    type Item = WarcRecord;

    fn decode_next(&mut self) -> Decoded<WarcRecord> {
        self.next_record()
    }
}

impl<R: BufRead> Iterator for WarcDecoder<R> {
    type Item = WarcRecord;

    /// Records until the stream ends; skips are passed over.
    fn next(&mut self) -> Option<WarcRecord> {
        loop {
            match self.next_record() {
                Decoded::Produced(record) => return Some(record),
                Decoded::Skip(_) => {}
                Decoded::Exhausted | Decoded::Fatal(_) => return None,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::warc::header::WarcRecordType;
    use dredge_collection::SkipReason;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn decoder(data: &[u8]) -> WarcDecoder<Cursor<Vec<u8>>> {
        WarcDecoder::new(Cursor::new(data.to_vec()), DecoderConfig::default())
    }

    fn produced(outcome: Decoded<WarcRecord>) -> WarcRecord {
        match outcome {
            Decoded::Produced(record) => record,
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn test_hello_round_trip() {
        let mut dec = decoder(b"WARC/1.0\nWARC-Type: response\nContent-Length: 5\n\nhello\n\n");
        let record = produced(dec.next_record());

        assert_eq!(record.payload(), b"hello");
        assert_eq!(record.record_type(), Some(&WarcRecordType::Response));
        assert_eq!(dec.state(), DecoderState::RecordReady);
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
        assert_eq!(dec.state(), DecoderState::EndOfStream);
    }

    #[test]
    fn test_truncated_content_is_partial_payload() {
        let mut dec = decoder(b"WARC/1.0\nContent-Length: 10\n\nabcd");
        let record = produced(dec.next_record());

        assert_eq!(record.payload(), b"abcd");
        assert_eq!(record.declared_length(), 10);
        assert!(record.is_truncated());
    }

    #[test]
    fn test_no_content_bytes_is_exhaustion() {
        let mut dec = decoder(b"WARC/1.0\nContent-Length: 10\n\n");
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
    }

    #[test]
    fn test_zero_length_record() {
        let mut dec = decoder(b"WARC/1.0\nWARC-Type: request\nContent-Length: 0\n\nWARC/1.0\nContent-Length: 2\n\nok");
        let first = produced(dec.next_record());
        assert!(first.payload().is_empty());
        assert!(!first.is_truncated());

        let second = produced(dec.next_record());
        assert_eq!(second.payload(), b"ok");
    }

    #[test]
    fn test_missing_length_ends_segment() {
        let mut dec = decoder(b"WARC/1.0\nWARC-Type: response\n\nhello\n");
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
        assert_eq!(dec.state(), DecoderState::EndOfStream);
    }

    const NO_LENGTH_THEN_RECORD: &[u8] = b"WARC/1.0\nWARC-Type: response\nWARC-TREC-ID: first\n\nhello\n\n\
WARC/1.0\nWARC-Type: request\nWARC-TREC-ID: second\nContent-Length: 2\n\nok\n\n";

    #[test]
    fn test_missing_length_before_next_record_ends_segment() {
        let mut dec = decoder(NO_LENGTH_THEN_RECORD);
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
    }

    #[test]
    fn test_missing_length_resyncs_without_merging_records() {
        let config = DecoderConfig::default().with_bad_length(BadLengthPolicy::Resync);
        let mut dec = WarcDecoder::new(Cursor::new(NO_LENGTH_THEN_RECORD.to_vec()), config);

        assert!(matches!(dec.next_record(), Decoded::Skip(_)));
        let record = produced(dec.next_record());
        assert_eq!(record.record_type(), Some(&WarcRecordType::Request));
        assert_eq!(record.header().get("WARC-TREC-ID"), Some("second"));
        assert_eq!(record.payload(), b"ok");
        assert!(record.header().metadata_fields().iter().all(|(k, _)| k != "hello"));
    }

    #[test]
    fn test_marker_inside_header_starts_next_record() {
        let data = b"WARC/1.0\nWARC-Type: response\nWARC/1.0\nWARC-Type: request\nContent-Length: 2\n\nok";
        let config = DecoderConfig::default().with_bad_length(BadLengthPolicy::Resync);
        let mut dec = WarcDecoder::new(Cursor::new(data.to_vec()), config);

        match dec.next_record() {
            Decoded::Skip(SkipReason::MalformedRecord(msg)) => assert!(msg.contains("Content-Length")),
            other => panic!("expected skip, got {other:?}"),
        }
        let record = produced(dec.next_record());
        assert_eq!(record.record_type(), Some(&WarcRecordType::Request));
        assert_eq!(record.payload(), b"ok");
    }

    #[test]
    fn test_custom_sentinel_missing_before_blank_line() {
        let data = b"WARC/0.18\nContent-Length: 4\n\nbody\nWARC/0.18\nContent-Length: 2\nWARC-TREC-ID: t-2\n\nok";
        let config = DecoderConfig::new("WARC/0.18", "WARC-TREC-ID").with_bad_length(BadLengthPolicy::Resync);
        let mut dec = WarcDecoder::new(Cursor::new(data.to_vec()), config);

        match dec.next_record() {
            Decoded::Skip(SkipReason::MalformedRecord(msg)) => assert!(msg.contains("WARC-TREC-ID")),
            other => panic!("expected skip, got {other:?}"),
        }
        assert_eq!(produced(dec.next_record()).payload(), b"ok");
    }

    #[test]
    fn test_unparsable_length_ends_segment_by_default() {
        let data = b"WARC/1.0\nContent-Length: lots\n\nxx\nWARC/1.0\nContent-Length: 2\n\nok";
        let mut dec = decoder(data);
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
    }

    #[test]
    fn test_resync_skips_to_next_marker() {
        let data = b"WARC/1.0\nContent-Length: lots\n\nxx\nWARC/1.0\nContent-Length: 2\n\nok";
        let config = DecoderConfig::default().with_bad_length(BadLengthPolicy::Resync);
        let mut dec = WarcDecoder::new(Cursor::new(data.to_vec()), config);

        match dec.next_record() {
            Decoded::Skip(SkipReason::MalformedRecord(msg)) => assert!(msg.contains("lots")),
            other => panic!("expected skip, got {other:?}"),
        }
        assert_eq!(dec.state(), DecoderState::ScanningForMark);
        assert_eq!(produced(dec.next_record()).payload(), b"ok");
    }

    #[test]
    fn test_garbage_before_marker_is_discarded() {
        let mut dec = decoder(b"\n\ngarbage\x00\xff\nWARC/1.0\r\nContent-Length: 3\r\n\r\nabc");
        let record = produced(dec.next_record());
        assert_eq!(record.header().version(), "WARC/1.0");
        assert_eq!(record.payload(), b"abc");
    }

    #[test]
    fn test_no_marker_is_exhaustion() {
        let mut dec = decoder(b"nothing to see\nhere\n");
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
        assert_eq!(dec.position(), 20);
    }

    #[test]
    fn test_custom_sentinel_stops_header_early() {
        let data = b"WARC/0.18\nContent-Length: 4\nWARC-TREC-ID: t-1\n\nbody";
        let config = DecoderConfig::new("WARC/0.18", "WARC-TREC-ID");
        let mut dec = WarcDecoder::new(Cursor::new(data.to_vec()), config);

        let record = produced(dec.next_record());
        assert_eq!(record.header().get("WARC-TREC-ID"), Some("t-1"));
        assert_eq!(record.payload(), b"body");
    }

    #[test]
    fn test_sentinel_match_ignores_case() {
        let mut dec = decoder(b"WARC/1.0\ncontent-length: 2\n\nhi");
        assert_eq!(produced(dec.next_record()).payload(), b"hi");
    }

    #[test]
    fn test_missing_separator_counts_as_payload() {
        let mut dec = decoder(b"WARC/1.0\nContent-Length: 6\nline1\nWARC/1.0\n");
        let record = produced(dec.next_record());
        assert_eq!(record.payload(), b"line1\n");
    }

    #[test]
    fn test_separator_budget_never_overreads() {
        // The first content line is longer than the declared length.
        let mut dec = decoder(b"WARC/1.0\nContent-Length: 3\nabcdef\n");
        let record = produced(dec.next_record());
        assert_eq!(record.payload(), b"abc");
    }

    #[test]
    fn test_separator_kept_when_disabled() {
        let config = DecoderConfig::default().with_blank_separator(false);
        let mut dec = WarcDecoder::new(Cursor::new(b"WARC/1.0\nContent-Length: 3\n\nab".to_vec()), config);
        assert_eq!(produced(dec.next_record()).payload(), b"\nab");
    }

    #[test]
    fn test_overlong_header_line_is_skipped() {
        let mut data = b"WARC/1.0\nX-Long: ".to_vec();
        data.extend(std::iter::repeat_n(b'a', 100));
        data.extend(b"\nWARC/1.0\nContent-Length: 2\n\nok");

        let config = DecoderConfig::default().with_max_line_len(32);
        let mut dec = WarcDecoder::new(Cursor::new(data), config);

        assert!(matches!(dec.next_record(), Decoded::Skip(_)));
        assert_eq!(produced(dec.next_record()).payload(), b"ok");
    }

    #[test]
    fn test_io_failure_is_fatal() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let mut dec = WarcDecoder::new(io::BufReader::new(Broken), DecoderConfig::default());
        assert!(matches!(dec.next_record(), Decoded::Fatal(_)));
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
    }

    #[test]
    fn test_stream_cut_inside_first_content_line() {
        struct CutShort(Cursor<Vec<u8>>);
        impl io::Read for CutShort {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                match io::Read::read(&mut self.0, buf)? {
                    0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated gzip")),
                    n => Ok(n),
                }
            }
        }

        let data = b"WARC/1.0\nContent-Length: 10\nabc".to_vec();
        let reader = io::BufReader::new(CutShort(Cursor::new(data)));
        let mut dec = WarcDecoder::new(reader, DecoderConfig::default());

        let record = produced(dec.next_record());
        assert_eq!(record.payload(), b"abc");
        assert!(record.is_truncated());
        assert_eq!(dec.position(), 31);
        assert!(matches!(dec.next_record(), Decoded::Exhausted));
    }

    #[test]
    fn test_iterator_and_into_inner() {
        let data = b"WARC/1.0\nContent-Length: 1\n\nA\n\nWARC/1.0\nContent-Length: 1\n\nB\n\ntrailer";
        let mut dec = decoder(data);
        let payloads: Vec<Vec<u8>> = dec.by_ref().map(|r| r.payload().to_vec()).collect();
        assert_eq!(payloads, vec![b"A".to_vec(), b"B".to_vec()]);
        assert_eq!(dec.records_read(), 2);
        assert_eq!(dec.position(), data.len() as u64);
        assert_eq!(dec.into_inner().position(), data.len() as u64);
    }

    proptest! {
        #[test]
        fn written_records_decode_back(
            payloads in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..200), 1..8),
            noise in "[a-z \n]{0,40}",
        ) {
            let mut stream = noise.into_bytes();
            stream.push(b'\n');
            for (i, payload) in payloads.iter().enumerate() {
                let header = WarcHeader::new("WARC/1.0")
                    .with("WARC-Type", "response")
                    .with("WARC-TREC-ID", &format!("doc-{i}"));
                WarcRecord::new(header, payload.clone()).write_to(&mut stream).unwrap();
            }

            let decoded: Vec<WarcRecord> = decoder(&stream).collect();
            prop_assert_eq!(decoded.len(), payloads.len());
            for (i, (record, payload)) in decoded.iter().zip(&payloads).enumerate() {
                prop_assert_eq!(record.payload(), payload.as_slice());
                let id = format!("doc-{i}");
                prop_assert_eq!(record.header().get("WARC-TREC-ID"), Some(id.as_str()));
            }
        }
    }
}
