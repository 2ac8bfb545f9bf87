//! Opening segment files as byte streams.
//!
//! Gzip input is detected from its magic bytes rather than the file name, so
//! a mislabelled file still decodes. Concatenated gzip members (one per WARC
//! record is common) read as one continuous stream.

use flate2::bufread::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::trace;

/// Gzip member magic
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read buffer size for segment files (64 KiB)
pub const BUFFER_SIZE: usize = 1 << 16;

/// A boxed byte source handed to decode steps.
pub type SegmentSource = Box<dyn BufRead + Send>;

/// Open a file for reading, decompressing it transparently if it is gzip.
pub fn open_source(path: &Path) -> io::Result<SegmentSource> {
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let source = wrap_source(reader)?;
    trace!(path = %path.display(), "opened segment source");
    Ok(source)
}

/// Wrap an already-open reader, decompressing it if it starts with gzip magic.
///
/// Sniffing uses `fill_buf`, so no bytes are consumed from a plain stream.
pub fn wrap_source<R: BufRead + Send + 'static>(mut reader: R) -> io::Result<SegmentSource> {
    if is_gzip(&mut reader)? {
        Ok(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            MultiGzDecoder::new(reader),
        )))
    } else {
        Ok(Box::new(reader))
    }
}

fn is_gzip<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let buf = reader.fill_buf()?;
    if buf.len() >= GZIP_MAGIC.len() {
        return Ok(buf[..GZIP_MAGIC.len()] == GZIP_MAGIC);
    }
    // A one-byte first fill is legal for odd readers; an empty or one-byte
    // stream is never gzip.
    Ok(false)
}
