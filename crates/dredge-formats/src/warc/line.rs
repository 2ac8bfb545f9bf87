//! Byte-exact line scanning for archive streams.
//!
//! Header lines and content bytes are read from the same buffered reader, so
//! a line read never consumes bytes that belong to the content block that
//! follows it. Lines are split on `\n` alone; text decoding happens only after
//! the terminator has been found, so an invalid byte sequence can never hide
//! a line boundary.

use std::borrow::Cow;
use std::io::{self, BufRead, Read};
use std::str::Utf8Error;

/// How bytes that are not valid UTF-8 become text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Utf8Policy {
    /// Each invalid byte becomes the character with the same code point
    /// (U+0000 to U+00FF), so no input byte is lost
    #[default]
    PassThrough,
    /// Each invalid sequence becomes U+FFFD
    Replace,
    /// Payloads that are not valid UTF-8 are rejected by
    /// [`try_decode`](Self::try_decode); header lines are still decoded with
    /// replacement
    Strict,
}

impl Utf8Policy {
    /// Decode `bytes` under this policy. Valid UTF-8 is borrowed.
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Replace | Self::Strict => String::from_utf8_lossy(bytes),
            Self::PassThrough => match std::str::from_utf8(bytes) {
                Ok(text) => Cow::Borrowed(text),
                Err(_) => {
                    let mut text = String::with_capacity(bytes.len());
                    for chunk in bytes.utf8_chunks() {
                        text.push_str(chunk.valid());
                        text.extend(chunk.invalid().iter().copied().map(char::from));
                    }
                    Cow::Owned(text)
                }
            },
        }
    }

    /// Like [`decode`](Self::decode), but `Strict` fails on invalid input.
    pub fn try_decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, Utf8Error> {
        match self {
            Self::Strict => std::str::from_utf8(bytes).map(Cow::Borrowed),
            _ => Ok(self.decode(bytes)),
        }
    }
}

/// How a call to [`LineScanner::next_line`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// A `\n` terminator was consumed (and is not part of the line)
    Newline,
    /// The byte limit was reached before a terminator
    Capped,
    /// The stream ended before a terminator; the line may be empty
    Eof,
}

/// Reads lines and exact byte counts from a buffered stream, tracking how
/// many bytes have been consumed.
#[derive(Debug)]
pub struct LineScanner<R> {
    inner: R,
    position: u64,
}

impl<R: BufRead> LineScanner<R> {
    /// Wrap a reader positioned at the start of the data to scan.
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Read up to `limit` bytes of the next line into `buf`.
    ///
    /// `buf` is cleared first. The terminator is consumed but not stored; a
    /// trailing `\r` is kept, see [`trim_cr`]. If the stream fails part way,
    /// the bytes read before the failure stay in `buf`.
    pub fn next_line(&mut self, buf: &mut Vec<u8>, limit: usize) -> io::Result<LineEnd> {
        buf.clear();
        let limit = u64::try_from(limit).unwrap_or(u64::MAX);
        let result = (&mut self.inner).take(limit).read_until(b'\n', buf);
        self.position += buf.len() as u64;
        let read = result?;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            Ok(LineEnd::Newline)
        } else if read as u64 == limit && limit > 0 {
            Ok(LineEnd::Capped)
        } else {
            Ok(LineEnd::Eof)
        }
    }

    /// Append up to `count` bytes to `out`, stopping early at end of stream.
    ///
    /// Returns the number of bytes appended. If the stream fails part way,
    /// the bytes read before the failure stay in `out` and are counted in
    /// [`position`](Self::position).
    pub fn read_up_to(&mut self, count: u64, out: &mut Vec<u8>) -> io::Result<usize> {
        let before = out.len();
        let result = (&mut self.inner).take(count).read_to_end(out);
        self.position += (out.len() - before) as u64;
        result
    }

    /// Bytes consumed from the underlying reader so far
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Borrow the underlying reader.
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Recover the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Strip one trailing `\r` left by CRLF line endings.
pub fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Whether a line holds only ASCII whitespace.
pub fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}
