//! The decode-step protocol between a segment and its format adapter.

use crate::error::SkipReason;
use std::io;

/// Outcome of one attempt to produce the next item from a stream.
///
/// The four cases are kept apart so a segment never has to guess whether a
/// failure means "done", "drop this record" or "the file is broken".
#[derive(Debug)]
pub enum Decoded<T> {
    /// An item was produced
    Produced(T),
    /// The source has no more records; normal termination
    Exhausted,
    /// The record was discarded; iteration may continue
    Skip(SkipReason),
    /// The stream failed; iteration must stop
    Fatal(io::Error),
}

impl<T> Decoded<T> {
    /// Classify an I/O error raised mid-stream.
    ///
    /// A compressed stream cut short surfaces as `UnexpectedEof`; that is a
    /// truncated download, not a broken file, and ends iteration quietly.
    pub fn from_io(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Exhausted
        } else {
            Self::Fatal(err)
        }
    }

    /// Transform the produced item, keeping every other outcome.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Decoded<U> {
        match self {
            Self::Produced(item) => Decoded::Produced(f(item)),
            Self::Exhausted => Decoded::Exhausted,
            Self::Skip(reason) => Decoded::Skip(reason),
            Self::Fatal(err) => Decoded::Fatal(err),
        }
    }

    /// Chain a fallible conversion onto the produced item.
    ///
    /// An adapter uses this to turn a framed record into a document, where
    /// validation may reject the record with a skip.
    pub fn and_then<U, F: FnOnce(T) -> Decoded<U>>(self, f: F) -> Decoded<U> {
        match self {
            Self::Produced(item) => f(item),
            Self::Exhausted => Decoded::Exhausted,
            Self::Skip(reason) => Decoded::Skip(reason),
            Self::Fatal(err) => Decoded::Fatal(err),
        }
    }

    /// Whether an item was produced.
    pub const fn is_produced(&self) -> bool {
        matches!(self, Self::Produced(_))
    }

    /// Return the produced item, if any.
    pub fn produced(self) -> Option<T> {
        match self {
            Self::Produced(item) => Some(item),
            _ => None,
        }
    }
}

impl<T> From<Result<T, SkipReason>> for Decoded<T> {
    fn from(result: Result<T, SkipReason>) -> Self {
        match result {
            Ok(item) => Self::Produced(item),
            Err(reason) => Self::Skip(reason),
        }
    }
}

/// A format-specific step that pulls the next item out of a stream.
///
/// Implementors own their stream. Dropping the implementor closes it.
pub trait DecodeStep {
    /// The item type produced, usually [`Document`](crate::Document)
    type Item;

    /// Attempt to produce the next item.
    fn decode_next(&mut self) -> Decoded<Self::Item>;
}

impl<D: DecodeStep + ?Sized> DecodeStep for Box<D> {
    type Item = D::Item;

    fn decode_next(&mut self) -> Decoded<Self::Item> {
        (**self).decode_next()
    }
}

/// A decode step built from a closure.
///
/// Handy for ad-hoc sources and tests; real adapters implement
/// [`DecodeStep`] on their own types.
pub struct FnDecoder<F>(F);

impl<T, F: FnMut() -> Decoded<T>> FnDecoder<F> {
    /// Wrap a closure that yields one outcome per call.
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T, F: FnMut() -> Decoded<T>> DecodeStep for FnDecoder<F> {
    type Item = T;

    fn decode_next(&mut self) -> Decoded<T> {
        (self.0)()
    }
}

impl<F> std::fmt::Debug for FnDecoder<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnDecoder").finish_non_exhaustive()
    }
}
