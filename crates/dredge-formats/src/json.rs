//! JSON document collections
//!
//! A segment is either JSON lines (one object per line) or a single JSON
//! array of objects. Each object needs an `id` and a `contents` field; other
//! scalar fields travel with the document as extra fields.

use dredge_collection::{
    Collection, DecodeStep, Decoded, Document, SegmentFilter, SegmentSource, SkipReason,
};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::io::BufRead;
use tracing::debug;

/// Field holding the document id
pub const ID_FIELD: &str = "id";

/// Field holding the indexed text
pub const CONTENTS_FIELD: &str = "contents";

#[derive(Debug)]
enum Layout {
    /// Layout not known until the first non-blank byte
    Unknown,
    Lines,
    Array(VecDeque<Value>),
    Done,
}

/// A decode step yielding one document per JSON object.
#[derive(Debug)]
pub struct JsonDecoder<R> {
    reader: R,
    layout: Layout,
    line: Vec<u8>,
}

impl<R: BufRead> JsonDecoder<R> {
    /// Decode JSON documents from `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            layout: Layout::Unknown,
            line: Vec::new(),
        }
    }

    /// Skip leading whitespace and report the first significant byte.
    fn peek_significant(&mut self) -> std::io::Result<Option<u8>> {
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(None);
            }
            let skip = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            if skip < buf.len() {
                let first = buf[skip];
                self.reader.consume(skip);
                return Ok(Some(first));
            }
            let len = buf.len();
            self.reader.consume(len);
        }
    }

    fn detect_layout(&mut self) -> Decoded<Document> {
        match self.peek_significant() {
            Ok(Some(b'[')) => match serde_json::from_reader::<_, Vec<Value>>(&mut self.reader) {
                Ok(values) => {
                    self.layout = Layout::Array(values.into());
                    self.decode_next()
                }
                Err(err) => {
                    self.layout = Layout::Done;
                    if err.is_io() {
                        return Decoded::from_io(err.into());
                    }
                    Decoded::Skip(SkipReason::malformed(format!("JSON array: {err}")))
                }
            },
            Ok(Some(_)) => {
                self.layout = Layout::Lines;
                self.decode_next()
            }
            Ok(None) => {
                self.layout = Layout::Done;
                Decoded::Exhausted
            }
            Err(err) => {
                self.layout = Layout::Done;
                Decoded::from_io(err)
            }
        }
    }

    fn next_line(&mut self) -> Decoded<Document> {
        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.layout = Layout::Done;
                    return Decoded::Exhausted;
                }
                Ok(_) => {}
                Err(err) => {
                    self.layout = Layout::Done;
                    return Decoded::from_io(err);
                }
            }

            let text = String::from_utf8_lossy(&self.line);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            return match serde_json::from_str::<Value>(text) {
                Ok(value) => to_document(value, Some(text)).into(),
                Err(err) => Decoded::Skip(SkipReason::malformed(format!("JSON line: {err}"))),
            };
        }
    }
}

impl<R: BufRead> DecodeStep for JsonDecoder<R> {
    type Item = Document;

    fn decode_next(&mut self) -> Decoded<Document> {
        match &mut self.layout {
            Layout::Unknown => self.detect_layout(),
            Layout::Lines => self.next_line(),
            Layout::Array(values) => match values.pop_front() {
                Some(value) => to_document(value, None).into(),
                None => {
                    self.layout = Layout::Done;
                    Decoded::Exhausted
                }
            },
            Layout::Done => Decoded::Exhausted,
        }
    }
}

/// Map one JSON value to a document.
///
/// `raw` is the source text when there is one; otherwise the value is
/// serialised again.
pub fn to_document(value: Value, raw: Option<&str>) -> Result<Document, SkipReason> {
    let Value::Object(object) = value else {
        return Err(SkipReason::malformed("JSON value is not an object"));
    };
    let raw = raw.map_or_else(|| Value::Object(object.clone()).to_string(), str::to_string);
    document_from_object(object, raw)
}

fn document_from_object(object: Map<String, Value>, raw: String) -> Result<Document, SkipReason> {
    let mut id = None;
    let mut contents = None;
    let mut fields = Vec::new();

    for (key, value) in object {
        let Some(text) = scalar_text(&value) else {
            debug!(field = %key, "dropping non-scalar JSON field");
            continue;
        };
        match key.as_str() {
            ID_FIELD => id = Some(text),
            CONTENTS_FIELD => contents = Some(text),
            _ => fields.push((key, text)),
        }
    }

    let id = id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SkipReason::missing_field(ID_FIELD))?;
    let contents = contents.ok_or_else(|| SkipReason::missing_field(CONTENTS_FIELD))?;

    let builder = Document::builder(id).contents(contents).raw(raw);
    Ok(fields
        .into_iter()
        .fold(builder, |builder, (key, value)| builder.field(key, value))
        .build())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A corpus of JSON or JSON-lines files.
#[derive(Debug, Clone)]
pub struct JsonCollection {
    filter: SegmentFilter,
}

impl JsonCollection {
    /// Collection over `.json` and `.jsonl` files, plain or gzip.
    pub fn new() -> Self {
        Self {
            filter: SegmentFilter::new()
                .allow_suffix(".json")
                .allow_suffix(".jsonl")
                .allow_suffix(".json.gz")
                .allow_suffix(".jsonl.gz"),
        }
    }

    /// Replace the segment filter.
    pub fn with_filter(mut self, filter: SegmentFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for JsonCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection for JsonCollection {
    type Decoder = JsonDecoder<SegmentSource>;

    fn name(&self) -> &str {
        "json"
    }

    fn filter(&self) -> &SegmentFilter {
        &self.filter
    }

    fn decoder(&self, source: SegmentSource) -> Self::Decoder {
        JsonDecoder::new(source)
    }
}
