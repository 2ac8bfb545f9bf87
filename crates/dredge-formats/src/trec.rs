//! TREC SGML newswire collections
//!
//! Documents are `<DOC>` ... `</DOC>` blocks. The id comes from
//! `<DOCNO>` ... `</DOCNO>`, or from an `id="..."` attribute on the `<DOC>`
//! tag itself. Indexed contents are the lines of the recognised content
//! sections, markup included; everything else in the block only appears in
//! `raw`.

use dredge_collection::{
    Collection, DecodeStep, Decoded, Document, SegmentFilter, SegmentSource, SkipReason,
};
use std::io::BufRead;
use tracing::debug;

/// Section tags whose lines make up a document's contents
pub const CONTENT_TAGS: [&str; 10] = [
    "TEXT", "HEADLINE", "TITLE", "HL", "HEAD", "TTL", "DD", "DATE", "LP", "LEADPARA",
];

const DOC_OPEN: &str = "<DOC>";
const DOC_OPEN_ATTR: &str = "<DOC ";
const DOC_CLOSE: &str = "</DOC>";
const DOCNO_OPEN: &str = "<DOCNO>";
const DOCNO_CLOSE: &str = "</DOCNO>";

/// A decode step yielding one document per `<DOC>` block.
#[derive(Debug)]
pub struct TrecDecoder<R> {
    reader: R,
    line: Vec<u8>,
    done: bool,
}

impl<R: BufRead> TrecDecoder<R> {
    /// Decode SGML from `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            done: false,
        }
    }

    /// Next line without its terminator, or `None` at end of stream.
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(&self.line);
        Ok(Some(text.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn read_block(&mut self) -> std::io::Result<Option<TrecBlock>> {
        let opening = loop {
            match self.next_line()? {
                Some(line) if is_doc_open(line.trim()) => break line,
                Some(_) => {}
                None => return Ok(None),
            }
        };

        let mut block = TrecBlock::new(&opening);
        loop {
            let Some(line) = self.next_line()? else {
                block.complete = false;
                return Ok(Some(block));
            };
            if line.trim().starts_with(DOC_CLOSE) {
                block.push_raw(&line);
                return Ok(Some(block));
            }
            block.push(&line);
        }
    }
}

fn is_doc_open(line: &str) -> bool {
    line.starts_with(DOC_OPEN) || line.starts_with(DOC_OPEN_ATTR)
}

/// Lines of one `<DOC>` block as they are read.
struct TrecBlock {
    raw: String,
    contents: String,
    attr_id: Option<String>,
    open_tag: Option<&'static str>,
    complete: bool,
}

impl TrecBlock {
    fn new(opening: &str) -> Self {
        let mut block = Self {
            raw: String::new(),
            contents: String::new(),
            attr_id: id_attribute(opening),
            open_tag: None,
            complete: true,
        };
        block.push_raw(opening);
        block
    }

    fn push_raw(&mut self, line: &str) {
        self.raw.push_str(line);
        self.raw.push('\n');
    }

    /// Record a body line, tracking which content section it falls in.
    fn push(&mut self, line: &str) {
        self.push_raw(line);
        let trimmed = line.trim();

        if self.open_tag.is_none() {
            self.open_tag = CONTENT_TAGS
                .iter()
                .copied()
                .find(|tag| starts_with_tag(trimmed, tag));
        }
        if let Some(tag) = self.open_tag {
            self.contents.push_str(trimmed);
            self.contents.push('\n');
            if ends_with_close_tag(trimmed, tag) {
                self.open_tag = None;
            }
        }
    }

    fn id(&self) -> Option<String> {
        if let Some(id) = &self.attr_id {
            return Some(id.clone());
        }
        let start = self.raw.find(DOCNO_OPEN)? + DOCNO_OPEN.len();
        let end = start + self.raw[start..].find(DOCNO_CLOSE)?;
        let id = self.raw[start..end].trim();
        (!id.is_empty()).then(|| id.to_string())
    }

    fn into_document(self) -> Result<Document, SkipReason> {
        if !self.complete {
            return Err(SkipReason::malformed("unterminated <DOC> block"));
        }
        let id = self.id().ok_or_else(|| SkipReason::missing_field("DOCNO"))?;
        Ok(Document::builder(id)
            .contents(self.contents.trim())
            .raw(self.raw)
            .build())
    }
}

/// `<TAG>` or `<TAG attr...>`
fn starts_with_tag(line: &str, tag: &str) -> bool {
    line.strip_prefix('<')
        .and_then(|rest| rest.strip_prefix(tag))
        .is_some_and(|rest| rest.starts_with('>') || rest.starts_with(' '))
}

fn ends_with_close_tag(line: &str, tag: &str) -> bool {
    line.strip_suffix('>')
        .and_then(|rest| rest.strip_suffix(tag))
        .is_some_and(|rest| rest.ends_with("</"))
}

/// Value of an `id="..."` attribute on an opening tag. Attributes that
/// merely end in `id`, like `docid`, do not count.
fn id_attribute(tag: &str) -> Option<String> {
    let mut from = 0;
    while let Some(found) = tag[from..].find("id=\"") {
        let at = from + found;
        let start = at + 4;
        if tag[..at].ends_with(|c: char| c.is_ascii_whitespace()) {
            let end = start + tag[start..].find('"')?;
            return Some(tag[start..end].to_string());
        }
        from = start;
    }
    None
}

impl<R: BufRead> DecodeStep for TrecDecoder<R> {
    type Item = Document;

    fn decode_next(&mut self) -> Decoded<Document> {
        if self.done {
            return Decoded::Exhausted;
        }
        match self.read_block() {
            Ok(Some(block)) => {
                if !block.complete {
                    self.done = true;
                }
                block.into_document().into()
            }
            Ok(None) => {
                self.done = true;
                Decoded::Exhausted
            }
            Err(err) => {
                self.done = true;
                debug!("TREC stream ended: {err}");
                Decoded::from_io(err)
            }
        }
    }
}

/// A TREC SGML corpus on disk.
#[derive(Debug, Clone)]
pub struct TrecCollection {
    filter: SegmentFilter,
}

impl TrecCollection {
    /// Collection with the usual TREC disk layout filter: `readme*` files
    /// and the `cr`, `dtd` and `dtds` directories are left out.
    pub fn new() -> Self {
        Self {
            filter: SegmentFilter::new()
                .skip_prefix("readme")
                .skip_dir("cr")
                .skip_dir("dtd")
                .skip_dir("dtds"),
        }
    }

    /// Replace the segment filter.
    pub fn with_filter(mut self, filter: SegmentFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for TrecCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection for TrecCollection {
    type Decoder = TrecDecoder<SegmentSource>;

    fn name(&self) -> &str {
        "trec"
    }

    fn filter(&self) -> &SegmentFilter {
        &self.filter
    }

    fn decoder(&self, source: SegmentSource) -> Self::Decoder {
        TrecDecoder::new(source)
    }
}
