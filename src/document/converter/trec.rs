//! TREC-text corpus reader.
//!
//! The corpus is a sequence of tagged records:
//!
//! ```text
//! <DOC>
//! <DOCNO>itch-0001</DOCNO>
//! <TITLE>Minit $9.99</TITLE>
//! <AUTHOR>Jan Willem Nijman</AUTHOR>
//! <URL>https://example.itch.io/minit</URL>
//! <TEXT>
//! A peculiar little adventure
//! played sixty seconds at a time.
//! </TEXT>
//! </DOC>
//! ```
//!
//! Lines are trimmed before matching. `DOCNO`, `TITLE`, `AUTHOR`, `URL` and
//! `TEXT` are recognized when opened and closed on the same line; `TEXT` may
//! also span several lines, whose non-empty contents are joined with single
//! spaces. A single-line `TEXT` element is appended to the description as is,
//! without a separator. A record without a `DOCNO` is skipped, as is anything
//! outside `<DOC>`…`</DOC>`.
//!
//! Lines are decoded as UTF-8 with invalid bytes replaced by U+FFFD, so a
//! stray byte costs one character rather than the record.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::document::converter::DocumentConverter;
use crate::document::entry::CatalogEntry;
use crate::error::{CurioError, Result};

/// Streams [`CatalogEntry`] records out of any buffered reader.
#[derive(Debug)]
pub struct TrecReader<R> {
    reader: R,
    buf: Vec<u8>,
    in_doc: bool,
    in_text: bool,
    current: CatalogEntry,
    text: String,
}

impl<R: BufRead> TrecReader<R> {
    /// Create a reader over TREC-text input.
    pub fn new(reader: R) -> Self {
        TrecReader {
            reader,
            buf: Vec::new(),
            in_doc: false,
            in_text: false,
            current: CatalogEntry::default(),
            text: String::new(),
        }
    }

    fn append_line(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(content);
    }

    /// Handle one trimmed line, returning a finished record if it closed one.
    fn process_line(&mut self, line: &str) -> Option<CatalogEntry> {
        if line == "<DOC>" {
            self.in_doc = true;
            self.in_text = false;
            self.current = CatalogEntry::default();
            self.text.clear();
            return None;
        }

        if line == "</DOC>" {
            let finished = if self.in_doc && !self.current.doc_no.is_empty() {
                let mut entry = std::mem::take(&mut self.current);
                entry.description = self.text.trim().to_string();
                Some(entry)
            } else {
                None
            };
            self.in_doc = false;
            self.in_text = false;
            self.text.clear();
            return finished;
        }

        if !self.in_doc {
            return None;
        }

        if let Some(doc_no) = tag_content(line, "DOCNO") {
            self.current.doc_no = doc_no.to_string();
        } else if let Some(raw_title) = tag_content(line, "TITLE") {
            let (title, price) = CatalogEntry::split_title_price(raw_title);
            self.current.title = title;
            self.current.price = price;
        } else if let Some(author) = tag_content(line, "AUTHOR") {
            self.current.author = author.to_string();
        } else if let Some(url) = tag_content(line, "URL") {
            self.current.url = url.to_string();
        } else if let Some(text) = tag_content(line, "TEXT") {
            self.text.push_str(text);
        } else if line == "<TEXT>" {
            self.in_text = true;
        } else if line == "</TEXT>" {
            self.in_text = false;
        } else if self.in_text {
            self.append_line(line);
        }

        None
    }
}

impl<R: BufRead> Iterator for TrecReader<R> {
    type Item = Result<CatalogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    let buf = std::mem::take(&mut self.buf);
                    let entry = self.process_line(String::from_utf8_lossy(&buf).trim());
                    self.buf = buf;
                    if entry.is_some() {
                        return entry.map(Ok);
                    }
                }
                Err(e) => {
                    return Some(Err(CurioError::Io(e)));
                }
            }
        }
    }
}

/// The text between `<tag>` and `</tag>` when the line is exactly one such
/// element.
fn tag_content<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    if line.len() >= open.len() + close.len() {
        line.strip_prefix(open.as_str())?.strip_suffix(close.as_str())
    } else {
        None
    }
}

/// A document converter for TREC-text corpus files.
#[derive(Debug, Clone, Default)]
pub struct TrecDocumentConverter;

impl TrecDocumentConverter {
    /// Create a new TREC-text converter.
    pub fn new() -> Self {
        TrecDocumentConverter
    }
}

impl DocumentConverter for TrecDocumentConverter {
    type Iter = TrecReader<BufReader<File>>;

    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            CurioError::resource_unavailable(format!("corpus {}: {e}", path.display()))
        })?;

        Ok(TrecReader::new(BufReader::new(file)))
    }
}
