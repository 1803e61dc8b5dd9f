//! Corpus converters that turn files into catalog entries.

use std::path::Path;

use crate::document::entry::CatalogEntry;
use crate::error::Result;

pub mod trec;

/// A trait for converting a corpus file into an iterator of entries.
///
/// # Example
///
/// ```no_run
/// use curio::document::converter::DocumentConverter;
/// use curio::document::converter::trec::TrecDocumentConverter;
///
/// let converter = TrecDocumentConverter::new();
/// for entry in converter.convert("catalog.trectext").unwrap() {
///     let entry = entry.unwrap();
///     println!("{}: {}", entry.doc_no, entry.title);
/// }
/// ```
pub trait DocumentConverter {
    /// The iterator type that yields entries.
    type Iter: Iterator<Item = Result<CatalogEntry>>;

    /// Convert a file into an iterator of entries.
    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter>;
}
