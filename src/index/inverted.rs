//! The persistent inverted index over catalog descriptions.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::entry::CatalogEntry;
use crate::error::{CurioError, Result};
use crate::index::snapshot::{read_snapshot, write_snapshot};
use crate::index::statistics::{DocRef, TermStatistics};

/// One entry of a postings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Document id within this index.
    pub doc: u32,
    /// Occurrences of the term in that document.
    pub freq: u32,
}

/// Stored fields plus the analyzed length of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub entry: CatalogEntry,
    pub length: u64,
}

/// An immutable inverted index.
///
/// Document ids are dense, starting at zero, in the order documents were
/// added. Postings lists are sorted by document id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    documents: Vec<StoredDocument>,
    postings: BTreeMap<String, Vec<Posting>>,
    collection_frequencies: BTreeMap<String, u64>,
    collection_length: u64,
}

impl InvertedIndex {
    /// Assemble an index from its parts. Postings must already be sorted.
    pub(crate) fn from_parts(
        documents: Vec<StoredDocument>,
        postings: BTreeMap<String, Vec<Posting>>,
    ) -> Self {
        let collection_frequencies = postings
            .iter()
            .map(|(term, list)| {
                let cf = list.iter().map(|p| p.freq as u64).sum();
                (term.clone(), cf)
            })
            .collect();
        let collection_length = documents.iter().map(|d| d.length).sum();

        InvertedIndex {
            documents,
            postings,
            collection_frequencies,
            collection_length,
        }
    }

    /// Number of documents.
    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Total number of terms over all documents.
    pub fn collection_length(&self) -> u64 {
        self.collection_length
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    /// The postings list of a term, if it occurs anywhere.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    /// Look up a document by its catalog number.
    pub fn find(&self, doc_no: &str) -> Option<DocRef> {
        self.documents
            .iter()
            .position(|d| d.entry.doc_no == doc_no)
            .map(|i| DocRef::new(i as u32))
    }

    /// Write the index to `path` as a checksummed snapshot.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        write_snapshot(BufWriter::new(file), self)?;

        log::info!(
            "Saved index with {} documents to {}",
            self.doc_count(),
            path.display()
        );
        Ok(())
    }

    /// Read an index snapshot from `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                CurioError::resource_unavailable(format!("index {}: {e}", path.display()))
            }
            _ => CurioError::Io(e),
        })?;

        let index: InvertedIndex = read_snapshot(BufReader::new(file))?;
        log::info!(
            "Opened index {} ({} documents, {} terms)",
            path.display(),
            index.doc_count(),
            index.vocabulary_size()
        );
        Ok(index)
    }

    fn document(&self, doc: DocRef) -> Result<&StoredDocument> {
        self.documents
            .get(doc.index())
            .ok_or_else(|| CurioError::index(format!("unknown document {}", doc.id())))
    }
}

impl TermStatistics for InvertedIndex {
    fn document_length(&self, doc: DocRef) -> Result<u64> {
        Ok(self.document(doc)?.length)
    }

    fn term_frequency(&self, doc: DocRef, term: &str) -> Result<u64> {
        self.document(doc)?;
        let Some(list) = self.postings.get(term) else {
            return Ok(0);
        };
        Ok(list
            .binary_search_by_key(&doc.id(), |p| p.doc)
            .map(|i| list[i].freq as u64)
            .unwrap_or(0))
    }

    fn collection_frequency(&self, term: &str) -> Result<u64> {
        Ok(self.collection_frequencies.get(term).copied().unwrap_or(0))
    }

    fn live_documents(&self) -> Result<Vec<DocRef>> {
        Ok((0..self.documents.len() as u32).map(DocRef::new).collect())
    }

    fn stored_fields(&self, doc: DocRef) -> Result<CatalogEntry> {
        Ok(self.document(doc)?.entry.clone())
    }
}
