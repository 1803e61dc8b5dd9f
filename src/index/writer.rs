//! Builds an [`InvertedIndex`] from catalog entries.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::analysis::normalizer::Normalizer;
use crate::document::entry::CatalogEntry;
use crate::error::{CurioError, Result};
use crate::index::inverted::{InvertedIndex, Posting, StoredDocument};

#[derive(Debug)]
struct PendingDocument {
    entry: CatalogEntry,
    frequencies: AHashMap<String, u32>,
    length: u64,
    live: bool,
}

/// Accumulates documents and produces an immutable index.
///
/// Descriptions are analyzed with the supplied [`Normalizer`], which must be
/// the one used at query time. Adding an entry whose `doc_no` is already
/// present replaces the earlier entry.
///
/// # Examples
///
/// ```
/// use curio::analysis::normalizer::Normalizer;
/// use curio::document::entry::CatalogEntry;
/// use curio::index::writer::IndexWriter;
///
/// let mut writer = IndexWriter::new(Normalizer::default());
/// writer
///     .add_entry(CatalogEntry::new("d1").with_description("pixel art platformer"))
///     .unwrap();
/// let index = writer.finish();
/// assert_eq!(index.doc_count(), 1);
/// assert_eq!(index.collection_length(), 3);
/// ```
#[derive(Debug)]
pub struct IndexWriter {
    normalizer: Normalizer,
    documents: Vec<PendingDocument>,
    by_doc_no: AHashMap<String, usize>,
}

impl IndexWriter {
    /// Create a writer analyzing with `normalizer`.
    pub fn new(normalizer: Normalizer) -> Self {
        IndexWriter {
            normalizer,
            documents: Vec::new(),
            by_doc_no: AHashMap::new(),
        }
    }

    /// The normalizer used for descriptions.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Add one entry. Entries without a `doc_no` are rejected.
    pub fn add_entry(&mut self, entry: CatalogEntry) -> Result<()> {
        if entry.doc_no.is_empty() {
            return Err(CurioError::index("catalog entry has no doc_no"));
        }

        if let Some(previous) = self.by_doc_no.get(&entry.doc_no) {
            log::debug!("Replacing earlier entry {}", entry.doc_no);
            self.documents[*previous].live = false;
        }

        let mut frequencies: AHashMap<String, u32> = AHashMap::new();
        let mut length = 0u64;
        for term in self.normalizer.normalize(&entry.description) {
            *frequencies.entry(term).or_insert(0) += 1;
            length += 1;
        }

        self.by_doc_no
            .insert(entry.doc_no.clone(), self.documents.len());
        self.documents.push(PendingDocument {
            entry,
            frequencies,
            length,
            live: true,
        });
        Ok(())
    }

    /// Add every entry from an iterator of parsed records.
    ///
    /// Stops at the first error. Returns the number of entries added.
    pub fn add_entries<I>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<CatalogEntry>>,
    {
        let mut added = 0;
        for entry in entries {
            self.add_entry(entry?)?;
            added += 1;
        }
        Ok(added)
    }

    /// Mark the entry with `doc_no` as deleted. Returns whether it existed.
    pub fn delete(&mut self, doc_no: &str) -> bool {
        match self.by_doc_no.remove(doc_no) {
            Some(slot) => {
                self.documents[slot].live = false;
                true
            }
            None => false,
        }
    }

    /// Number of live entries so far.
    pub fn live_count(&self) -> usize {
        self.by_doc_no.len()
    }

    /// Consume the writer and build the index over live entries.
    pub fn finish(self) -> InvertedIndex {
        let mut documents = Vec::with_capacity(self.by_doc_no.len());
        let mut postings: BTreeMap<String, Vec<Posting>> = BTreeMap::new();

        for pending in self.documents.into_iter().filter(|d| d.live) {
            let doc = documents.len() as u32;
            for (term, freq) in pending.frequencies {
                postings.entry(term).or_default().push(Posting { doc, freq });
            }
            documents.push(StoredDocument {
                entry: pending.entry,
                length: pending.length,
            });
        }

        let index = InvertedIndex::from_parts(documents, postings);
        log::info!(
            "Built index: {} documents, {} terms, collection length {}",
            index.doc_count(),
            index.vocabulary_size(),
            index.collection_length()
        );
        index
    }
}
