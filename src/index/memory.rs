//! In-memory statistics provider with hand-specified numbers.
//!
//! Unlike [`InvertedIndex`](crate::index::inverted::InvertedIndex), nothing
//! here is derived from text unless asked to: document lengths and term
//! frequencies are whatever the caller says, even if inconsistent. That
//! makes it the provider of choice for exercising edge cases (zero-length
//! documents that still report term hits, failing lookups, lookup counting).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;

use crate::analysis::normalizer::Normalizer;
use crate::document::entry::CatalogEntry;
use crate::error::{CurioError, Result};
use crate::index::statistics::{DocRef, TermStatistics};

/// A lookup that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    DocumentLength,
    TermFrequency,
    CollectionFrequency,
    LiveDocuments,
    StoredFields,
}

/// How many times each statistics lookup has been served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupCounts {
    pub document_length: u64,
    pub term_frequency: u64,
    pub collection_frequency: u64,
}

#[derive(Debug, Default)]
struct LookupCounters {
    document_length: AtomicU64,
    term_frequency: AtomicU64,
    collection_frequency: AtomicU64,
}

#[derive(Debug, Clone)]
struct MemoryDocument {
    entry: CatalogEntry,
    length: u64,
    term_frequencies: AHashMap<String, u64>,
    live: bool,
}

/// Hand-specified term statistics.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatistics {
    documents: Vec<MemoryDocument>,
    collection_overrides: AHashMap<String, u64>,
    failure: Option<FailurePoint>,
    counters: Arc<LookupCounters>,
}

impl MemoryStatistics {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with explicit length and term frequencies.
    pub fn add_document(
        &mut self,
        entry: CatalogEntry,
        length: u64,
        term_frequencies: &[(&str, u64)],
    ) -> DocRef {
        let doc = DocRef::new(self.documents.len() as u32);
        self.documents.push(MemoryDocument {
            entry,
            length,
            term_frequencies: term_frequencies
                .iter()
                .map(|(term, tf)| (term.to_string(), *tf))
                .collect(),
            live: true,
        });
        doc
    }

    /// Add a document whose statistics come from normalizing its description.
    pub fn add_analyzed(&mut self, entry: CatalogEntry, normalizer: &Normalizer) -> DocRef {
        let terms = normalizer.normalize(&entry.description);
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for term in &terms {
            *counts.entry(term.clone()).or_insert(0) += 1;
        }

        let doc = DocRef::new(self.documents.len() as u32);
        self.documents.push(MemoryDocument {
            entry,
            length: terms.len() as u64,
            term_frequencies: counts,
            live: true,
        });
        doc
    }

    /// Take a document out of the live set.
    pub fn remove(&mut self, doc: DocRef) {
        if let Some(document) = self.documents.get_mut(doc.index()) {
            document.live = false;
        }
    }

    /// Pin the collection frequency of a term instead of summing documents.
    pub fn set_collection_frequency(&mut self, term: &str, frequency: u64) {
        self.collection_overrides.insert(term.to_string(), frequency);
    }

    /// Make every lookup of the given kind fail with a storage error.
    pub fn fail_on(&mut self, point: FailurePoint) {
        self.failure = Some(point);
    }

    /// Lookups served so far.
    pub fn lookup_counts(&self) -> LookupCounts {
        LookupCounts {
            document_length: self.counters.document_length.load(Ordering::Relaxed),
            term_frequency: self.counters.term_frequency.load(Ordering::Relaxed),
            collection_frequency: self.counters.collection_frequency.load(Ordering::Relaxed),
        }
    }

    fn check(&self, point: FailurePoint) -> Result<()> {
        if self.failure == Some(point) {
            Err(CurioError::storage(format!("injected failure at {point:?}")))
        } else {
            Ok(())
        }
    }

    fn document(&self, doc: DocRef) -> Result<&MemoryDocument> {
        self.documents
            .get(doc.index())
            .ok_or_else(|| CurioError::index(format!("unknown document {}", doc.id())))
    }
}

impl TermStatistics for MemoryStatistics {
    fn document_length(&self, doc: DocRef) -> Result<u64> {
        self.check(FailurePoint::DocumentLength)?;
        self.counters.document_length.fetch_add(1, Ordering::Relaxed);
        Ok(self.document(doc)?.length)
    }

    fn term_frequency(&self, doc: DocRef, term: &str) -> Result<u64> {
        self.check(FailurePoint::TermFrequency)?;
        self.counters.term_frequency.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .document(doc)?
            .term_frequencies
            .get(term)
            .copied()
            .unwrap_or(0))
    }

    fn collection_frequency(&self, term: &str) -> Result<u64> {
        self.check(FailurePoint::CollectionFrequency)?;
        self.counters
            .collection_frequency
            .fetch_add(1, Ordering::Relaxed);
        if let Some(frequency) = self.collection_overrides.get(term) {
            return Ok(*frequency);
        }
        Ok(self
            .documents
            .iter()
            .filter(|d| d.live)
            .filter_map(|d| d.term_frequencies.get(term))
            .sum())
    }

    fn live_documents(&self) -> Result<Vec<DocRef>> {
        self.check(FailurePoint::LiveDocuments)?;
        Ok(self
            .documents
            .iter()
            .enumerate()
            .filter(|(_, d)| d.live)
            .map(|(i, _)| DocRef::new(i as u32))
            .collect())
    }

    fn stored_fields(&self, doc: DocRef) -> Result<CatalogEntry> {
        self.check(FailurePoint::StoredFields)?;
        Ok(self.document(doc)?.entry.clone())
    }
}
