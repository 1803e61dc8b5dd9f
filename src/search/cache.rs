//! Per-call memo of document lengths and collection frequencies.
//!
//! A [`StatsCache`] lives for exactly one search call. It is filled up front
//! by [`warm`](StatsCache::warm) while the collection length is computed,
//! and is read-only afterwards, so scoring workers can share it. A miss falls
//! through to the provider.

use ahash::AHashMap;

use crate::error::Result;
use crate::index::statistics::{DocRef, TermStatistics};

#[derive(Debug, Default)]
pub struct StatsCache {
    document_lengths: AHashMap<DocRef, u64>,
    collection_frequencies: AHashMap<String, u64>,
    collection_length: u64,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.document_lengths.clear();
        self.collection_frequencies.clear();
        self.collection_length = 0;
    }

    /// Read the length of every document in `docs` and the collection
    /// frequency of every term in `terms`.
    ///
    /// The collection length becomes the sum of the document lengths.
    pub fn warm(
        &mut self,
        stats: &dyn TermStatistics,
        docs: &[DocRef],
        terms: &[String],
    ) -> Result<()> {
        self.clear();
        self.document_lengths.reserve(docs.len());

        let mut collection_length = 0u64;
        for &doc in docs {
            let length = stats.document_length(doc)?;
            collection_length = collection_length.saturating_add(length);
            self.document_lengths.insert(doc, length);
        }
        self.collection_length = collection_length;

        for term in terms {
            if !self.collection_frequencies.contains_key(term) {
                let frequency = stats.collection_frequency(term)?;
                self.collection_frequencies.insert(term.clone(), frequency);
            }
        }
        Ok(())
    }

    /// Sum of the lengths of the documents seen by the last `warm`.
    pub fn collection_length(&self) -> u64 {
        self.collection_length
    }

    pub fn document_length(&self, stats: &dyn TermStatistics, doc: DocRef) -> Result<u64> {
        match self.document_lengths.get(&doc) {
            Some(&length) => Ok(length),
            None => stats.document_length(doc),
        }
    }

    pub fn collection_frequency(&self, stats: &dyn TermStatistics, term: &str) -> Result<u64> {
        match self.collection_frequencies.get(term) {
            Some(&frequency) => Ok(frequency),
            None => stats.collection_frequency(term),
        }
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.document_lengths.len() + self.collection_frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
