//! Top-K collection with a deterministic tie-break.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::index::statistics::DocRef;

/// A scored document.
///
/// `ordinal` is the document's position in the snapshot's enumeration and
/// breaks score ties: the earlier document ranks first.
#[derive(Debug, Clone, Copy)]
pub struct ScoredDoc {
    pub doc: DocRef,
    pub ordinal: usize,
    pub score: f64,
}

impl ScoredDoc {
    /// Create a scored document.
    pub fn new(doc: DocRef, ordinal: usize, score: f64) -> Self {
        ScoredDoc {
            doc,
            ordinal,
            score,
        }
    }
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    /// Better documents compare lower: higher score first, then lower ordinal.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.ordinal.cmp(&other.ordinal))
    }
}

/// A collector that keeps the top N documents by score.
#[derive(Debug)]
pub struct TopDocsCollector {
    /// Maximum number of documents to collect.
    max_docs: usize,
    /// Collected hits; the heap top is the worst kept document.
    hits: BinaryHeap<ScoredDoc>,
    /// Total number of documents offered.
    total_hits: u64,
}

impl TopDocsCollector {
    /// Create a new top docs collector.
    pub fn new(max_docs: usize) -> Self {
        TopDocsCollector {
            max_docs,
            hits: BinaryHeap::with_capacity(max_docs.min(1024)),
            total_hits: 0,
        }
    }

    /// Get the maximum number of documents to collect.
    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Total number of documents offered so far.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Offer a scored document.
    pub fn collect(&mut self, scored: ScoredDoc) {
        self.total_hits += 1;
        if self.max_docs == 0 {
            return;
        }

        if self.hits.len() < self.max_docs {
            self.hits.push(scored);
        } else if let Some(worst) = self.hits.peek() {
            if scored < *worst {
                self.hits.pop();
                self.hits.push(scored);
            }
        }
    }

    /// Offer every document of an iterator.
    pub fn collect_all<I: IntoIterator<Item = ScoredDoc>>(&mut self, docs: I) {
        for scored in docs {
            self.collect(scored);
        }
    }

    /// The kept documents, best first.
    pub fn into_sorted(self) -> Vec<ScoredDoc> {
        self.hits.into_sorted_vec()
    }
}
