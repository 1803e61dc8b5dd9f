//! Dirichlet-smoothed query-likelihood scoring.
//!
//! A document D is scored against a query as the log-probability that D's
//! smoothed language model generates the query terms:
//!
//! ```text
//! p_coll(t)  = cf(t) / |C|                      (0 when |C| = 0)
//! p(t | D)   = (tf(t, D) + μ · p_coll(t)) / (|D| + μ)
//! score(D)   = Σ ln p(t | D)   over query-term occurrences with p > 0
//! ```
//!
//! Terms with `p(t | D) = 0` add nothing. A document with `|D| = 0`, or in
//! which no query term occurs, is excluded rather than scored.

use std::fmt::Debug;

use crate::search::config::DEFAULT_MU;

/// Corpus-wide statistics for one query.
///
/// `collection_frequencies[i]` belongs to the i-th query-term occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub collection_length: u64,
    pub collection_frequencies: Vec<u64>,
}

impl CollectionStats {
    /// Background probability of the i-th query term.
    pub fn background_probability(&self, i: usize) -> f64 {
        if self.collection_length == 0 {
            return 0.0;
        }
        self.collection_frequencies.get(i).copied().unwrap_or(0) as f64
            / self.collection_length as f64
    }
}

/// Per-document statistics for one query.
///
/// `term_frequencies[i]` belongs to the i-th query-term occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStats {
    pub length: u64,
    pub term_frequencies: Vec<u64>,
}

impl DocumentStats {
    /// Whether the document can be scored at all.
    pub fn is_rankable(&self) -> bool {
        self.length > 0 && self.term_frequencies.iter().any(|&tf| tf > 0)
    }
}

/// Trait for document scoring functions.
pub trait ScoringFunction: Send + Sync + Debug {
    /// Score a document, or `None` if it must not be ranked.
    fn score(&self, document: &DocumentStats, collection: &CollectionStats) -> Option<f64>;

    /// Get the name of this scoring function.
    fn name(&self) -> &'static str;

    /// Get a description of this scoring function.
    fn description(&self) -> String;
}

/// Query likelihood with a Dirichlet prior of strength μ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryLikelihood {
    mu: f64,
}

impl QueryLikelihood {
    /// Create a scorer with smoothing constant `mu`.
    pub fn new(mu: f64) -> Self {
        QueryLikelihood { mu }
    }

    /// The smoothing constant.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Smoothed probability of one term in a document.
    pub fn term_probability(&self, tf: u64, doc_length: u64, background: f64) -> f64 {
        let denominator = doc_length as f64 + self.mu;
        if denominator > 0.0 {
            (tf as f64 + self.mu * background) / denominator
        } else {
            0.0
        }
    }
}

impl Default for QueryLikelihood {
    fn default() -> Self {
        Self::new(DEFAULT_MU)
    }
}

impl ScoringFunction for QueryLikelihood {
    fn score(&self, document: &DocumentStats, collection: &CollectionStats) -> Option<f64> {
        if !document.is_rankable() {
            return None;
        }

        let mut score = 0.0;
        for (i, &tf) in document.term_frequencies.iter().enumerate() {
            let p = self.term_probability(
                tf,
                document.length,
                collection.background_probability(i),
            );
            if p > 0.0 {
                score += p.ln();
            }
        }
        Some(score)
    }

    fn name(&self) -> &'static str {
        "query_likelihood"
    }

    fn description(&self) -> String {
        format!("Dirichlet-smoothed query likelihood (mu = {})", self.mu)
    }
}
