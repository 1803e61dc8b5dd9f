//! The catalog search orchestrator.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;
use crate::error::{CurioError, Result};
use crate::index::statistics::{DocRef, SnapshotSource, TermStatistics};
use crate::search::cache::StatsCache;
use crate::search::collector::{ScoredDoc, TopDocsCollector};
use crate::search::config::SearchConfig;
use crate::search::highlight::Highlighter;
use crate::search::scoring::{CollectionStats, DocumentStats, QueryLikelihood, ScoringFunction};

/// One ranked, highlighted search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// 1-based position in the result list.
    pub rank: usize,
    /// Log-likelihood score, comparable only within one query.
    pub score: f64,
    pub doc_no: String,
    pub title: String,
    pub author: String,
    pub price: String,
    pub url: String,
    /// The description as stored.
    pub description: String,
    /// The description with matched words wrapped in highlight tags.
    pub highlighted_description: String,
}

/// Runs keyword queries against a [`SnapshotSource`].
///
/// Every call takes its own snapshot and its own [`StatsCache`], so
/// concurrent calls never share statistics and a reload of the source only
/// affects calls that start after it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use curio::analysis::normalizer::Normalizer;
/// use curio::document::entry::CatalogEntry;
/// use curio::index::writer::IndexWriter;
/// use curio::search::config::SearchConfig;
/// use curio::search::searcher::CatalogSearcher;
///
/// let mut writer = IndexWriter::new(Normalizer::default());
/// writer.add_entry(CatalogEntry::new("d1").with_description("cozy pixel adventure game")).unwrap();
/// writer.add_entry(CatalogEntry::new("d2").with_description("pixel art platformer")).unwrap();
///
/// let searcher = CatalogSearcher::new(Arc::new(writer.finish()), SearchConfig::default()).unwrap();
/// let hits = searcher.search("pixel adventure", 10).unwrap();
///
/// assert_eq!(hits[0].doc_no, "d1");
/// assert_eq!(hits[0].highlighted_description, "cozy <mark>pixel</mark> <mark>adventure</mark> game");
/// ```
pub struct CatalogSearcher<S> {
    source: S,
    config: SearchConfig,
    normalizer: Normalizer,
    scorer: Arc<dyn ScoringFunction>,
    highlighter: Highlighter,
    pool: Option<ThreadPool>,
}

impl<S> std::fmt::Debug for CatalogSearcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSearcher")
            .field("config", &self.config)
            .field("normalizer", &self.normalizer)
            .field("scorer", &self.scorer.name())
            .field("threads", &self.pool.as_ref().map(|p| p.current_num_threads()))
            .finish()
    }
}

impl<S: SnapshotSource> CatalogSearcher<S> {
    /// Create a searcher whose stop words come from the configuration.
    pub fn new(source: S, config: SearchConfig) -> Result<Self> {
        let normalizer = Normalizer::from_source(&config.stopwords);
        Self::with_normalizer(source, config, normalizer)
    }

    /// Create a searcher with an explicit normalizer.
    ///
    /// The normalizer must match the one the index was built with.
    pub fn with_normalizer(source: S, config: SearchConfig, normalizer: Normalizer) -> Result<Self> {
        config.validate()?;

        let pool = if config.parallel {
            let threads = config.num_threads.unwrap_or_else(num_cpus::get);
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("curio-search-{i}"))
                .build()
                .map_err(|e| CurioError::internal(format!("Failed to create thread pool: {e}")))?;
            Some(pool)
        } else {
            None
        };

        Ok(CatalogSearcher {
            source,
            scorer: Arc::new(QueryLikelihood::new(config.mu)),
            highlighter: Highlighter::new(normalizer.clone(), config.highlight.clone()),
            normalizer,
            config,
            pool,
        })
    }

    /// Replace the scoring function.
    pub fn with_scorer(mut self, scorer: Arc<dyn ScoringFunction>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Search with the configured default result count.
    pub fn search_default(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.search(query, self.config.default_limit)
    }

    /// Return up to `k` hits for `query`, best first.
    ///
    /// `k` is capped at the configured maximum. A query without any
    /// searchable term, or `k == 0`, yields no hits. Any failure reading
    /// statistics aborts the call with [`CurioError::Retrieval`].
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        let start = Instant::now();
        let terms = self.normalizer.normalize(query);
        let limit = self.config.effective_limit(Some(k));
        if terms.is_empty() || limit == 0 {
            log::debug!("Query {query:?} has no terms or no room for results");
            return Ok(Vec::new());
        }

        let snapshot = self.source.snapshot().map_err(CurioError::retrieval)?;
        let stats = snapshot.as_ref();
        let docs = stats.live_documents().map_err(CurioError::retrieval)?;

        let mut cache = StatsCache::new();
        cache
            .warm(stats, &docs, &terms)
            .map_err(CurioError::retrieval)?;
        let collection = CollectionStats {
            collection_length: cache.collection_length(),
            collection_frequencies: terms
                .iter()
                .map(|term| cache.collection_frequency(stats, term))
                .collect::<Result<_>>()
                .map_err(CurioError::retrieval)?,
        };

        let scored = self
            .score_all(stats, &cache, &docs, &terms, &collection)
            .map_err(CurioError::retrieval)?;
        let matched = scored.len();

        let mut collector = TopDocsCollector::new(limit);
        collector.collect_all(scored);
        let top = collector.into_sorted();

        let query_terms: HashSet<String> = terms.into_iter().collect();
        let hits = top
            .into_iter()
            .enumerate()
            .map(|(i, scored)| self.build_hit(stats, i + 1, scored, &query_terms))
            .collect::<Result<Vec<_>>>()
            .map_err(CurioError::retrieval)?;

        log::debug!(
            "Query {query:?}: {} documents, {matched} matched, {} returned in {:?}",
            docs.len(),
            hits.len(),
            start.elapsed()
        );
        Ok(hits)
    }

    fn score_all(
        &self,
        stats: &dyn TermStatistics,
        cache: &StatsCache,
        docs: &[DocRef],
        terms: &[String],
        collection: &CollectionStats,
    ) -> Result<Vec<ScoredDoc>> {
        let score_one = |(ordinal, &doc): (usize, &DocRef)| {
            self.score_document(stats, cache, terms, collection, ordinal, doc)
        };

        let scored: Vec<Option<ScoredDoc>> = match &self.pool {
            Some(pool) => pool.install(|| {
                docs.par_iter()
                    .enumerate()
                    .map(score_one)
                    .collect::<Result<_>>()
            })?,
            None => docs
                .iter()
                .enumerate()
                .map(score_one)
                .collect::<Result<_>>()?,
        };

        Ok(scored.into_iter().flatten().collect())
    }

    fn score_document(
        &self,
        stats: &dyn TermStatistics,
        cache: &StatsCache,
        terms: &[String],
        collection: &CollectionStats,
        ordinal: usize,
        doc: DocRef,
    ) -> Result<Option<ScoredDoc>> {
        let length = cache.document_length(stats, doc)?;
        if length == 0 {
            return Ok(None);
        }

        let term_frequencies = terms
            .iter()
            .map(|term| stats.term_frequency(doc, term))
            .collect::<Result<Vec<_>>>()?;
        let document = DocumentStats {
            length,
            term_frequencies,
        };

        Ok(self
            .scorer
            .score(&document, collection)
            .map(|score| ScoredDoc::new(doc, ordinal, score)))
    }

    fn build_hit(
        &self,
        stats: &dyn TermStatistics,
        rank: usize,
        scored: ScoredDoc,
        query_terms: &HashSet<String>,
    ) -> Result<SearchHit> {
        let entry = stats.stored_fields(scored.doc)?;
        let highlighted_description = self.highlighter.highlight(&entry.description, query_terms);

        Ok(SearchHit {
            rank,
            score: scored.score,
            doc_no: entry.doc_no,
            title: entry.title,
            author: entry.author,
            price: entry.price,
            url: entry.url,
            description: entry.description,
            highlighted_description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::entry::CatalogEntry;
    use crate::index::memory::{FailurePoint, MemoryStatistics};

    fn scenario_corpus() -> Arc<MemoryStatistics> {
        let normalizer = Normalizer::default();
        let mut stats = MemoryStatistics::new();
        stats.add_analyzed(
            CatalogEntry::new("doc1")
                .with_title("Cozy Quest")
                .with_description("cozy pixel adventure game"),
            &normalizer,
        );
        stats.add_analyzed(
            CatalogEntry::new("doc2")
                .with_title("Jumpers")
                .with_description("pixel art platformer"),
            &normalizer,
        );
        Arc::new(stats)
    }

    #[test]
    fn test_scenario_ranking() {
        let searcher = CatalogSearcher::new(scenario_corpus(), SearchConfig::default()).unwrap();
        let hits = searcher.search("pixel adventure", 10).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].doc_no, "doc1");
        assert_eq!(hits[0].rank, 1);
        assert_eq!(hits[1].doc_no, "doc2");
        assert_eq!(hits[1].rank, 2);
        assert!(hits[0].score > hits[1].score);
        assert_eq!(hits[1].highlighted_description, "<mark>pixel</mark> art platformer");
    }

    #[test]
    fn test_blank_and_stopword_queries() {
        let searcher = CatalogSearcher::new(scenario_corpus(), SearchConfig::default()).unwrap();
        assert!(searcher.search("", 10).unwrap().is_empty());
        assert!(searcher.search("  ,.;  ", 10).unwrap().is_empty());
        assert!(searcher.search("the and of", 10).unwrap().is_empty());
    }

    #[test]
    fn test_limits() {
        let searcher = CatalogSearcher::new(
            scenario_corpus(),
            SearchConfig::default().max_limit(1),
        )
        .unwrap();
        assert!(searcher.search("pixel", 0).unwrap().is_empty());
        assert_eq!(searcher.search("pixel", 10).unwrap().len(), 1);
        assert_eq!(searcher.search_default("pixel").unwrap().len(), 1);
    }

    #[test]
    fn test_zero_length_documents_are_excluded() {
        let mut stats = MemoryStatistics::new();
        // Inconsistent on purpose: reports a hit but no length.
        stats.add_document(CatalogEntry::new("empty"), 0, &[("pixel", 3)]);
        stats.add_document(CatalogEntry::new("real"), 2, &[("pixel", 1)]);

        let searcher = CatalogSearcher::new(Arc::new(stats), SearchConfig::default()).unwrap();
        let hits = searcher.search("pixel", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_no, "real");
    }

    #[test]
    fn test_provider_failure_is_a_retrieval_error() {
        for point in [
            FailurePoint::DocumentLength,
            FailurePoint::TermFrequency,
            FailurePoint::CollectionFrequency,
            FailurePoint::LiveDocuments,
            FailurePoint::StoredFields,
        ] {
            let mut stats = MemoryStatistics::new();
            stats.add_document(CatalogEntry::new("a"), 2, &[("pixel", 1)]);
            stats.fail_on(point);

            let searcher =
                CatalogSearcher::new(Arc::new(stats), SearchConfig::default()).unwrap();
            let err = searcher.search("pixel", 10).unwrap_err();
            assert!(matches!(err, CurioError::Retrieval(_)), "{point:?}: {err}");
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = CatalogSearcher::new(scenario_corpus(), SearchConfig::default().mu(-5.0))
            .unwrap_err();
        assert!(matches!(err, CurioError::Config(_)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = CatalogSearcher::new(scenario_corpus(), SearchConfig::default()).unwrap();
        let parallel = CatalogSearcher::new(
            scenario_corpus(),
            SearchConfig::default().parallel(true).num_threads(2),
        )
        .unwrap();

        for query in ["pixel adventure", "cozy", "art art pixel", "missing"] {
            assert_eq!(
                sequential.search(query, 10).unwrap(),
                parallel.search(query, 10).unwrap()
            );
        }
    }
}
