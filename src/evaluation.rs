//! Precision-at-k evaluation against keyword judgments.
//!
//! A judgment pairs a query with keywords that identify relevant entries.
//! A hit counts as relevant when its lowercased `title + " " + description`
//! contains any lowercased keyword.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CurioError, Result};
use crate::index::statistics::SnapshotSource;
use crate::search::searcher::{CatalogSearcher, SearchHit};

/// Number of leading titles kept per query in a report.
const TOP_TITLES: usize = 3;

/// One query and the keywords that mark its relevant results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub query: String,
    pub keywords: Vec<String>,
}

impl Judgment {
    pub fn new<S: Into<String>>(query: S, keywords: &[&str]) -> Self {
        Judgment {
            query: query.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Whether `hit` matches any keyword.
    pub fn is_relevant(&self, hit: &SearchHit) -> bool {
        let text = format!("{} {}", hit.title, hit.description).to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| text.contains(&keyword.to_lowercase()))
    }
}

/// Read a JSON array of judgments.
pub fn load_judgments<P: AsRef<Path>>(path: P) -> Result<Vec<Judgment>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        CurioError::resource_unavailable(format!("judgments {}: {e}", path.display()))
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// The outcome of one judged query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEvaluation {
    pub query: String,
    pub retrieved: usize,
    pub relevant: usize,
    /// `relevant / retrieved`, or 0 when nothing was retrieved.
    pub precision: f64,
    pub top_titles: Vec<String>,
}

/// Per-query results and their averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub k: usize,
    pub queries: Vec<QueryEvaluation>,
    pub mean_precision: f64,
    pub mean_relevant: f64,
}

/// Run every judgment through `searcher` with a cutoff of `k`.
pub fn evaluate<S: SnapshotSource>(
    searcher: &CatalogSearcher<S>,
    judgments: &[Judgment],
    k: usize,
) -> Result<EvaluationReport> {
    let mut queries = Vec::with_capacity(judgments.len());
    for judgment in judgments {
        let hits = searcher.search(&judgment.query, k)?;
        let relevant = hits.iter().filter(|hit| judgment.is_relevant(hit)).count();
        let precision = if hits.is_empty() {
            0.0
        } else {
            relevant as f64 / hits.len() as f64
        };

        log::info!(
            "Query {:?}: retrieved {}, relevant {relevant}, precision {precision:.3}",
            judgment.query,
            hits.len()
        );
        queries.push(QueryEvaluation {
            query: judgment.query.clone(),
            retrieved: hits.len(),
            relevant,
            precision,
            top_titles: hits.iter().take(TOP_TITLES).map(|h| h.title.clone()).collect(),
        });
    }

    let (mean_precision, mean_relevant) = if queries.is_empty() {
        (0.0, 0.0)
    } else {
        let n = queries.len() as f64;
        (
            queries.iter().map(|q| q.precision).sum::<f64>() / n,
            queries.iter().map(|q| q.relevant as f64).sum::<f64>() / n,
        )
    };

    Ok(EvaluationReport {
        k,
        queries,
        mean_precision,
        mean_relevant,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::normalizer::Normalizer;
    use crate::document::entry::CatalogEntry;
    use crate::index::writer::IndexWriter;
    use crate::search::config::SearchConfig;

    fn hit(title: &str, description: &str) -> SearchHit {
        SearchHit {
            rank: 1,
            score: -1.0,
            doc_no: "d".to_string(),
            title: title.to_string(),
            author: String::new(),
            price: String::new(),
            url: String::new(),
            description: description.to_string(),
            highlighted_description: description.to_string(),
        }
    }

    #[test]
    fn test_relevance_is_case_insensitive_substring() {
        let judgment = Judgment::new("maddy", &["Celeste", "pico"]);
        assert!(judgment.is_relevant(&hit("CELESTE", "")));
        assert!(judgment.is_relevant(&hit("Climb", "started as a PICO-8 game")));
        assert!(!judgment.is_relevant(&hit("Minit", "sixty seconds")));
    }

    #[test]
    fn test_relevance_spans_title_and_description() {
        let judgment = Judgment::new("q", &["quest game"]);
        assert!(judgment.is_relevant(&hit("Quest", "game of the year")));
    }

    #[test]
    fn test_evaluate() {
        let mut writer = IndexWriter::new(Normalizer::default());
        for (doc_no, title, description) in [
            ("1", "Minit", "a time-loop adventure in sixty seconds"),
            ("2", "A Short Hike", "a cozy exploration adventure"),
            ("3", "Celeste", "a hard platformer about climbing"),
        ] {
            writer
                .add_entry(
                    CatalogEntry::new(doc_no)
                        .with_title(title)
                        .with_description(description),
                )
                .unwrap();
        }
        let searcher =
            CatalogSearcher::new(Arc::new(writer.finish()), SearchConfig::default()).unwrap();

        let judgments = vec![
            Judgment::new("adventure", &["minit"]),
            Judgment::new("platformer", &["celeste"]),
            Judgment::new("racing", &["anything"]),
        ];
        let report = evaluate(&searcher, &judgments, 10).unwrap();

        assert_eq!(report.queries[0].retrieved, 2);
        assert_eq!(report.queries[0].relevant, 1);
        assert_eq!(report.queries[0].precision, 0.5);
        assert_eq!(report.queries[1].precision, 1.0);
        assert_eq!(report.queries[1].top_titles, vec!["Celeste"]);
        assert_eq!(report.queries[2].retrieved, 0);
        assert_eq!(report.queries[2].precision, 0.0);
        assert!((report.mean_precision - 0.5).abs() < 1e-12);
        assert!((report.mean_relevant - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_judgments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("judgments.json");
        fs::write(
            &path,
            r#"[{ "query": "surreal puzzle", "keywords": ["oneshot", "meta"] }]"#,
        )
        .unwrap();

        let judgments = load_judgments(&path).unwrap();
        assert_eq!(judgments, vec![Judgment::new("surreal puzzle", &["oneshot", "meta"])]);

        assert!(matches!(
            load_judgments(dir.path().join("missing.json")),
            Err(CurioError::ResourceUnavailable(_))
        ));
    }
}
