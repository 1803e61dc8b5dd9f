//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{CurioArgs, OutputFormat};
use crate::error::Result;
use crate::evaluation::EvaluationReport;
use crate::search::searcher::SearchHit;

/// Result structure for index builds.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexBuildResult {
    pub path: String,
    pub documents: usize,
    pub vocabulary_size: usize,
    pub collection_length: u64,
    pub index_size_bytes: u64,
    pub duration_ms: u64,
}

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub duration_ms: u64,
}

/// Index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexStats {
    pub path: String,
    pub total_documents: usize,
    pub collection_length: u64,
    pub vocabulary_size: usize,
    pub average_document_length: f64,
    pub index_size_bytes: u64,
}

/// Rendering of a result for people rather than programs.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

/// Output a result in the selected format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &CurioArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => println!("{}", result.render_human()),
        OutputFormat::Json => println!("{}", render_json(result, args.pretty)?),
    }
    Ok(())
}

/// Serialize a result as JSON.
pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

impl HumanOutput for IndexBuildResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Index written to {}\n", self.path));
        out.push_str(&format!("Documents: {}\n", self.documents));
        out.push_str(&format!("Vocabulary: {} terms\n", self.vocabulary_size));
        out.push_str(&format!("Collection length: {}\n", self.collection_length));
        out.push_str(&format!("Size: {}\n", format_bytes(self.index_size_bytes)));
        out.push_str(&format!("Build time: {}ms", self.duration_ms));
        out
    }
}

impl HumanOutput for SearchResults {
    fn render_human(&self) -> String {
        if self.hits.is_empty() {
            return format!("No results for {:?} ({}ms)", self.query, self.duration_ms);
        }

        let mut out = String::new();
        out.push_str("Search Results:\n");
        out.push_str("═══════════════\n");
        for hit in &self.hits {
            out.push('\n');
            out.push_str(&format!("{}. {} (score: {:.3})\n", hit.rank, hit.title, hit.score));
            out.push_str("─────────────\n");
            if !hit.author.is_empty() {
                out.push_str(&format!("author: {}\n", hit.author));
            }
            if !hit.price.is_empty() {
                out.push_str(&format!("price: {}\n", hit.price));
            }
            if !hit.url.is_empty() {
                out.push_str(&format!("url: {}\n", hit.url));
            }
            out.push_str(&format!("{}\n", hit.highlighted_description));
        }
        out.push('\n');
        out.push_str(&format!("Total hits: {}\n", self.hits.len()));
        out.push_str(&format!("Search time: {}ms", self.duration_ms));
        out
    }
}

impl HumanOutput for IndexStats {
    fn render_human(&self) -> String {
        let mut out = String::new();
        out.push_str("Index Statistics:\n");
        out.push_str("════════════════\n");
        out.push_str(&format!("Path: {}\n", self.path));
        out.push_str(&format!("Total documents: {}\n", self.total_documents));
        out.push_str(&format!("Collection length: {}\n", self.collection_length));
        out.push_str(&format!("Vocabulary size: {}\n", self.vocabulary_size));
        out.push_str(&format!(
            "Average document length: {:.1}\n",
            self.average_document_length
        ));
        out.push_str(&format!("Index size: {}", format_bytes(self.index_size_bytes)));
        out
    }
}

impl HumanOutput for EvaluationReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for (i, query) in self.queries.iter().enumerate() {
            out.push_str(&format!("Query {}: {:?}\n", i + 1, query.query));
            out.push_str(&format!(
                "  Retrieved: {}, Relevant: {}\n",
                query.retrieved, query.relevant
            ));
            out.push_str(&format!("  Precision@{}: {:.3}\n", self.k, query.precision));
            for (j, title) in query.top_titles.iter().enumerate() {
                out.push_str(&format!("    {}. {title}\n", j + 1));
            }
            out.push('\n');
        }
        out.push_str("Summary:\n");
        out.push_str(&format!("  Total queries: {}\n", self.queries.len()));
        out.push_str(&format!(
            "  Mean Precision@{}: {:.3}\n",
            self.k, self.mean_precision
        ));
        out.push_str(&format!("  Avg relevant: {:.1}", self.mean_relevant));
        out
    }
}

/// Format bytes in human-readable format.
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::QueryEvaluation;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
    }

    #[test]
    fn test_search_results_human() {
        let results = SearchResults {
            query: "pixel".to_string(),
            hits: vec![SearchHit {
                rank: 1,
                score: -4.25,
                doc_no: "d1".to_string(),
                title: "Celeste".to_string(),
                author: "Maddy Thorson".to_string(),
                price: String::new(),
                url: String::new(),
                description: "pixel climbing".to_string(),
                highlighted_description: "<mark>pixel</mark> climbing".to_string(),
            }],
            duration_ms: 2,
        };

        let text = results.render_human();
        assert!(text.contains("1. Celeste (score: -4.250)"));
        assert!(text.contains("author: Maddy Thorson"));
        assert!(!text.contains("price:"));
        assert!(text.contains("<mark>pixel</mark> climbing"));

        let empty = SearchResults {
            query: "zzz".to_string(),
            hits: Vec::new(),
            duration_ms: 0,
        };
        assert!(empty.render_human().starts_with("No results"));
    }

    #[test]
    fn test_evaluation_human() {
        let report = EvaluationReport {
            k: 10,
            queries: vec![QueryEvaluation {
                query: "surreal puzzle".to_string(),
                retrieved: 4,
                relevant: 3,
                precision: 0.75,
                top_titles: vec!["OneShot".to_string()],
            }],
            mean_precision: 0.75,
            mean_relevant: 3.0,
        };

        let text = report.render_human();
        assert!(text.contains("Precision@10: 0.750"));
        assert!(text.contains("1. OneShot"));
        assert!(text.contains("Mean Precision@10: 0.750"));
    }

    #[test]
    fn test_render_json() {
        let stats = IndexStats {
            path: "games.idx".to_string(),
            total_documents: 2,
            collection_length: 7,
            vocabulary_size: 6,
            average_document_length: 3.5,
            index_size_bytes: 300,
        };
        let json = render_json(&stats, false).unwrap();
        assert!(json.contains("\"total_documents\":2"));
        assert!(render_json(&stats, true).unwrap().contains('\n'));
    }
}
