//! Command implementations for the curio CLI.

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::analysis::normalizer::Normalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::converter::DocumentConverter;
use crate::document::converter::trec::TrecDocumentConverter;
use crate::error::{CurioError, Result};
use crate::evaluation::{evaluate, load_judgments};
use crate::index::inverted::InvertedIndex;
use crate::index::store::IndexStore;
use crate::index::writer::IndexWriter;
use crate::search::config::SearchConfig;
use crate::search::searcher::CatalogSearcher;

/// Execute a CLI command.
pub fn execute_command(args: CurioArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Index(index_args) => build_index(index_args, config, &args),
        Command::Search(search_args) => search_index(search_args, config, &args),
        Command::Evaluate(evaluate_args) => evaluate_index(evaluate_args, config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// The configuration file given on the command line, or the defaults.
fn load_config(args: &CurioArgs) -> Result<SearchConfig> {
    match &args.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            SearchConfig::from_file(path)
        }
        None => Ok(SearchConfig::default()),
    }
}

/// Build an index snapshot from a corpus.
fn build_index(args: &IndexArgs, config: SearchConfig, cli_args: &CurioArgs) -> Result<()> {
    if args.index_path.exists() && !args.force {
        return Err(CurioError::other(format!(
            "{} already exists. Use --force to overwrite.",
            args.index_path.display()
        )));
    }

    let start_time = Instant::now();
    let entries = TrecDocumentConverter::new().convert(&args.corpus)?;
    let mut writer = IndexWriter::new(Normalizer::from_source(&config.stopwords));
    let added = writer.add_entries(entries)?;
    log::info!("Read {added} entries from {}", args.corpus.display());
    let index = writer.finish();

    if let Some(parent) = args.index_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    index.save(&args.index_path)?;

    output_result(
        &IndexBuildResult {
            path: args.index_path.display().to_string(),
            documents: index.doc_count(),
            vocabulary_size: index.vocabulary_size(),
            collection_length: index.collection_length(),
            index_size_bytes: file_size(&args.index_path),
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Search the index.
fn search_index(args: &SearchArgs, mut config: SearchConfig, cli_args: &CurioArgs) -> Result<()> {
    if let Some(mu) = args.mu {
        config.mu = mu;
    }
    if args.parallel {
        config.parallel = true;
    }

    let start_time = Instant::now();
    let store = IndexStore::open(&args.index_path)?;
    let searcher = CatalogSearcher::new(store, config)?;
    let limit = args.limit.unwrap_or(searcher.config().default_limit);
    let hits = searcher.search(&args.query, limit)?;

    output_result(
        &SearchResults {
            query: args.query.clone(),
            hits,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Evaluate the index against keyword judgments.
fn evaluate_index(args: &EvaluateArgs, config: SearchConfig, cli_args: &CurioArgs) -> Result<()> {
    let judgments = load_judgments(&args.judgments)?;
    let store = IndexStore::open(&args.index_path)?;
    let searcher = CatalogSearcher::new(store, config)?;
    let k = args.limit.unwrap_or(searcher.config().default_limit);

    let report = evaluate(&searcher, &judgments, k)?;
    output_result(&report, cli_args)
}

/// Show index statistics.
fn show_stats(args: &StatsArgs, cli_args: &CurioArgs) -> Result<()> {
    let index = InvertedIndex::open(&args.index_path)?;
    let total_documents = index.doc_count();
    let average_document_length = if total_documents == 0 {
        0.0
    } else {
        index.collection_length() as f64 / total_documents as f64
    };

    output_result(
        &IndexStats {
            path: args.index_path.display().to_string(),
            total_documents,
            collection_length: index.collection_length(),
            vocabulary_size: index.vocabulary_size(),
            average_document_length,
            index_size_bytes: file_size(&args.index_path),
        },
        cli_args,
    )
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
