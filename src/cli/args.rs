//! Command line argument parsing for the curio CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Curio - ranked keyword search over a catalog of creative works
#[derive(Parser, Debug, Clone)]
#[command(name = "curio")]
#[command(about = "Ranked keyword search over a catalog of creative works")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CurioArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Search configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CurioArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=verbose, 3+=debug)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index snapshot from a TREC-text corpus
    Index(IndexArgs),

    /// Search an index
    Search(SearchArgs),

    /// Measure precision against keyword judgments
    Evaluate(EvaluateArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// TREC-text corpus file
    #[arg(value_name = "TRECTEXT")]
    pub corpus: PathBuf,

    /// Path of the index snapshot to write
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    /// Overwrite an existing snapshot
    #[arg(long)]
    pub force: bool,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Path of the index snapshot
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Dirichlet smoothing constant
    #[arg(long)]
    pub mu: Option<f64>,

    /// Enable parallel search processing
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Path of the index snapshot
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    /// JSON file with `[{ "query": ..., "keywords": [...] }]`
    #[arg(value_name = "JUDGMENTS_JSON")]
    pub judgments: PathBuf,

    /// Results per query
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path of the index snapshot
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_command() {
        let args =
            CurioArgs::try_parse_from(["curio", "index", "games.trectext", "games.idx", "--force"])
                .unwrap();

        match args.command {
            Command::Index(index_args) => {
                assert_eq!(index_args.corpus, PathBuf::from("games.trectext"));
                assert_eq!(index_args.index_path, PathBuf::from("games.idx"));
                assert!(index_args.force);
            }
            _ => panic!("Expected Index command"),
        }
    }

    #[test]
    fn test_search_command() {
        let args = CurioArgs::try_parse_from([
            "curio",
            "--format",
            "json",
            "search",
            "games.idx",
            "pixel adventure",
            "-l",
            "5",
            "--mu",
            "500",
            "--parallel",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Search(search_args) => {
                assert_eq!(search_args.query, "pixel adventure");
                assert_eq!(search_args.limit, Some(5));
                assert_eq!(search_args.mu, Some(500.0));
                assert!(search_args.parallel);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_evaluate_and_stats_commands() {
        let args =
            CurioArgs::try_parse_from(["curio", "evaluate", "games.idx", "judgments.json"]).unwrap();
        assert!(matches!(args.command, Command::Evaluate(_)));

        let args = CurioArgs::try_parse_from(["curio", "-c", "curio.json", "stats", "games.idx"])
            .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("curio.json")));
        assert!(matches!(args.command, Command::Stats(_)));
    }

    #[test]
    fn test_verbosity() {
        let parse = |extra: &[&str]| {
            let mut argv = vec!["curio"];
            argv.extend_from_slice(extra);
            argv.extend_from_slice(&["stats", "games.idx"]);
            CurioArgs::try_parse_from(argv).unwrap().verbosity()
        };

        assert_eq!(parse(&[]), 1);
        assert_eq!(parse(&["-v"]), 2);
        assert_eq!(parse(&["-vv"]), 3);
        assert_eq!(parse(&["-q", "-vv"]), 0);
    }

    #[test]
    fn test_missing_arguments() {
        assert!(CurioArgs::try_parse_from(["curio", "search", "games.idx"]).is_err());
        assert!(CurioArgs::try_parse_from(["curio"]).is_err());
    }
}
