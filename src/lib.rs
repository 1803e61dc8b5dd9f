//! # Curio
//!
//! Ranked keyword search over a catalog of creative works.
//!
//! ## Features
//!
//! - Tokenize, stop-word and Porter-stem pipeline shared by indexing and search
//! - Dirichlet-smoothed query-likelihood ranking over raw term statistics
//! - Stem-aware highlighting that preserves the original text
//! - Checksummed, reloadable index snapshots
//! - TREC-text corpus ingestion and a precision@k evaluator
//!
//! ```
//! use std::sync::Arc;
//!
//! use curio::prelude::*;
//!
//! let mut writer = IndexWriter::new(Normalizer::default());
//! writer.add_entry(CatalogEntry::new("1").with_title("Minit").with_description("A time-loop adventure")).unwrap();
//!
//! let searcher = CatalogSearcher::new(Arc::new(writer.finish()), SearchConfig::default()).unwrap();
//! let hits = searcher.search("adventures", 10).unwrap();
//! assert_eq!(hits[0].title, "Minit");
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod evaluation;
pub mod index;
pub mod search;

pub mod prelude {
    pub use crate::analysis::Normalizer;
    pub use crate::document::CatalogEntry;
    pub use crate::error::{CurioError, Result};
    pub use crate::index::{IndexStore, IndexWriter, InvertedIndex, SnapshotSource, TermStatistics};
    pub use crate::search::{CatalogSearcher, SearchConfig, SearchHit};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
