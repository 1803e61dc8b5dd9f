//! Ranked keyword search over the catalog.
//!
//! [`searcher::CatalogSearcher`] ties the pieces together: it normalizes the
//! query, warms a per-call [`cache::StatsCache`], scores every live document
//! with [`scoring::QueryLikelihood`], keeps the best with
//! [`collector::TopDocsCollector`] and marks matches with
//! [`highlight::Highlighter`].

pub mod cache;
pub mod collector;
pub mod config;
pub mod highlight;
pub mod scoring;
pub mod searcher;

pub use config::SearchConfig;
pub use highlight::{HighlightConfig, Highlighter};
pub use searcher::{CatalogSearcher, SearchHit};
