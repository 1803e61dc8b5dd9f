//! Term statistics providers and the catalog index.
//!
//! Search code never touches postings directly. It reads everything it
//! needs through [`TermStatistics`], obtained per call from a
//! [`SnapshotSource`] so that one search sees one consistent view:
//!
//! - [`inverted::InvertedIndex`]: the production provider, built by
//!   [`writer::IndexWriter`] and persisted with [`snapshot`]
//! - [`store::IndexStore`]: a reloadable holder of the current snapshot
//! - [`memory::MemoryStatistics`]: hand-specified statistics for tests

pub mod inverted;
pub mod memory;
pub mod snapshot;
pub mod statistics;
pub mod store;
pub mod writer;

pub use inverted::InvertedIndex;
pub use statistics::{DocRef, SnapshotSource, TermStatistics};
pub use store::IndexStore;
pub use writer::IndexWriter;
