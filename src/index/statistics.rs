//! The term statistics contract consumed by the search core.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::entry::CatalogEntry;
use crate::error::Result;

/// Opaque document identifier, valid only within the snapshot that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocRef(u32);

impl DocRef {
    /// Create a reference from a snapshot-internal id.
    pub fn new(id: u32) -> Self {
        DocRef(id)
    }

    /// The snapshot-internal id.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// The id as a vector index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Read-only access to per-document and corpus-wide term statistics.
///
/// One value of this trait is one snapshot: every call must answer from
/// the same point-in-time view. Terms are normalized terms (stems).
pub trait TermStatistics: Send + Sync + Debug {
    /// Number of terms in the document's searchable field.
    fn document_length(&self, doc: DocRef) -> Result<u64>;

    /// Occurrences of `term` in the document's searchable field.
    fn term_frequency(&self, doc: DocRef, term: &str) -> Result<u64>;

    /// Occurrences of `term` across all live documents.
    fn collection_frequency(&self, term: &str) -> Result<u64>;

    /// All live documents, in a stable enumeration order.
    fn live_documents(&self) -> Result<Vec<DocRef>>;

    /// The stored (display) fields of a document.
    fn stored_fields(&self, doc: DocRef) -> Result<CatalogEntry>;
}

/// Hands out one consistent statistics snapshot per search call.
pub trait SnapshotSource: Send + Sync {
    /// The snapshot to use for one call.
    fn snapshot(&self) -> Result<Arc<dyn TermStatistics>>;
}

/// A fixed provider is its own snapshot.
impl<T: TermStatistics + 'static> SnapshotSource for Arc<T> {
    fn snapshot(&self) -> Result<Arc<dyn TermStatistics>> {
        let snapshot: Arc<dyn TermStatistics> = self.clone();
        Ok(snapshot)
    }
}
