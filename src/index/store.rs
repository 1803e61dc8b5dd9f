//! A reloadable holder for the current index snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::index::inverted::InvertedIndex;
use crate::index::statistics::{SnapshotSource, TermStatistics};

/// Serves the most recently loaded [`InvertedIndex`].
///
/// Each [`snapshot`](SnapshotSource::snapshot) hands out an `Arc` to the
/// index current at that moment. A concurrent [`reload`](IndexStore::reload)
/// swaps the pointer without disturbing searches already holding the old one.
#[derive(Debug)]
pub struct IndexStore {
    path: Option<PathBuf>,
    current: RwLock<Arc<InvertedIndex>>,
}

impl IndexStore {
    /// Open the snapshot file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let index = InvertedIndex::open(&path)?;
        Ok(IndexStore {
            path: Some(path),
            current: RwLock::new(Arc::new(index)),
        })
    }

    /// Serve an index that has no backing file.
    pub fn from_index(index: InvertedIndex) -> Self {
        IndexStore {
            path: None,
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The index currently being served.
    pub fn current(&self) -> Arc<InvertedIndex> {
        Arc::clone(&self.current.read())
    }

    /// Re-read the backing file and start serving it.
    ///
    /// On failure the previous index keeps being served. A store without a
    /// backing file is left unchanged.
    pub fn reload(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let index = InvertedIndex::open(path)?;
        self.replace(index);
        Ok(())
    }

    /// Start serving `index`.
    pub fn replace(&self, index: InvertedIndex) {
        *self.current.write() = Arc::new(index);
    }
}

impl SnapshotSource for IndexStore {
    fn snapshot(&self) -> Result<Arc<dyn TermStatistics>> {
        let snapshot: Arc<dyn TermStatistics> = self.current();
        Ok(snapshot)
    }
}
