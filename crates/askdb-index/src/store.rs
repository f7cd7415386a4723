//! Process-wide owner of the current index snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Result;
use tracing::info;

use askdb_core::traits::CorpusSource;
use askdb_core::types::Record;

use crate::index::Index;

/// Holds the one `Index` snapshot queries read.
///
/// Readers clone an `Arc` out and keep scoring against that snapshot even if
/// a rebuild lands mid-query; rebuilds construct the replacement outside the
/// lock and install it with a single pointer write. A query therefore always
/// sees a whole index, old or new, never a half-built one.
pub struct IndexStore {
    source: Box<dyn CorpusSource>,
    current: RwLock<Option<Arc<Index>>>,
}

impl IndexStore {
    pub fn new(source: Box<dyn CorpusSource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    /// The current snapshot, built from the corpus source on first use.
    pub fn current(&self) -> Result<Arc<Index>> {
        if let Some(index) = self.snapshot() {
            return Ok(index);
        }
        // First use builds under the write lock so concurrent callers wait
        // for one build instead of racing their own.
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }
        let records = self.source.fetch_all()?;
        let index = Arc::new(Index::build(records));
        info!(records = index.len(), "built initial index");
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Rebuild from the corpus source and swap the result in. Returns the
    /// number of records indexed.
    pub fn rebuild(&self) -> Result<usize> {
        let records = self.source.fetch_all()?;
        Ok(self.install(records))
    }

    /// Build from an explicit snapshot and swap it in, bypassing the source.
    pub fn rebuild_from(&self, records: Vec<Record>) -> usize {
        self.install(records)
    }

    fn install(&self, records: Vec<Record>) -> usize {
        // The build runs outside the lock; queries keep hitting the old
        // snapshot until the swap below.
        let index = Arc::new(Index::build(records));
        let count = index.len();
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(index);
        info!(records = count, "index snapshot swapped");
        count
    }

    fn snapshot(&self) -> Option<Arc<Index>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }
}
