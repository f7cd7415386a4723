//! askdb-hybrid
//!
//! The answering engine: fused tf-idf + edit-distance ranking over the
//! current index snapshot, classified into confidence tiers. See the `rank`
//! and `classify` modules for the two halves.

use anyhow::Result;
use tracing::debug;

use askdb_core::config::RetrievalConfig;
use askdb_core::traits::{AnswerEngine, CorpusSource};
use askdb_core::types::{FaqSummary, Record, Reply, ScoredCandidate};
use askdb_index::IndexStore;

pub mod classify;
pub mod rank;

pub use classify::classify;
pub use rank::rank;

pub struct AskEngine {
    store: IndexStore,
    config: RetrievalConfig,
}

impl AskEngine {
    /// Build an engine over a corpus source. Invalid retrieval knobs fail
    /// here, before any query runs.
    pub fn new(source: Box<dyn CorpusSource>, config: RetrievalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: IndexStore::new(source),
            config,
        })
    }

    /// Answer a free-text question with a confidence-tiered reply.
    pub fn ask(&self, text: &str) -> Result<Reply> {
        let ranked = self.rank(text, self.config.top_k)?;
        let reply = classify(&ranked, &self.config);
        debug!(candidates = ranked.len(), "classified query");
        Ok(reply)
    }

    /// Ranked candidates for a query, without classification.
    pub fn rank(&self, text: &str, top_k: usize) -> Result<Vec<ScoredCandidate>> {
        let index = self.store.current()?;
        Ok(rank::rank(&index, &self.config, text, top_k))
    }

    /// Rebuild the index from the corpus source. Returns records indexed.
    pub fn reindex(&self) -> Result<usize> {
        self.store.rebuild()
    }

    /// Build the index from an explicit record snapshot, bypassing the
    /// corpus source. Returns records indexed.
    pub fn build_index(&self, records: Vec<Record>) -> usize {
        self.store.rebuild_from(records)
    }

    /// The first `limit` records as browsing summaries.
    pub fn faq_suggestions(&self, limit: usize) -> Result<Vec<FaqSummary>> {
        let index = self.store.current()?;
        Ok(index
            .records()
            .iter()
            .take(limit)
            .map(|r| FaqSummary {
                id: r.id.clone(),
                question: r.question.clone(),
                tags: r.tags.clone(),
            })
            .collect())
    }
}

impl AnswerEngine for AskEngine {
    fn ask(&self, text: &str) -> Result<Reply> {
        Self::ask(self, text)
    }
    fn rank(&self, text: &str, top_k: usize) -> Result<Vec<ScoredCandidate>> {
        Self::rank(self, text, top_k)
    }
    fn reindex(&self) -> Result<usize> {
        Self::reindex(self)
    }
    fn faq_suggestions(&self, limit: usize) -> Result<Vec<FaqSummary>> {
        Self::faq_suggestions(self, limit)
    }
}
