use crate::types::{FaqSummary, Record, Reply, ScoredCandidate};

pub trait CorpusSource: Send + Sync {
    fn fetch_all(&self) -> anyhow::Result<Vec<Record>>;
}

pub trait AnswerEngine: Send + Sync {
    fn ask(&self, text: &str) -> anyhow::Result<Reply>;
    fn rank(&self, text: &str, top_k: usize) -> anyhow::Result<Vec<ScoredCandidate>>;
    fn reindex(&self) -> anyhow::Result<usize>;
    fn faq_suggestions(&self, limit: usize) -> anyhow::Result<Vec<FaqSummary>>;
}
