//! Fused two-signal scoring and ranking.

use askdb_core::config::RetrievalConfig;
use askdb_core::types::ScoredCandidate;
use askdb_index::Index;

/// Score `query` against every record in `index` and return the ranked
/// prefix.
///
/// Each record gets a tf-idf cosine over questions, a normalized
/// edit-distance ratio over the lowercased texts, and the weighted fusion of
/// the two. The sort is stable and descending on the combined score, so
/// equal scores keep corpus order. `top_k` is floored at 1; an empty index
/// yields an empty ranking.
pub fn rank(
    index: &Index,
    config: &RetrievalConfig,
    query: &str,
    top_k: usize,
) -> Vec<ScoredCandidate> {
    // Zero records or zero vocabulary both count as an empty index
    if index.is_empty() || index.vocabulary_size() == 0 {
        return vec![];
    }
    let cosine = index.cosine_scores(query);
    let query_folded = query.to_lowercase();

    let mut candidates: Vec<ScoredCandidate> = index
        .records()
        .iter()
        .zip(cosine)
        .map(|(record, cosine_score)| {
            let fuzzy_score =
                strsim::normalized_levenshtein(&query_folded, &record.question.to_lowercase());
            let combined_score =
                config.cosine_weight * cosine_score + config.fuzzy_weight * fuzzy_score;
            ScoredCandidate {
                id: record.id.clone(),
                question: record.question.clone(),
                answer: record.answer.clone(),
                tags: record.tags.clone(),
                cosine_score,
                fuzzy_score,
                combined_score,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(top_k.max(1));
    candidates
}
