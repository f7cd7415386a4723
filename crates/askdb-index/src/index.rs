//! The immutable tf-idf index snapshot.
//!
//! Built in one shot from a full corpus snapshot and never mutated
//! afterwards; a rebuild produces a fresh `Index` that replaces the old one
//! wholesale (see `store`). Only the `question` field of a record is
//! vectorized.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use askdb_core::types::Record;

use crate::tokenize::tokenize;

/// Sparse tf-idf vector: `(dimension, weight)` pairs sorted by dimension,
/// with the L2 norm precomputed at construction.
#[derive(Debug, Clone, Default)]
pub struct SparseVector {
    dims: Vec<(usize, f64)>,
    norm: f64,
}

impl SparseVector {
    fn from_weights(mut dims: Vec<(usize, f64)>) -> Self {
        dims.retain(|&(_, weight)| weight != 0.0);
        dims.sort_unstable_by_key(|&(dim, _)| dim);
        let norm = dims.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        Self { dims, norm }
    }

    pub fn is_zero(&self) -> bool {
        self.norm == 0.0
    }

    /// Cosine similarity, defined as 0 whenever either side is a zero
    /// vector. The result is clamped into [0, 1] against float drift.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        let mut dot = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.dims.len() && j < other.dims.len() {
            match self.dims[i].0.cmp(&other.dims[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += self.dims[i].1 * other.dims[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        (dot / (self.norm * other.norm)).clamp(0.0, 1.0)
    }
}

/// Vocabulary, per-record vectors, and the records the vectors align with.
///
/// `vectors[i]` is always the embedding of `records[i]`. The idf weighting
/// is the textbook `ln(corpus_size / document_frequency)`: a term present in
/// every record weighs zero.
#[derive(Debug, Default)]
pub struct Index {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
    records: Vec<Record>,
}

impl Index {
    /// Vectorize a full corpus snapshot. An empty snapshot builds the empty
    /// index; records with unusable questions get zero vectors. Never fails.
    pub fn build(records: Vec<Record>) -> Self {
        if records.is_empty() {
            debug!("built empty index");
            return Self::default();
        }
        let tokenized: Vec<Vec<String>> = records
            .iter()
            .map(|r| tokenize(&r.question))
            .collect();

        // Dimensions are assigned in first-appearance order so identical
        // corpora produce identical indexes.
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for terms in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in terms {
                if !seen.insert(term.as_str()) {
                    continue;
                }
                if let Some(&dim) = vocabulary.get(term) {
                    document_frequency[dim] += 1;
                } else {
                    vocabulary.insert(term.clone(), document_frequency.len());
                    document_frequency.push(1);
                }
            }
        }

        let corpus_size = records.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| (corpus_size / df as f64).ln())
            .collect();

        let vectors: Vec<SparseVector> = tokenized
            .iter()
            .map(|terms| Self::weigh(&vocabulary, &idf, terms))
            .collect();

        debug!(
            records = records.len(),
            terms = vocabulary.len(),
            "built tf-idf index"
        );

        Self {
            vocabulary,
            idf,
            vectors,
            records,
        }
    }

    /// Project free text into this index's vector space with the build-time
    /// weighting. Terms outside the vocabulary contribute nothing.
    pub fn embed(&self, text: &str) -> SparseVector {
        Self::weigh(&self.vocabulary, &self.idf, &tokenize(text))
    }

    fn weigh(vocabulary: &HashMap<String, usize>, idf: &[f64], terms: &[String]) -> SparseVector {
        let mut term_counts: HashMap<usize, f64> = HashMap::new();
        for term in terms {
            if let Some(&dim) = vocabulary.get(term) {
                *term_counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }
        SparseVector::from_weights(
            term_counts
                .into_iter()
                .map(|(dim, count)| (dim, count * idf[dim]))
                .collect(),
        )
    }

    /// Cosine similarity of `text` against every record, aligned with
    /// `records()` by position.
    pub fn cosine_scores(&self, text: &str) -> Vec<f64> {
        let query = self.embed(text);
        self.vectors.iter().map(|v| query.cosine(v)).collect()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
