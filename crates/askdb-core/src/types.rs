//! Domain types shared by the index, scoring, and classification layers.

use serde::{Deserialize, Serialize};

pub type RecordId = String;

/// One question/answer entry of the knowledge base.
///
/// - `id`: opaque unique identifier assigned by the corpus source
/// - `question`: the text both similarity signals run over
/// - `answer`: returned verbatim when a query clears the answer threshold
/// - `tags`: comma-separated labels; the first becomes the reply context tag
///
/// Missing text fields deserialize to empty strings. A record is never
/// rejected for being incomplete; an empty question simply scores zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub tags: String,
}

/// Per-query scoring output for one record, before classification.
///
/// All three scores live in [0, 1]. `combined_score` is the weighted fusion
/// of the other two and is what ranking and thresholds operate on. Ephemeral;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: RecordId,
    pub question: String,
    pub answer: String,
    pub tags: String,
    pub cosine_score: f64,
    pub fuzzy_score: f64,
    pub combined_score: f64,
}

/// The minimal match surface carried by every reply tier.
///
/// `score` is the candidate's combined score rounded to three decimals for
/// the wire; full precision stays internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: RecordId,
    pub question: String,
    pub score: f64,
}

/// Browsing projection of a record, used by the FAQ listing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSummary {
    pub id: RecordId,
    pub question: String,
    pub tags: String,
}

/// Confidence-tiered reply to a query. Serializes with the tier name under
/// `"status"` and the tier's fields alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    Answered {
        answer: String,
        matches: Vec<MatchSummary>,
        context_tag: Option<String>,
    },
    Suggestions {
        suggestions: Vec<String>,
        matches: Vec<MatchSummary>,
    },
    NotUnderstood {
        suggestions: Vec<String>,
        matches: Vec<MatchSummary>,
    },
}
