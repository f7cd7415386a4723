//! Confidence tiers over a ranked candidate list.
//!
//! Thresholds are inclusive at the lower bound: a best score of exactly the
//! answer threshold answers, exactly the suggest threshold suggests.
//! Classification reads full-precision scores; only the match summaries on
//! the wire are rounded.

use askdb_core::config::RetrievalConfig;
use askdb_core::types::{MatchSummary, Reply, ScoredCandidate};

/// Collapse ranked candidates into a tiered reply.
pub fn classify(ranked: &[ScoredCandidate], config: &RetrievalConfig) -> Reply {
    let Some(best) = ranked.first() else {
        return Reply::NotUnderstood {
            suggestions: vec![],
            matches: vec![],
        };
    };
    let matches = summaries(ranked);

    if best.combined_score >= config.answer_threshold {
        return Reply::Answered {
            answer: best.answer.clone(),
            matches,
            context_tag: context_tag(&best.tags),
        };
    }
    if best.combined_score >= config.suggest_threshold {
        let suggestions = ranked
            .iter()
            .take(config.max_suggestions)
            .map(|c| c.question.clone())
            .collect();
        return Reply::Suggestions {
            suggestions,
            matches,
        };
    }
    // Low confidence still surfaces everything that was ranked
    let suggestions = ranked.iter().map(|c| c.question.clone()).collect();
    Reply::NotUnderstood {
        suggestions,
        matches,
    }
}

fn summaries(ranked: &[ScoredCandidate]) -> Vec<MatchSummary> {
    ranked
        .iter()
        .map(|c| MatchSummary {
            id: c.id.clone(),
            question: c.question.clone(),
            score: round_score(c.combined_score),
        })
        .collect()
}

/// Three-decimal presentation rounding for wire scores.
fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// First comma-separated token of `tags`, if non-empty.
fn context_tag(tags: &str) -> Option<String> {
    match tags.split(',').next() {
        None | Some("") => None,
        Some(first) => Some(first.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, combined_score: f64) -> ScoredCandidate {
        ScoredCandidate {
            id: id.to_string(),
            question: format!("question {id}"),
            answer: format!("answer {id}"),
            tags: "primary,secondary".to_string(),
            cosine_score: combined_score,
            fuzzy_score: combined_score,
            combined_score,
        }
    }

    #[test]
    fn test_exact_answer_threshold_answers() {
        let ranked = vec![candidate("1", 0.65), candidate("2", 0.2)];
        let reply = classify(&ranked, &RetrievalConfig::default());

        match reply {
            Reply::Answered {
                answer,
                matches,
                context_tag,
            } => {
                assert_eq!(answer, "answer 1");
                assert_eq!(matches.len(), 2);
                assert_eq!(context_tag.as_deref(), Some("primary"));
            }
            other => panic!("expected answered, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_suggest_threshold_suggests() {
        let ranked = vec![
            candidate("1", 0.40),
            candidate("2", 0.39),
            candidate("3", 0.38),
            candidate("4", 0.37),
        ];
        let reply = classify(&ranked, &RetrievalConfig::default());

        match reply {
            Reply::Suggestions {
                suggestions,
                matches,
            } => {
                assert_eq!(suggestions.len(), 3, "suggestions are capped");
                assert_eq!(suggestions[0], "question 1");
                assert_eq!(matches.len(), 4, "matches keep the full ranked list");
            }
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn test_just_below_suggest_is_not_understood() {
        let ranked = vec![candidate("1", 0.3999), candidate("2", 0.1)];
        let reply = classify(&ranked, &RetrievalConfig::default());

        match reply {
            Reply::NotUnderstood {
                suggestions,
                matches,
            } => {
                assert_eq!(suggestions.len(), 2, "low confidence surfaces every ranked question");
                assert_eq!(matches.len(), 2);
            }
            other => panic!("expected not_understood, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_ranking_is_not_understood_with_nothing() {
        let reply = classify(&[], &RetrievalConfig::default());

        assert_eq!(
            reply,
            Reply::NotUnderstood {
                suggestions: vec![],
                matches: vec![],
            }
        );
    }

    #[test]
    fn test_context_tag_takes_first_token() {
        assert_eq!(context_tag("soporte,horario").as_deref(), Some("soporte"));
        assert_eq!(context_tag("pagos").as_deref(), Some("pagos"));
        assert_eq!(context_tag(""), None);
        assert_eq!(context_tag(",legal").as_deref(), None);
    }

    #[test]
    fn test_wire_scores_are_rounded_to_three_decimals() {
        let ranked = vec![candidate("1", 0.654_321)];
        let reply = classify(&ranked, &RetrievalConfig::default());

        match reply {
            Reply::Answered { matches, .. } => {
                assert!((matches[0].score - 0.654).abs() < 1e-12);
            }
            other => panic!("expected answered, got {other:?}"),
        }
    }
}
