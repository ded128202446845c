//! Composite relevance scoring
//!
//! A result's score starts from the guide's base relevance, adds a weight per
//! matched field, a bonus for early title hits and an inverse document
//! frequency bonus per match, then scales by how many distinct query terms
//! matched. Everything accumulates as `f64` and is rounded once at the end.

use super::{SearchField, SearchMatch};
use crate::index::{GuideIndex, IndexEntry};
use std::collections::HashSet;

/// Title hits earlier than this many characters earn a position bonus
pub const TITLE_POSITION_WINDOW: i64 = 20;

/// Multiplier on the natural-log IDF bonus
pub const IDF_WEIGHT: f64 = 5.0;

/// Maximum extra multiplier when every query term matched
pub const COMPLETENESS_WEIGHT: f64 = 0.5;

impl SearchField {
    /// Points awarded for a match in this field
    pub fn weight(&self) -> f64 {
        match self {
            SearchField::Title => 50.0,
            SearchField::Category => 30.0,
            SearchField::Severity => 20.0,
            SearchField::Content => 10.0,
        }
    }
}

/// Bonus for a title match at `position`; nothing when the term was not found
/// literally
pub fn title_position_bonus(position: i64) -> f64 {
    if position < 0 {
        return 0.0;
    }
    (TITLE_POSITION_WINDOW - position).max(0) as f64
}

/// IDF-style bonus for a term present in `document_frequency` of `index_size`
/// guides. Zero frequencies are clamped to one; an empty index gives no bonus.
pub fn idf_bonus(index_size: usize, document_frequency: usize) -> f64 {
    if index_size == 0 {
        return 0.0;
    }
    let df = document_frequency.max(1) as f64;
    (index_size as f64 / df).ln() * IDF_WEIGHT
}

/// Fraction of query terms that produced at least one match
pub fn completeness(matches: &[SearchMatch], query_terms: &[String]) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let matched: HashSet<&str> = matches.iter().map(|m| m.term.as_str()).collect();
    matched.len() as f64 / query_terms.len() as f64
}

/// Score a guide's matches against the query
pub fn score_matches(
    matches: &[SearchMatch],
    entry: &IndexEntry,
    query_terms: &[String],
    index: &GuideIndex,
) -> i64 {
    let index_size = index.index_size();
    let mut score = entry.base_relevance_score;

    for m in matches {
        score += m.field.weight();

        if m.field == SearchField::Title {
            score += title_position_bonus(m.position);
        }

        score += idf_bonus(index_size, index.document_frequency(&m.term));
    }

    score *= 1.0 + completeness(matches, query_terms) * COMPLETENESS_WEIGHT;

    score.round() as i64
}
