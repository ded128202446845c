//! Ranked guide search

pub mod scoring;

use crate::fuzzy::fuzzy_match;
use crate::index::{GuideIndex, IndexEntry};
use crate::models::{Category, Guide, Severity};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

pub use scoring::score_matches;

/// Field a query term matched in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Category,
    Severity,
    Content,
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::Title => "title",
            SearchField::Category => "category",
            SearchField::Severity => "severity",
            SearchField::Content => "content",
        };
        f.write_str(name)
    }
}

/// One query term matched against one field of a guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub field: SearchField,
    pub term: String,
    /// Character offset within the lowercased title for title matches
    /// (-1 when the term only matched fuzzily), 0 for other fields.
    /// Offsets count Unicode scalar values, so an astral-plane character
    /// such as an emoji counts as one, not as two UTF-16 units.
    pub position: i64,
}

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched guide
    pub document: Guide,
    /// Composite relevance score
    pub score: i64,
    /// Supporting matches, in query term order
    pub matches: Vec<SearchMatch>,
}

/// Search options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of results
    pub limit: usize,
    /// Drop results scoring below this
    pub min_score: Option<i64>,
    /// Only guides in this category
    pub category: Option<Category>,
    /// Only guides at or above this severity
    pub min_severity: Option<Severity>,
    /// Only guides available offline
    pub offline_only: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: 20,
            min_score: None,
            category: None,
            min_severity: None,
            offline_only: false,
        }
    }
}

impl SearchOptions {
    fn accepts(&self, result: &SearchResult) -> bool {
        let guide = &result.document;

        if self.category.is_some_and(|c| guide.category != c) {
            return false;
        }
        if self.min_severity.is_some_and(|s| guide.severity < s) {
            return false;
        }
        if self.offline_only && !guide.is_offline_available {
            return false;
        }
        if self.min_score.is_some_and(|min| result.score < min) {
            return false;
        }
        true
    }
}

/// Searcher over a built [`GuideIndex`]
pub struct Searcher<'a> {
    index: &'a GuideIndex,
}

impl<'a> Searcher<'a> {
    /// Create a new searcher
    pub fn new(index: &'a GuideIndex) -> Self {
        Searcher { index }
    }

    /// Rank `guides` against `query`, best first
    ///
    /// `guides` should be the corpus the index was built from; guides without
    /// an index entry are skipped. Ties keep their input order.
    pub fn search(&self, query: &str, guides: &[Guide]) -> Vec<SearchResult> {
        let query_terms = tokenize(query);

        if query_terms.is_empty() {
            return Vec::new();
        }

        let start = Instant::now();

        let mut results: Vec<SearchResult> = guides
            .iter()
            .filter_map(|guide| {
                let entry = self.index.entry(&guide.id)?;
                let matches = match_entry(entry, &query_terms);

                if matches.is_empty() {
                    return None;
                }

                let score = score_matches(&matches, entry, &query_terms, self.index);
                Some(SearchResult {
                    document: guide.clone(),
                    score,
                    matches,
                })
            })
            .collect();

        // Stable, so equal scores keep corpus order
        results.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(
            query,
            terms = query_terms.len(),
            results = results.len(),
            "Search completed in {:?}",
            start.elapsed()
        );

        results
    }

    /// Search, then filter and truncate according to `options`
    pub fn search_with_options(
        &self,
        query: &str,
        guides: &[Guide],
        options: &SearchOptions,
    ) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .search(query, guides)
            .into_iter()
            .filter(|r| options.accepts(r))
            .collect();
        results.truncate(options.limit);
        results
    }
}

/// Match every query term against one entry
///
/// Per term, in order: exact term-set membership (content), fuzzy title,
/// fuzzy category, exact severity. A term may match several fields.
pub fn match_entry(entry: &IndexEntry, query_terms: &[String]) -> Vec<SearchMatch> {
    let mut matches = Vec::new();

    for term in query_terms {
        if entry.terms.contains(term) {
            matches.push(SearchMatch {
                field: SearchField::Content,
                term: term.clone(),
                position: 0,
            });
        }

        if fuzzy_match(term, &entry.title) {
            matches.push(SearchMatch {
                field: SearchField::Title,
                term: term.clone(),
                position: title_position(&entry.title, term),
            });
        }

        if fuzzy_match(term, &entry.category) {
            matches.push(SearchMatch {
                field: SearchField::Category,
                term: term.clone(),
                position: 0,
            });
        }

        if *term == entry.severity {
            matches.push(SearchMatch {
                field: SearchField::Severity,
                term: term.clone(),
                position: 0,
            });
        }
    }

    matches
}

/// Character offset of `term` in the lowercased title, or -1
fn title_position(title: &str, term: &str) -> i64 {
    let lowered = title.to_lowercase();
    match lowered.find(term) {
        Some(byte_offset) => lowered[..byte_offset].chars().count() as i64,
        None => -1,
    }
}
