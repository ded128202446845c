//! Popular terms and prefix autocomplete from the document-frequency table

use crate::index::GuideIndex;
use serde::{Deserialize, Serialize};

/// A term with the number of guides containing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub term: String,
    pub frequency: usize,
}

impl GuideIndex {
    /// Most widespread terms, highest document frequency first
    ///
    /// Equal frequencies are ordered alphabetically. A `limit` larger than the
    /// table returns every term.
    pub fn top_search_terms(&self, limit: usize) -> Vec<TermFrequency> {
        let mut terms: Vec<(&str, usize)> = self.term_frequencies().collect();
        sort_by_frequency(&mut terms);

        terms
            .into_iter()
            .take(limit)
            .map(|(term, frequency)| TermFrequency {
                term: term.to_string(),
                frequency,
            })
            .collect()
    }

    /// Indexed terms extending `partial_query`, highest document frequency first
    ///
    /// The partial query is lowercased; the term equal to it is not suggested.
    pub fn suggested_searches(&self, partial_query: &str, limit: usize) -> Vec<String> {
        let prefix = partial_query.to_lowercase();

        let mut candidates: Vec<(&str, usize)> = self
            .term_frequencies()
            .filter(|(term, _)| term.starts_with(&prefix) && *term != prefix)
            .collect();
        sort_by_frequency(&mut candidates);

        candidates
            .into_iter()
            .take(limit)
            .map(|(term, _)| term.to_string())
            .collect()
    }
}

fn sort_by_frequency(terms: &mut [(&str, usize)]) {
    terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
}
