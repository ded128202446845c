//! In-memory guide index
//!
//! [`GuideIndex`] owns the per-guide [`IndexEntry`] map and the
//! document-frequency table. Every build replaces both wholesale; there is no
//! incremental update path.

use crate::models::Guide;
use crate::tokenizer::tokenize;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Reviews newer than this many days earn the recency bonus
pub const REVIEW_WINDOW_DAYS: i64 = 90;

/// Bonus for guides usable without a network connection
pub const OFFLINE_BONUS: f64 = 10.0;

/// Bonus for recently reviewed guides
pub const RECENT_REVIEW_BONUS: f64 = 10.0;

/// Views per popularity point
pub const VIEWS_PER_POINT: f64 = 100.0;

/// Cap on the popularity contribution
pub const MAX_POPULARITY_BONUS: f64 = 20.0;

/// Searchable representation of one guide
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Guide ID
    pub id: String,
    /// Unique lowercase terms extracted from the guide
    pub terms: HashSet<String>,
    /// Original title, matched fuzzily
    pub title: String,
    /// Category wire name, matched fuzzily
    pub category: String,
    /// Severity wire name, matched exactly
    pub severity: String,
    /// Query-independent score component
    pub base_relevance_score: f64,
}

/// Statistics from a build
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of guides passed in
    pub guides_received: usize,
    /// Number of entries in the index afterwards
    pub guides_indexed: usize,
    /// Guides that replaced an earlier guide with the same ID
    pub duplicates_replaced: usize,
    /// Distinct terms in the frequency table
    pub unique_terms: usize,
    /// Time taken
    pub duration: Duration,
}

/// Guide index: entries keyed by guide ID plus a document-frequency table
#[derive(Debug, Clone, Default)]
pub struct GuideIndex {
    entries: HashMap<String, IndexEntry>,
    document_frequency: HashMap<String, usize>,
}

impl GuideIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index already built from `guides`
    pub fn from_guides(guides: &[Guide]) -> Self {
        let mut index = Self::new();
        index.build_index(guides);
        index
    }

    /// Rebuild the index from scratch using the current time for review recency
    pub fn build_index(&mut self, guides: &[Guide]) -> IndexStats {
        self.build_index_at(guides, Utc::now())
    }

    /// Rebuild the index from scratch, judging review recency against `now`
    pub fn build_index_at(&mut self, guides: &[Guide], now: DateTime<Utc>) -> IndexStats {
        let start = Instant::now();
        let mut stats = IndexStats {
            guides_received: guides.len(),
            ..Default::default()
        };

        self.clear_index();

        for guide in guides {
            let entry = IndexEntry {
                id: guide.id.clone(),
                terms: extract_terms(guide),
                title: guide.title.clone(),
                category: guide.category.as_str().to_string(),
                severity: guide.severity.as_str().to_string(),
                base_relevance_score: base_relevance_score(guide, now),
            };

            for term in &entry.terms {
                *self.document_frequency.entry(term.clone()).or_insert(0) += 1;
            }

            if let Some(replaced) = self.entries.insert(guide.id.clone(), entry) {
                tracing::warn!("Duplicate guide id '{}', keeping the later guide", guide.id);
                stats.duplicates_replaced += 1;
                self.withdraw_terms(&replaced.terms);
            }
        }

        stats.guides_indexed = self.entries.len();
        stats.unique_terms = self.document_frequency.len();
        stats.duration = start.elapsed();

        tracing::info!(
            guides = stats.guides_indexed,
            terms = stats.unique_terms,
            "Built guide index in {:?}",
            stats.duration
        );

        stats
    }

    /// Remove every entry and frequency count
    pub fn clear_index(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!("Clearing {} index entries", self.entries.len());
        }
        self.entries.clear();
        self.document_frequency.clear();
    }

    /// Number of indexed guides
    pub fn index_size(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no guides
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct terms in the frequency table
    pub fn term_count(&self) -> usize {
        self.document_frequency.len()
    }

    /// Entry for a guide ID
    pub fn entry(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// Number of indexed guides whose term set contains `term`
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Iterate over `(term, document frequency)` pairs in arbitrary order
    pub fn term_frequencies(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.document_frequency
            .iter()
            .map(|(term, count)| (term.as_str(), *count))
    }

    fn withdraw_terms(&mut self, terms: &HashSet<String>) {
        for term in terms {
            if let Some(count) = self.document_frequency.get_mut(term) {
                *count -= 1;
                if *count == 0 {
                    self.document_frequency.remove(term);
                }
            }
        }
    }
}

/// Unique terms of a guide: tokens of every text field plus the literal
/// category and severity names
pub fn extract_terms(guide: &Guide) -> HashSet<String> {
    let texts = [guide.title.as_str(), guide.summary.as_str()]
        .into_iter()
        .chain(guide.search_tags.iter().map(String::as_str))
        .chain(guide.content.texts());

    let mut terms: HashSet<String> = texts.flat_map(tokenize).collect();
    terms.insert(guide.category.as_str().to_string());
    terms.insert(guide.severity.as_str().to_string());
    terms
}

/// Query-independent relevance of a guide as of `now`
///
/// Severity weight, plus offline and recent-review bonuses, plus one point
/// per hundred views capped at [`MAX_POPULARITY_BONUS`]. Not rounded.
pub fn base_relevance_score(guide: &Guide, now: DateTime<Utc>) -> f64 {
    let mut score = guide.severity.weight();

    if guide.is_offline_available {
        score += OFFLINE_BONUS;
    }

    if let Some(raw) = guide.last_reviewed_at.as_deref() {
        match parse_review_date(raw) {
            Some(reviewed) if is_recent_review(reviewed, now) => score += RECENT_REVIEW_BONUS,
            Some(_) => {}
            None => tracing::debug!("Ignoring unparseable review date '{}' on {}", raw, guide.id),
        }
    }

    score += (guide.view_count as f64 / VIEWS_PER_POINT).min(MAX_POPULARITY_BONUS);

    score
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_review_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn is_recent_review(reviewed: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(reviewed) <= chrono::Duration::days(REVIEW_WINDOW_DAYS)
}
