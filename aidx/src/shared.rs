//! Thread-safe handle to a guide index
//!
//! Readers take a shared lock. A rebuild constructs the new index without
//! holding any lock and swaps it in under the write lock, so a search never
//! sees a partially built index.

use crate::index::{GuideIndex, IndexStats};
use crate::models::Guide;
use crate::search::{SearchOptions, SearchResult, Searcher};
use crate::suggest::TermFrequency;
use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Cloneable, shareable guide index
#[derive(Debug, Clone, Default)]
pub struct SharedGuideIndex {
    inner: Arc<RwLock<GuideIndex>>,
}

impl SharedGuideIndex {
    /// Create an empty shared index
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already built index
    pub fn from_index(index: GuideIndex) -> Self {
        SharedGuideIndex {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Replace the index with one built from `guides`
    pub fn rebuild(&self, guides: &[Guide]) -> IndexStats {
        self.rebuild_at(guides, Utc::now())
    }

    /// Replace the index with one built from `guides`, judging review recency
    /// against `now`
    pub fn rebuild_at(&self, guides: &[Guide], now: DateTime<Utc>) -> IndexStats {
        let mut fresh = GuideIndex::new();
        let stats = fresh.build_index_at(guides, now);
        *self.inner.write() = fresh;
        stats
    }

    /// Empty the index
    pub fn clear(&self) {
        self.inner.write().clear_index();
    }

    /// Number of indexed guides
    pub fn index_size(&self) -> usize {
        self.inner.read().index_size()
    }

    /// Ranked search, see [`Searcher::search`]
    pub fn search(&self, query: &str, guides: &[Guide]) -> Vec<SearchResult> {
        let index = self.inner.read();
        Searcher::new(&index).search(query, guides)
    }

    /// Filtered search, see [`Searcher::search_with_options`]
    pub fn search_with_options(
        &self,
        query: &str,
        guides: &[Guide],
        options: &SearchOptions,
    ) -> Vec<SearchResult> {
        let index = self.inner.read();
        Searcher::new(&index).search_with_options(query, guides, options)
    }

    /// See [`GuideIndex::top_search_terms`]
    pub fn top_search_terms(&self, limit: usize) -> Vec<TermFrequency> {
        self.inner.read().top_search_terms(limit)
    }

    /// See [`GuideIndex::suggested_searches`]
    pub fn suggested_searches(&self, partial_query: &str, limit: usize) -> Vec<String> {
        self.inner.read().suggested_searches(partial_query, limit)
    }

    /// Read access to the current index
    pub fn read(&self) -> RwLockReadGuard<'_, GuideIndex> {
        self.inner.read()
    }
}
