//! # AIDX - Emergency guide search
//!
//! An in-memory search and ranking engine for a small corpus of first-aid
//! guides.
//!
//! AIDX provides:
//! - **Tokenization** of guide text and free-text queries
//! - **Fuzzy matching** by substring, word prefix and bounded edit distance
//! - **Ranked search** combining guide severity, popularity and recency with
//!   per-field match weights and an IDF-style rarity bonus
//! - **Autocomplete** and popular-term reports from the document-frequency table
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aidx::{load_guides, GuideIndex, Searcher};
//!
//! let guides = load_guides("guides/").unwrap();
//!
//! // Build the index (always a full rebuild)
//! let index = GuideIndex::from_guides(&guides);
//!
//! // Search
//! let results = Searcher::new(&index).search("severe bleeding", &guides);
//! for result in results {
//!     println!("{} ({})", result.document.title, result.score);
//! }
//!
//! // Autocomplete
//! let suggestions = index.suggested_searches("ble", 5);
//! ```

pub mod error;
pub mod fuzzy;
pub mod index;
pub mod loader;
pub mod models;
pub mod search;
pub mod shared;
pub mod suggest;
pub mod tokenizer;

// Re-exports for convenience
pub use error::{Error, Result};
pub use fuzzy::{fuzzy_match, levenshtein_distance};
pub use index::{GuideIndex, IndexEntry, IndexStats};
pub use loader::{load_guides, GuideLoader};
pub use models::{Category, Guide, GuideContent, GuideStep, Severity};
pub use search::{SearchField, SearchMatch, SearchOptions, SearchResult, Searcher};
pub use shared::SharedGuideIndex;
pub use suggest::TermFrequency;
pub use tokenizer::tokenize;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
