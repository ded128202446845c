//! Golden tests for AIDX search quality
//!
//! These tests compare search results over the fixture corpus against
//! expected "golden" files to catch ranking regressions.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test golden_tests
//! ```
//!
//! ## Updating Golden Files
//!
//! When ranking behavior intentionally changes, update golden files:
//!
//! ```bash
//! AIDX_UPDATE_GOLDEN=1 cargo test --test golden_tests
//! ```

use aidx::{load_guides, Guide, GuideIndex, Searcher};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Golden file format for search tests
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoldenSearch {
    /// The search query
    query: String,
    /// Expected minimum number of results
    #[serde(default)]
    min_count: usize,
    /// Expected maximum number of results (optional)
    max_count: Option<usize>,
    /// Expected top results (in order)
    top_results: Vec<GoldenResult>,
}

/// Expected result in golden file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoldenResult {
    /// Substring that the guide ID must contain
    id_contains: String,
    /// Minimum score threshold (optional)
    #[serde(default)]
    min_score: Option<i64>,
    /// Maximum allowed rank position (1-indexed, optional)
    #[serde(default)]
    max_rank: Option<usize>,
}

/// Golden file format for index statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoldenIndexStats {
    /// Expected number of guides read from the fixtures
    guides_loaded: usize,
    /// Expected number of indexed guides
    guides_indexed: usize,
}

/// Actual search result for comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActualSearchResult {
    rank: usize,
    id: String,
    score: i64,
}

/// Test context with the loaded corpus and its index
struct TestContext {
    guides: Vec<Guide>,
    index: GuideIndex,
}

/// Load and index the fixture corpus
fn setup_test_context() -> TestContext {
    let corpus_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/guides");
    let guides = load_guides(&corpus_dir).unwrap();
    let index = GuideIndex::from_guides(&guides);

    TestContext { guides, index }
}

/// Get path to golden files directory
fn golden_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden")
}

/// Check if golden files should be updated
fn should_update_golden() -> bool {
    std::env::var("AIDX_UPDATE_GOLDEN").is_ok()
}

/// Load a golden file
fn load_golden<T: for<'de> Deserialize<'de>>(name: &str) -> Option<T> {
    let path = golden_dir().join(name);
    if !path.exists() {
        return None;
    }

    let mut file = File::open(&path).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();

    serde_json::from_str(&content).ok()
}

/// Save a golden file
fn save_golden<T: Serialize>(name: &str, data: &T) {
    let path = golden_dir().join(name);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    let content = serde_json::to_string_pretty(data).unwrap();
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();

    println!("Updated golden file: {}", path.display());
}

/// Execute a search and return ranked results
fn execute_search(ctx: &TestContext, query: &str) -> Vec<ActualSearchResult> {
    Searcher::new(&ctx.index)
        .search(query, &ctx.guides)
        .into_iter()
        .enumerate()
        .map(|(i, r)| ActualSearchResult {
            rank: i + 1,
            id: r.document.id,
            score: r.score,
        })
        .collect()
}

/// Compare actual results against golden expectations
fn verify_golden_search(
    actual: &[ActualSearchResult],
    golden: &GoldenSearch,
) -> Result<(), String> {
    if actual.len() < golden.min_count {
        return Err(format!(
            "Expected at least {} results, got {}",
            golden.min_count,
            actual.len()
        ));
    }

    if let Some(max) = golden.max_count {
        if actual.len() > max {
            return Err(format!(
                "Expected at most {} results, got {}",
                max,
                actual.len()
            ));
        }
    }

    for (i, expected) in golden.top_results.iter().enumerate() {
        let matching = actual.iter().find(|r| r.id.contains(&expected.id_contains));

        let Some(result) = matching else {
            return Err(format!(
                "Expected result containing '{}' at position {}, but not found in results",
                expected.id_contains,
                i + 1
            ));
        };

        if let Some(max_rank) = expected.max_rank {
            if result.rank > max_rank {
                return Err(format!(
                    "Expected '{}' within top {} results, but found at rank {}",
                    expected.id_contains, max_rank, result.rank
                ));
            }
        }

        if let Some(min_score) = expected.min_score {
            if result.score < min_score {
                return Err(format!(
                    "Expected '{}' to have score >= {}, but got {}",
                    expected.id_contains, min_score, result.score
                ));
            }
        }
    }

    Ok(())
}

/// Regenerate or verify one golden search file
fn run_golden_searches(golden_file: &str, queries: &[&str]) {
    let ctx = setup_test_context();

    if should_update_golden() {
        let goldens: Vec<GoldenSearch> = queries
            .iter()
            .map(|query| {
                let results = execute_search(&ctx, query);
                GoldenSearch {
                    query: query.to_string(),
                    min_count: results.len(),
                    max_count: Some(results.len()),
                    top_results: results
                        .iter()
                        .take(3)
                        .map(|r| GoldenResult {
                            id_contains: r.id.clone(),
                            min_score: None,
                            max_rank: Some(r.rank),
                        })
                        .collect(),
                }
            })
            .collect();

        save_golden(golden_file, &goldens);
        return;
    }

    let goldens: Vec<GoldenSearch> = load_golden(golden_file)
        .expect("Golden file not found. Run with AIDX_UPDATE_GOLDEN=1 to generate.");

    for golden in &goldens {
        let results = execute_search(&ctx, &golden.query);

        if let Err(e) = verify_golden_search(&results, golden) {
            panic!(
                "Golden test failed for query '{}': {}\n\nActual results:\n{:#?}",
                golden.query, e, results
            );
        }
    }
}

// =============================================================================
// Golden Tests
// =============================================================================

#[test]
fn test_golden_search_basic() {
    run_golden_searches(
        "search_basic.golden.json",
        &["cpr", "bleeding", "choking", "burn", "emergency"],
    );
}

#[test]
fn test_golden_search_multiword() {
    run_golden_searches(
        "search_multiword.golden.json",
        &["severe bleeding", "allergic reaction", "ankle sprain", "abdominal thrusts"],
    );
}

#[test]
fn test_golden_index_stats() {
    let ctx = setup_test_context();
    let golden_file = "index_stats.golden.json";

    if should_update_golden() {
        let golden = GoldenIndexStats {
            guides_loaded: ctx.guides.len(),
            guides_indexed: ctx.index.index_size(),
        };

        save_golden(golden_file, &golden);
        return;
    }

    let golden: GoldenIndexStats = load_golden(golden_file)
        .expect("Golden file not found. Run with AIDX_UPDATE_GOLDEN=1 to generate.");

    assert_eq!(ctx.guides.len(), golden.guides_loaded, "Loaded guide count mismatch");
    assert_eq!(
        ctx.index.index_size(),
        golden.guides_indexed,
        "Indexed guide count mismatch"
    );
}

#[test]
fn test_golden_search_no_results() {
    let ctx = setup_test_context();

    let queries = vec![
        "quantum entanglement blockchain",
        "zzznonexistenttermzzz",
        "xyzabc123notfound",
        "",
        "?!",
    ];

    for query in queries {
        let results = execute_search(&ctx, query);

        assert!(
            results.is_empty(),
            "Expected no results for '{}', but got {} results",
            query,
            results.len()
        );
    }
}

#[test]
fn test_golden_search_case_insensitive() {
    let ctx = setup_test_context();

    let test_cases = vec![("cpr", "CPR"), ("choking", "Choking"), ("burn", "BURN")];

    for (lower, upper) in test_cases {
        let lower_results = execute_search(&ctx, lower);
        let upper_results = execute_search(&ctx, upper);

        assert_eq!(
            lower_results.len(),
            upper_results.len(),
            "Case sensitivity issue: '{}' returned {} results, '{}' returned {}",
            lower,
            lower_results.len(),
            upper,
            upper_results.len()
        );
    }
}

#[test]
fn test_golden_search_ranking_consistency() {
    let ctx = setup_test_context();
    let query = "severe bleeding emergency";

    let results1 = execute_search(&ctx, query);
    let results2 = execute_search(&ctx, query);

    assert_eq!(results1.len(), results2.len(), "Result count should be consistent");

    for (r1, r2) in results1.iter().zip(results2.iter()) {
        assert_eq!(r1.id, r2.id, "Result order should be consistent");
        assert_eq!(r1.score, r2.score, "Scores should be consistent");
    }
}

#[test]
fn test_golden_search_sorted_descending() {
    let ctx = setup_test_context();

    for query in ["severe", "emergency", "the", "ice"] {
        let results = execute_search(&ctx, query);

        for i in 1..results.len() {
            assert!(
                results[i - 1].score >= results[i].score,
                "Results not sorted by score (descending) for '{}': {} < {}",
                query,
                results[i - 1].score,
                results[i].score
            );
        }
    }
}

/// Test that generates a detailed report of search results (for debugging)
#[test]
#[ignore] // Run with: cargo test --test golden_tests test_search_report -- --ignored --nocapture
fn test_search_report() {
    let ctx = setup_test_context();

    let queries = vec![
        "cpr",
        "severe bleeding",
        "choking",
        "burn blister",
        "allergic reaction",
        "emergency",
        "ice",
    ];

    println!("\n=== AIDX Search Quality Report ===\n");

    for query in queries {
        let results = execute_search(&ctx, query);

        println!("Query: '{}' ({} results)", query, results.len());
        println!("{:-<60}", "");

        for result in results.iter().take(5) {
            println!("  #{} [{}] {}", result.rank, result.score, result.id);
        }
        println!();
    }
}
