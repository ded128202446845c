//! Query and document tokenizer
//!
//! Lowercases, treats anything outside `[a-z0-9]` as a separator and drops
//! tokens of two characters or fewer. No stemming.

/// Minimum token length kept by [`tokenize`]
pub const MIN_TOKEN_LEN: usize = 3;

/// Tokenize text into searchable terms
///
/// # Example
///
/// ```
/// use aidx::tokenizer::tokenize;
///
/// let tokens = tokenize("Call 911, then CHECK breathing!");
/// assert_eq!(tokens, vec!["call", "911", "then", "check", "breathing"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .map(String::from)
        .collect()
}
