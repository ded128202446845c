//! Edit-distance matching
//!
//! [`fuzzy_match`] accepts a query term against a target string when any of
//! these hold, checked in order:
//!
//! 1. the target contains the query (case-insensitive)
//! 2. a whitespace-separated word of the target is a prefix of the query, or
//!    the query is a prefix of that word
//! 3. the query is at most [`MAX_FUZZY_QUERY_LEN`] characters and its edit
//!    distance to the whole target is within [`FUZZY_DISTANCE_RATIO`] of the
//!    query length

/// Longest query (in characters) for which edit distance is attempted
pub const MAX_FUZZY_QUERY_LEN: usize = 10;

/// Allowed edits per query character, floored
pub const FUZZY_DISTANCE_RATIO: f64 = 0.3;

/// Levenshtein distance between two strings, counted in characters
///
/// Unit cost for insertion, deletion and substitution. Comparison is exact;
/// callers lowercase first if they want case-insensitivity.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rolling rows instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);

            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Maximum edit distance tolerated for a query of `query_len` characters
pub fn max_distance(query_len: usize) -> usize {
    (query_len as f64 * FUZZY_DISTANCE_RATIO).floor() as usize
}

/// Whether `query` fuzzily matches `target`
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    if target.contains(&query) {
        return true;
    }

    if target
        .split_whitespace()
        .any(|word| word.starts_with(&query) || query.starts_with(word))
    {
        return true;
    }

    let query_len = query.chars().count();
    if query_len <= MAX_FUZZY_QUERY_LEN {
        return levenshtein_distance(&query, &target) <= max_distance(query_len);
    }

    false
}
