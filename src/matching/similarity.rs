//! Textual similarity scoring between payroll item and ledger names.
//!
//! The score is a priority cascade, not a blend: the first matching rule
//! wins. Downstream auto-map determinism depends on the exact cascade and
//! its tie-breaking, so the rule order must not be reordered or merged.

/// Computes a normalized similarity between two labels.
///
/// Rules, in priority order (first match wins):
/// 1. Case-insensitive, trimmed exact match: 1.0.
/// 2. One string contains the other (after trim/lowercase): 0.8.
/// 3. Shared whitespace tokens longer than 2 characters:
///    `0.7 * |intersection| / max(|tokens_a|, |tokens_b|)`.
/// 4. Normalized Levenshtein similarity: `1 - distance / max(len_a, len_b)`.
///
/// Two empty strings score 0.0 rather than dividing by zero.
///
/// # Example
///
/// ```
/// use tally_assist::matching::similarity;
///
/// assert_eq!(similarity("Basic Salary", "basic salary"), 1.0);
/// assert_eq!(similarity("Salary", "Basic Salary"), 0.8);
///
/// // Shared token "salary": 0.7 * 1 / 2 = 0.35
/// let score = similarity("Basic Salary", "Salary Expense");
/// assert!(score > 0.0 && score <= 0.8);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    if a == b {
        return 1.0;
    }

    if !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a)) {
        return 0.8;
    }

    let tokens_a: Vec<&str> = a.split_whitespace().collect();
    let tokens_b: Vec<&str> = b.split_whitespace().collect();
    let shared = tokens_a
        .iter()
        .filter(|t| t.len() > 2 && tokens_b.contains(t))
        .count();
    if shared > 0 {
        let max_tokens = tokens_a.len().max(tokens_b.len());
        return 0.7 * shared as f64 / max_tokens as f64;
    }

    let max_len = a.chars().count().max(b.chars().count());
    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}

/// Computes the Levenshtein edit distance with unit insertion, deletion,
/// and substitution costs, over a full dynamic-programming matrix.
///
/// Inputs are expected to be lowercased already.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        matrix[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a.len()][b.len()]
}
