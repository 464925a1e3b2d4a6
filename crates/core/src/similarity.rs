//! General-purpose string similarity.
//!
//! The matcher never uses this: answer resolution is exact-only. It is exposed for
//! frontends that want to show how close a near miss was.

/// Light normalization used before comparing: trim, lower-case, collapse whitespace.
///
/// Unlike [`crate::normalize`], punctuation is preserved.
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join(" ")
}

/// Levenshtein edit distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row; prev[j] holds the distance for a[..i-1] vs b[..j].
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Similarity ratio in `[0.0, 1.0]` derived from the edit distance.
///
/// Identical inputs (after [`squash_whitespace`]) score `1.0`; an empty side scores `0.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = squash_whitespace(a);
    let b = squash_whitespace(b);
    if a == b {
        return 1.0;
    }
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    let max_len = len_a.max(len_b);
    (max_len - levenshtein(&a, &b)) as f64 / max_len as f64
}
