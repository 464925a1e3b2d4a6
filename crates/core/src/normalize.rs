//! Text normalization for comparing scraped page text with dataset text.
//!
//! Cleaning steps (applied in order):
//! 1. Lower-case
//! 2. Fold smart quotes (and the straight apostrophe) to `"`, en/em dashes to `-`
//! 3. Drop everything except ASCII word characters, whitespace, `-`, `.` and `"`
//! 4. Collapse whitespace runs to a single space and trim the ends

/// Canonicalize arbitrary text into its comparable form.
///
/// Total over any input (the empty string maps to the empty string), deterministic,
/// and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // A space is only written before the next kept char, never at either end.
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let c = fold_punctuation(c);
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if !is_kept(c) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    out
}

fn fold_punctuation(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\'' => '"',
        '\u{2013}' | '\u{2014}' => '-',
        other => other,
    }
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '"')
}
