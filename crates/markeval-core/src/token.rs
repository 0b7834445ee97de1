//! Marker token location and stripping.
//!
//! A token is any case-insensitive match of `cell_` followed by one or more
//! decimal digits. The numeric suffix identifies nothing: only the fact and
//! position of a match matters to scoring.

use regex::Regex;
use std::sync::LazyLock;

static RE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cell_\d+").expect("regex is compile-time constant"));

/// Strip all tokens from `text`.
///
/// Returns the token-free base text plus the position each token occupied,
/// as character offsets into the base text (the offset a reader would see if
/// every token were deleted in place, leaving no residual character).
/// Offsets come out in left-to-right match order and are non-decreasing;
/// two textually adjacent tokens yield equal offsets.
#[must_use]
pub fn strip_tokens(text: &str) -> (String, Vec<usize>) {
    let mut base = String::with_capacity(text.len());
    let mut offsets = Vec::new();
    let mut base_chars = 0usize;
    let mut tail = 0usize;

    for m in RE_TOKEN.find_iter(text) {
        let between = &text[tail..m.start()];
        base.push_str(between);
        base_chars += between.chars().count();
        offsets.push(base_chars);
        tail = m.end();
    }
    base.push_str(&text[tail..]);

    (base, offsets)
}
