//! Name Filtering
//!
//! Glob-style filter expressions over canonical benchmark names:
//!
//! ```text
//! positive1:positive2[-negative1:negative2]
//! ```
//!
//! `?` matches exactly one character, `*` matches any (possibly empty)
//! substring, `:` separates alternative patterns and `-` splits the
//! positive side from the negative side. A name matches the expression
//! when it matches at least one positive pattern and none of the negative
//! ones. Matching is anchored: a pattern must cover the whole name.

/// Test a name against a full filter expression.
///
/// An expression starting with `-` has an implicit `*` positive side, so
/// `-X.Slow` means "everything except `X.Slow`".
pub fn matches_filter(expression: &str, candidate: &str) -> bool {
    let (positive, negative) = match expression.split_once('-') {
        Some((pos, neg)) => {
            let pos = if pos.is_empty() { "*" } else { pos };
            (pos, Some(neg))
        }
        None => (expression, None),
    };

    if !matches_any_pattern(positive, candidate) {
        return false;
    }

    match negative {
        Some(neg) => !matches_any_pattern(neg, candidate),
        None => true,
    }
}

/// Test a name against a `:`-separated pattern list.
fn matches_any_pattern(patterns: &str, candidate: &str) -> bool {
    patterns
        .split(':')
        .any(|pattern| matches_pattern(pattern.as_bytes(), candidate.as_bytes()))
}

/// Anchored glob match by recursive backtracking.
///
/// Recursion depth is bounded by the pattern length plus the candidate
/// length, which is fine for benchmark names; the `*` branch first tries to
/// consume a candidate character and falls back to matching empty.
fn matches_pattern(pattern: &[u8], candidate: &[u8]) -> bool {
    match pattern.first() {
        None => candidate.is_empty(),
        Some(b'?') => !candidate.is_empty() && matches_pattern(&pattern[1..], &candidate[1..]),
        Some(b'*') => {
            (!candidate.is_empty() && matches_pattern(pattern, &candidate[1..]))
                || matches_pattern(&pattern[1..], candidate)
        }
        Some(&c) => candidate.first() == Some(&c) && matches_pattern(&pattern[1..], &candidate[1..]),
    }
}
