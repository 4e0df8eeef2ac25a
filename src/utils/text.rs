// Text helpers shared by the checkers

/// Normalize a value for comparison: trimmed and lowercased
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A value is blank when it is empty or whitespace-only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose match: equal after normalization, or either side contains the other.
/// An empty side is contained in anything, so it always matches.
pub fn loose_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    a == b || a.contains(&b) || b.contains(&a)
}
