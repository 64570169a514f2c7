//! Minimal expected/actual diff rendering.

/// Renders a two-line diff plus the first differing byte offset.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    let mut out = format!("- {expected}\n+ {actual}");
    if let Some(offset) = first_diff_offset(expected, actual) {
        out.push_str(&format!("\n  first difference at byte {offset}"));
    }
    out
}

/// Byte offset of the first difference, or `None` when equal.
#[must_use]
pub fn first_diff_offset(expected: &str, actual: &str) -> Option<usize> {
    let a = expected.as_bytes();
    let b = actual.as_bytes();
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(idx) => Some(idx),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}
