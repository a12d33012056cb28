//! Cleanup of the model's reply before it is saved.

use std::collections::HashSet;

/// Remove repeated lines from a model reply.
///
/// Lines are compared by their trimmed text. The first occurrence of each
/// line is kept verbatim (indentation included) and later repeats are
/// dropped. Blank and whitespace-only lines are always dropped, which
/// also collapses paragraph breaks in the Markdown output.
pub fn dedupe_lines(reply: &str) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    reply
        .split('\n')
        .filter(|line| {
            let key = line.trim();
            !key.is_empty() && seen.insert(key)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
