//! Candidate list helpers for callers that edit names between spins.

/// One candidate per non-blank line, trimmed.
#[must_use]
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove only the first entry equal to `winner` (after trimming). Returns whether one was removed.
pub fn remove_first(names: &mut Vec<String>, winner: &str) -> bool {
    let winner = winner.trim();
    match names.iter().position(|name| name.trim() == winner) {
        Some(index) => {
            names.remove(index);
            true
        }
        None => false,
    }
}

/// Remove every entry equal to `winner` (after trimming). Returns how many were removed.
pub fn remove_all(names: &mut Vec<String>, winner: &str) -> usize {
    let winner = winner.trim();
    let before = names.len();
    names.retain(|name| name.trim() != winner);
    before - names.len()
}
