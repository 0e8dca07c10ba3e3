//! "Did you mean" suggestions for misspelled unit and recurrence names.
//!
//! `pub(crate)` so the codec can suggest units while decoding.

use tempo_core::{Recurrence, TimeUnit};

/// Unit names are short; more edits than this is a different word.
const MAX_EDITS: usize = 2;

/// Closest time unit name to `raw`, if any is close enough.
pub(crate) fn suggest_unit(raw: &str) -> Option<String> {
    closest(raw, &TimeUnit::NAMES)
}

/// Closest recurrence name to `raw` (units plus `null`), if any is close enough.
pub(crate) fn suggest_recurrence(raw: &str) -> Option<String> {
    closest(raw, &Recurrence::NAMES)
}

/// Ties go to the name listed first.
fn closest(raw: &str, vocabulary: &[&'static str]) -> Option<String> {
    let needle = raw.trim().to_lowercase();
    vocabulary
        .iter()
        .map(|&name| (edit_distance(&needle, name), name))
        .filter(|&(distance, _)| distance <= MAX_EDITS)
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, name)| name.to_string())
}

/// Levenshtein distance over chars, one row at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}
