//! Bounds and range checks shared by the catalog and the shell.

use std::collections::BTreeSet;

/// Check that `index` addresses an element of `list`.
pub fn is_valid_list_index<T>(index: usize, list: &[T]) -> bool {
    index < list.len()
}

/// Inclusive range check: `min <= value <= max`.
pub fn valid_range<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    min <= value && value <= max
}

/// Parse a comma-separated allergen list. Labels are trimmed and blanks
/// dropped; duplicates collapse.
pub fn parse_allergens(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
