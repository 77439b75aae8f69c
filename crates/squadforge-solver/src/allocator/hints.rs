//! Hint matching.

use squadforge_core::Item;

use super::bucket::SortOrder;

/// Normalizes a hint for matching.
///
/// A blank hint normalizes to the empty string, which every name contains.
pub(crate) fn normalize(hint: &str) -> String {
    hint.trim().to_lowercase()
}

/// Returns true if `item`'s name contains the normalized hint.
pub(crate) fn matches(item: &Item, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
}

/// Picks the best candidate whose name contains `needle`.
///
/// Best means highest score, then lowest price, then name, then id.
pub(crate) fn best_match<'a, I>(candidates: I, needle: &str) -> Option<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    candidates
        .into_iter()
        .filter(|item| matches(item, needle))
        .min_by(|a, b| SortOrder::ScoreFirst.compare(a, b))
}
