//! Category buckets and preference ordering.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use squadforge_core::{Category, Item};

/// Preference order applied inside a category bucket.
///
/// Both orders break remaining ties by name. Id is a further tie-break on
/// top of the price, score and name key, so the walk is deterministic even
/// for items that share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Score descending, then price ascending.
    ScoreFirst,
    /// Price ascending, then score descending.
    PriceFirst,
}

impl SortOrder {
    /// Maps the `prefer_score` flag onto an order.
    pub fn from_prefer_score(prefer_score: bool) -> Self {
        if prefer_score {
            SortOrder::ScoreFirst
        } else {
            SortOrder::PriceFirst
        }
    }

    /// Compares two items; `Less` means `a` is preferred.
    pub fn compare(self, a: &Item, b: &Item) -> Ordering {
        let primary = match self {
            SortOrder::ScoreFirst => b
                .score
                .cmp(&a.score)
                .then_with(|| a.price.cmp(&b.price)),
            SortOrder::PriceFirst => a
                .price
                .cmp(&b.price)
                .then_with(|| b.score.cmp(&a.score)),
        };
        primary
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    }

    /// Sorts a slice of item references in this order.
    pub fn sort(self, items: &mut [&Item]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

/// Partitions the pool by category and sorts every bucket.
pub(crate) fn partition(pool: &[Item], order: SortOrder) -> BTreeMap<Category, Vec<&Item>> {
    let mut buckets: BTreeMap<Category, Vec<&Item>> = BTreeMap::new();
    for item in pool {
        buckets.entry(item.category).or_default().push(item);
    }
    for bucket in buckets.values_mut() {
        order.sort(bucket);
    }
    buckets
}
