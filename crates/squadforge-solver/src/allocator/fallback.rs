//! Cheapest-first salvage of categories left short by the quota walk.

use squadforge_core::Item;

use super::bucket::SortOrder;
use super::state::AllocationState;

/// Builds the flat fallback list: unpicked items from categories that still
/// have open slots, ordered by price regardless of the configured preference.
pub(crate) fn candidates<'a>(pool: &'a [Item], state: &AllocationState<'a>) -> Vec<&'a Item> {
    let mut flat: Vec<&Item> = pool
        .iter()
        .filter(|item| state.open_slots(item.category) > 0 && !state.is_picked(item.id))
        .collect();
    SortOrder::PriceFirst.sort(&mut flat);
    flat
}
