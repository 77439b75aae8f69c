//! Squads produced by allocation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::item::{Category, Item, ItemId};

/// A selected subset of items.
///
/// Order is irrelevant to every check. Uniqueness by id and the constraint
/// invariants are guaranteed by the allocator and checked by the validator;
/// a squad received from outside may violate them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Squad {
    items: Vec<Item>,
}

impl Squad {
    /// Creates a squad from selected items.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Creates an empty squad.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a selected item.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Returns the sum of all item prices.
    pub fn total_cost(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Returns true if an item with `id` is in the squad.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Returns the number of items in `category`.
    pub fn count_in(&self, category: Category) -> usize {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .count()
    }

    /// Returns the number of items per category present in the squad.
    pub fn count_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the number of items per group present in the squad.
    pub fn count_by_group(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.group.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl FromIterator<Item> for Squad {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Squad {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Squad {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
