//! Running allocation state.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use rust_decimal::Decimal;
use squadforge_core::{Budget, Category, ConstraintSet, Item, ItemId, Squad};

use crate::stats::{AllocationStats, Pass};

/// Reason a candidate was not placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The item is already in the squad.
    AlreadyPicked,
    /// The item's price is above the remaining budget.
    OverBudget,
    /// The item's group already holds `max_per_group` members.
    GroupAtCap,
    /// The item's category has no open slot.
    CategoryFilled,
}

impl Rejection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Rejection::AlreadyPicked => "already_picked",
            Rejection::OverBudget => "over_budget",
            Rejection::GroupAtCap => "group_at_cap",
            Rejection::CategoryFilled => "category_filled",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state of one allocation run.
///
/// Open slots are signed: a hint may place an item into a category that is
/// already full, which drives the count below zero.
pub(crate) struct AllocationState<'a> {
    max_per_group: u32,
    remaining_budget: Decimal,
    open: BTreeMap<Category, i64>,
    picked: HashSet<ItemId>,
    group_counts: HashMap<&'a str, u32>,
    selected: Vec<&'a Item>,
    pub(crate) stats: AllocationStats,
}

impl<'a> AllocationState<'a> {
    pub(crate) fn new(constraints: &ConstraintSet, budget: Budget) -> Self {
        Self {
            max_per_group: constraints.max_per_group,
            remaining_budget: budget.amount(),
            open: constraints
                .quotas
                .iter()
                .map(|(&category, &count)| (category, i64::from(count)))
                .collect(),
            picked: HashSet::new(),
            group_counts: HashMap::new(),
            selected: Vec::new(),
            stats: AllocationStats::default(),
        }
    }

    /// Returns the open slots of `category`; categories without a quota have none.
    pub(crate) fn open_slots(&self, category: Category) -> i64 {
        self.open.get(&category).copied().unwrap_or(0)
    }

    /// Returns the categories that still have an open slot.
    pub(crate) fn unmet_categories(&self) -> Vec<Category> {
        self.open
            .iter()
            .filter(|(_, &open)| open > 0)
            .map(|(&category, _)| category)
            .collect()
    }

    pub(crate) fn is_picked(&self, id: ItemId) -> bool {
        self.picked.contains(&id)
    }

    pub(crate) fn remaining_budget(&self) -> Decimal {
        self.remaining_budget
    }

    /// Checks the running constraints that apply in every pass.
    ///
    /// The category check is separate so hints can bypass it.
    pub(crate) fn check(&self, item: &Item) -> Result<(), Rejection> {
        if self.picked.contains(&item.id) {
            return Err(Rejection::AlreadyPicked);
        }
        if item.price > self.remaining_budget {
            return Err(Rejection::OverBudget);
        }
        let in_group = self
            .group_counts
            .get(item.group.as_str())
            .copied()
            .unwrap_or(0);
        if in_group >= self.max_per_group {
            return Err(Rejection::GroupAtCap);
        }
        Ok(())
    }

    /// Checks the running constraints plus an open slot in the item's category.
    pub(crate) fn check_with_slot(&self, item: &Item) -> Result<(), Rejection> {
        self.check(item)?;
        if self.open_slots(item.category) <= 0 {
            return Err(Rejection::CategoryFilled);
        }
        Ok(())
    }

    /// Places `item` into the squad and updates every running count.
    pub(crate) fn accept(&mut self, item: &'a Item, pass: Pass) {
        self.picked.insert(item.id);
        *self.group_counts.entry(item.group.as_str()).or_insert(0) += 1;
        *self.open.entry(item.category).or_insert(0) -= 1;
        self.remaining_budget -= item.price;
        self.selected.push(item);
        self.stats.record_pick(pass);
    }

    pub(crate) fn reject(&mut self) {
        self.stats.record_rejection();
    }

    /// Returns the selected items in placement order.
    pub(crate) fn into_squad(self) -> (Squad, AllocationStats) {
        let squad = self.selected.into_iter().cloned().collect();
        (squad, self.stats)
    }
}
