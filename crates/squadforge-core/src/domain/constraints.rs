//! Budgets and constraint sets.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;

use super::item::Category;
use crate::error::{Result, SquadForgeError};

/// A non-negative spending ceiling.
///
/// # Example
///
/// ```
/// use squadforge_core::{Budget, Decimal};
///
/// let budget = Budget::new(Decimal::new(1005, 1)).unwrap();
/// assert_eq!(budget.amount(), Decimal::new(1005, 1));
/// assert!(Budget::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Decimal", into = "Decimal"))]
pub struct Budget(Decimal);

impl Budget {
    /// The zero budget.
    pub const ZERO: Budget = Budget(Decimal::ZERO);

    /// Creates a budget, failing fast on a negative amount.
    pub fn new(amount: Decimal) -> Result<Self> {
        if amount < Decimal::ZERO {
            return Err(SquadForgeError::NegativeBudget(amount));
        }
        Ok(Budget(amount))
    }

    /// Returns the amount.
    #[inline]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if `cost` fits within this budget.
    #[inline]
    pub fn admits(self, cost: Decimal) -> bool {
        cost <= self.0
    }
}

impl From<u32> for Budget {
    fn from(units: u32) -> Self {
        Budget(Decimal::from(units))
    }
}

impl TryFrom<Decimal> for Budget {
    type Error = SquadForgeError;

    fn try_from(amount: Decimal) -> Result<Self> {
        Budget::new(amount)
    }
}

impl From<Budget> for Decimal {
    fn from(budget: Budget) -> Self {
        budget.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default budget ceiling.
const DEFAULT_BUDGET: u32 = 100;

/// Default maximum number of items from a single group.
const DEFAULT_MAX_PER_GROUP: u32 = 3;

/// The constraints a squad must satisfy.
///
/// The sum of all quotas is the exact squad size the validator expects.
///
/// # Example
///
/// ```
/// use squadforge_core::{Category, ConstraintSet};
///
/// let constraints = ConstraintSet::default();
/// assert_eq!(constraints.target_size(), 15);
/// assert_eq!(constraints.required(Category::Goalkeeper), 2);
/// assert_eq!(constraints.max_per_group, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSet {
    /// Total budget ceiling.
    pub budget: Budget,
    /// Exact required count per category.
    #[cfg_attr(feature = "serde", serde(alias = "positions"))]
    pub quotas: BTreeMap<Category, u32>,
    /// Maximum count allowed per group across the whole squad.
    #[cfg_attr(feature = "serde", serde(alias = "max_per_club"))]
    pub max_per_group: u32,
}

impl ConstraintSet {
    /// Creates a constraint set from typed parts.
    pub fn new(budget: Budget, quotas: BTreeMap<Category, u32>, max_per_group: u32) -> Self {
        Self {
            budget,
            quotas,
            max_per_group,
        }
    }

    /// Creates a constraint set with no quotas.
    pub fn empty(budget: Budget, max_per_group: u32) -> Self {
        Self::new(budget, BTreeMap::new(), max_per_group)
    }

    /// Builds a constraint set from untyped parts, as received at an input
    /// boundary.
    ///
    /// # Errors
    ///
    /// Fails on a negative budget, an unknown category label, or a label
    /// that appears twice.
    pub fn from_labels<'a>(
        budget: Decimal,
        quotas: impl IntoIterator<Item = (&'a str, u32)>,
        max_per_group: u32,
    ) -> Result<Self> {
        let budget = Budget::new(budget)?;
        let mut typed = BTreeMap::new();
        for (label, count) in quotas {
            let category: Category = label.parse()?;
            if typed.insert(category, count).is_some() {
                return Err(SquadForgeError::InvalidConstraints(format!(
                    "category {} listed more than once",
                    category
                )));
            }
        }
        Ok(Self::new(budget, typed, max_per_group))
    }

    /// Sets the budget ceiling.
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the quota for one category.
    pub fn with_quota(mut self, category: Category, count: u32) -> Self {
        self.quotas.insert(category, count);
        self
    }

    /// Sets the per-group cap.
    pub fn with_max_per_group(mut self, max_per_group: u32) -> Self {
        self.max_per_group = max_per_group;
        self
    }

    /// Returns the required count for `category`, zero if it has no quota.
    pub fn required(&self, category: Category) -> u32 {
        self.quotas.get(&category).copied().unwrap_or(0)
    }

    /// Returns the exact squad size implied by the quotas.
    pub fn target_size(&self) -> usize {
        self.quotas.values().map(|&count| count as usize).sum()
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::empty(Budget::from(DEFAULT_BUDGET), DEFAULT_MAX_PER_GROUP)
            .with_quota(Category::Goalkeeper, 2)
            .with_quota(Category::Defender, 5)
            .with_quota(Category::Midfielder, 5)
            .with_quota(Category::Forward, 3)
    }
}
