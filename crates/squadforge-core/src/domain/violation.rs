//! Constraint violations.

use std::fmt;

use rust_decimal::Decimal;

use super::item::Category;

/// A specific way in which a squad fails its constraint set.
///
/// Violations are produced fresh on every validation call and never
/// persisted. `Display` renders the human-readable diagnostic.
///
/// # Example
///
/// ```
/// use squadforge_core::{Category, Violation, ViolationKind};
///
/// let v = Violation::CategoryCountMismatch {
///     category: Category::Forward,
///     required: 3,
///     actual: 2,
/// };
/// assert_eq!(v.kind(), ViolationKind::CategoryCountMismatch);
/// assert_eq!(v.to_string(), "Squad must have 3 players in position FWD, but has 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Violation {
    /// Total cost is above the budget ceiling.
    BudgetExceeded { total_cost: Decimal, budget: Decimal },

    /// Squad size differs from the sum of all quotas.
    SizeMismatch { expected: usize, actual: usize },

    /// A category count differs from its quota, in either direction.
    CategoryCountMismatch {
        category: Category,
        required: u32,
        actual: usize,
    },

    /// A group has more members than the per-group cap.
    GroupCapExceeded {
        group: String,
        count: usize,
        cap: u32,
    },
}

impl Violation {
    /// Returns the kind tag of this violation.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::BudgetExceeded { .. } => ViolationKind::BudgetExceeded,
            Violation::SizeMismatch { .. } => ViolationKind::SizeMismatch,
            Violation::CategoryCountMismatch { .. } => ViolationKind::CategoryCountMismatch,
            Violation::GroupCapExceeded { .. } => ViolationKind::GroupCapExceeded,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::BudgetExceeded { total_cost, budget } => write!(
                f,
                "Total cost of squad ({}) exceeds budget ({})",
                total_cost, budget
            ),
            Violation::SizeMismatch { expected, actual } => write!(
                f,
                "Squad must have {} players, but has {}",
                expected, actual
            ),
            Violation::CategoryCountMismatch {
                category,
                required,
                actual,
            } => write!(
                f,
                "Squad must have {} players in position {}, but has {}",
                required, category, actual
            ),
            Violation::GroupCapExceeded { group, count, cap } => write!(
                f,
                "Too many players from club {} ({} > {})",
                group, count, cap
            ),
        }
    }
}

/// Field-less tag of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViolationKind {
    BudgetExceeded,
    SizeMismatch,
    CategoryCountMismatch,
    GroupCapExceeded,
}

impl ViolationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ViolationKind::BudgetExceeded => "budget_exceeded",
            ViolationKind::SizeMismatch => "size_mismatch",
            ViolationKind::CategoryCountMismatch => "category_count_mismatch",
            ViolationKind::GroupCapExceeded => "group_cap_exceeded",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
