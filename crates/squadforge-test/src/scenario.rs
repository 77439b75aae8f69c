//! Small pools with a known outcome.
//!
//! # Example
//!
//! ```
//! use squadforge_test::Scenario;
//!
//! let scenario = Scenario::cheapest_pair_by_score();
//! assert_eq!(scenario.pool.len(), 3);
//! assert_eq!(scenario.constraints.target_size(), 2);
//! ```

use squadforge_core::{Budget, Category, ConstraintSet, Item, Squad};

use crate::item::item;

/// A pool paired with the constraints it is meant to be allocated against.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub pool: Vec<Item>,
    pub constraints: ConstraintSet,
}

impl Scenario {
    /// Returns the budget to allocate with.
    pub fn budget(&self) -> Budget {
        self.constraints.budget
    }

    /// Returns the whole pool as a squad.
    pub fn pool_as_squad(&self) -> Squad {
        self.pool.iter().cloned().collect()
    }

    /// Forwards priced 4.0, 5.0 and 6.0 with scores 10, 8 and 6; two are
    /// required and the budget is plentiful. Score-first picks ids 1 and 2.
    pub fn cheapest_pair_by_score() -> Self {
        Self {
            pool: vec![
                item(1, "Ayo", Category::Forward, "North", 40, 10),
                item(2, "Bex", Category::Forward, "South", 50, 8),
                item(3, "Cal", Category::Forward, "East", 60, 6),
            ],
            constraints: ConstraintSet::empty(Budget::from(100), 3)
                .with_quota(Category::Forward, 2),
        }
    }

    /// Every goalkeeper costs more than the whole budget of 5.0; the single
    /// forward costs 3.0.
    pub fn unaffordable_category() -> Self {
        Self {
            pool: vec![
                item(1, "Gil", Category::Goalkeeper, "North", 60, 90),
                item(2, "Hank", Category::Goalkeeper, "South", 70, 95),
                item(3, "Ivan", Category::Forward, "East", 30, 40),
            ],
            constraints: ConstraintSet::empty(Budget::from(5), 3)
                .with_quota(Category::Goalkeeper, 1)
                .with_quota(Category::Forward, 1),
        }
    }

    /// One goalkeeper and one forward are required with at most one item per
    /// group, but every item belongs to the same group.
    pub fn single_group() -> Self {
        Self {
            pool: vec![
                item(1, "Jo", Category::Goalkeeper, "Solo", 40, 50),
                item(2, "Kit", Category::Forward, "Solo", 50, 70),
                item(3, "Lou", Category::Forward, "Solo", 45, 60),
            ],
            constraints: ConstraintSet::empty(Budget::from(100), 1)
                .with_quota(Category::Goalkeeper, 1)
                .with_quota(Category::Forward, 1),
        }
    }

    /// A pool that is itself a valid squad: exact category counts, no group
    /// over cap and a total cost equal to the budget of 10.0.
    pub fn exact_fit() -> Self {
        Self {
            pool: vec![
                item(1, "Mo", Category::Goalkeeper, "North", 40, 30),
                item(2, "Ned", Category::Defender, "North", 30, 20),
                item(3, "Oz", Category::Defender, "South", 30, 25),
            ],
            constraints: ConstraintSet::empty(Budget::from(10), 2)
                .with_quota(Category::Goalkeeper, 1)
                .with_quota(Category::Defender, 2),
        }
    }
}
