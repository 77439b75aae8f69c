//! Constraint validator.
//!
//! Recomputes every check from the squad alone and reports all failures
//! together. Checks run in a fixed order: budget, size, category counts in
//! category order, then group caps in group-name order. The result depends
//! only on the squad's contents, never on its item order.

use squadforge_core::{ConstraintSet, Squad, Violation};
use tracing::debug;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Validates `squad` against `constraints`.
///
/// Returns an empty list exactly when the squad is within budget, has the
/// exact size and per-category counts required, and no group is over cap.
///
/// # Example
///
/// ```
/// use squadforge_core::{ConstraintSet, Squad, ViolationKind};
/// use squadforge_solver::validate;
///
/// let violations = validate(&Squad::empty(), &ConstraintSet::default());
/// assert_eq!(violations[0].kind(), ViolationKind::SizeMismatch);
/// assert_eq!(violations.len(), 5);
/// ```
pub fn validate(squad: &Squad, constraints: &ConstraintSet) -> Vec<Violation> {
    let mut violations = Vec::new();

    let total_cost = squad.total_cost();
    if !constraints.budget.admits(total_cost) {
        violations.push(Violation::BudgetExceeded {
            total_cost,
            budget: constraints.budget.amount(),
        });
    }

    let expected = constraints.target_size();
    if squad.len() != expected {
        violations.push(Violation::SizeMismatch {
            expected,
            actual: squad.len(),
        });
    }

    let by_category = squad.count_by_category();
    for (&category, &required) in &constraints.quotas {
        let actual = by_category.get(&category).copied().unwrap_or(0);
        if actual != required as usize {
            violations.push(Violation::CategoryCountMismatch {
                category,
                required,
                actual,
            });
        }
    }

    for (group, count) in squad.count_by_group() {
        if count > constraints.max_per_group as usize {
            violations.push(Violation::GroupCapExceeded {
                group: group.to_string(),
                count,
                cap: constraints.max_per_group,
            });
        }
    }

    debug!(
        event = "validate_end",
        squad_size = squad.len(),
        total_cost = %total_cost,
        violations = violations.len(),
    );
    violations
}

/// Returns true if `squad` satisfies every constraint.
pub fn is_valid(squad: &Squad, constraints: &ConstraintSet) -> bool {
    validate(squad, constraints).is_empty()
}
