//! Tests for the constraint validator.

use super::*;
use squadforge_core::{Budget, Category, Decimal, ViolationKind};
use squadforge_test::{item, standard_constraints, standard_pool, Scenario};

use crate::allocator::{GreedyAllocator, NO_HINTS};

#[test]
fn test_exact_fit_is_valid() {
    let scenario = Scenario::exact_fit();
    let squad = scenario.pool_as_squad();

    assert_eq!(squad.total_cost(), Decimal::from(10));
    assert!(validate(&squad, &scenario.constraints).is_empty());
    assert!(is_valid(&squad, &scenario.constraints));
}

#[test]
fn test_revalidating_valid_squad_stays_valid() {
    let scenario = Scenario::exact_fit();
    let squad = scenario.pool_as_squad();

    assert!(validate(&squad, &scenario.constraints).is_empty());
    assert!(validate(&squad, &scenario.constraints).is_empty());
}

#[test]
fn test_unaffordable_category_reports_mismatch() {
    let scenario = Scenario::unaffordable_category();
    let allocation = GreedyAllocator::default().allocate(
        &scenario.pool,
        &scenario.constraints,
        scenario.budget(),
        NO_HINTS,
    );

    let violations = validate(&allocation.squad, &scenario.constraints);
    assert_eq!(
        violations,
        vec![
            Violation::SizeMismatch {
                expected: 2,
                actual: 1
            },
            Violation::CategoryCountMismatch {
                category: Category::Goalkeeper,
                required: 1,
                actual: 0
            },
        ]
    );
}

#[test]
fn test_single_group_reports_one_mismatch_and_no_cap() {
    let scenario = Scenario::single_group();
    let allocation = GreedyAllocator::default().allocate(
        &scenario.pool,
        &scenario.constraints,
        scenario.budget(),
        NO_HINTS,
    );

    let violations = validate(&allocation.squad, &scenario.constraints);
    let mismatches = violations
        .iter()
        .filter(|v| v.kind() == ViolationKind::CategoryCountMismatch)
        .count();
    let caps = violations
        .iter()
        .filter(|v| v.kind() == ViolationKind::GroupCapExceeded)
        .count();
    assert_eq!(mismatches, 1);
    assert_eq!(caps, 0);
}

#[test]
fn test_reports_every_violation_in_order() {
    let squad: Squad = vec![
        item(1, "A", Category::Goalkeeper, "North", 60, 0),
        item(2, "B", Category::Goalkeeper, "North", 60, 0),
        item(3, "C", Category::Goalkeeper, "North", 60, 0),
    ]
    .into_iter()
    .collect();
    let constraints = ConstraintSet::empty(Budget::from(10), 2)
        .with_quota(Category::Goalkeeper, 1)
        .with_quota(Category::Forward, 1);

    let kinds: Vec<ViolationKind> = validate(&squad, &constraints)
        .iter()
        .map(Violation::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ViolationKind::BudgetExceeded,
            ViolationKind::SizeMismatch,
            ViolationKind::CategoryCountMismatch,
            ViolationKind::CategoryCountMismatch,
            ViolationKind::GroupCapExceeded,
        ]
    );
}

#[test]
fn test_overfilled_category_is_a_mismatch() {
    let squad: Squad = vec![
        item(1, "A", Category::Defender, "North", 10, 0),
        item(2, "B", Category::Defender, "South", 10, 0),
    ]
    .into_iter()
    .collect();
    let constraints = ConstraintSet::empty(Budget::from(10), 3).with_quota(Category::Defender, 1);

    let violations = validate(&squad, &constraints);
    assert!(violations.contains(&Violation::CategoryCountMismatch {
        category: Category::Defender,
        required: 1,
        actual: 2,
    }));
}

#[test]
fn test_unconstrained_category_only_counts_toward_size() {
    let squad: Squad = vec![item(1, "A", Category::Forward, "North", 10, 0)]
        .into_iter()
        .collect();
    let constraints = ConstraintSet::empty(Budget::from(10), 3);

    assert_eq!(
        validate(&squad, &constraints),
        vec![Violation::SizeMismatch {
            expected: 0,
            actual: 1
        }]
    );
}

#[test]
fn test_group_at_cap_is_fine() {
    let squad: Squad = vec![
        item(1, "A", Category::Defender, "North", 10, 0),
        item(2, "B", Category::Defender, "North", 10, 0),
    ]
    .into_iter()
    .collect();
    let constraints = ConstraintSet::empty(Budget::from(10), 2).with_quota(Category::Defender, 2);

    assert!(validate(&squad, &constraints).is_empty());
}

#[test]
fn test_standard_allocation_is_valid() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let allocation =
        GreedyAllocator::default().allocate(&pool, &constraints, constraints.budget, NO_HINTS);

    assert!(validate(&allocation.squad, &constraints).is_empty());
}
