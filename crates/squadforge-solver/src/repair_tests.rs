//! Tests for the repair controller.

use super::*;
use squadforge_config::HintScope;
use squadforge_core::{Category, ViolationKind};
use squadforge_test::pool::STANDARD_SQUAD_IDS;
use squadforge_test::{standard_constraints, standard_pool, Scenario};

use crate::event::CountingEventListener;

fn ids(outcome: &RepairOutcome) -> Vec<u32> {
    outcome.squad.iter().map(|item| item.id.0).collect()
}

#[test]
fn test_valid_first_attempt_is_accepted() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let outcome =
        RepairController::default().run(&pool, &constraints, constraints.budget, NO_HINTS);

    assert_eq!(outcome.resolution, Resolution::Accepted);
    assert!(outcome.is_valid());
    assert!(!outcome.was_repaired());
    assert!(outcome.initial_violations.is_empty());
    assert_eq!(outcome.stats.allocations, 1);
    assert_eq!(outcome.stats.validations, 1);
    assert_eq!(
        outcome.transitions,
        vec![
            ControllerState::Start,
            ControllerState::Allocate { with_hints: false },
            ControllerState::Validate,
            ControllerState::Accept(Resolution::Accepted),
        ]
    );
}

#[test]
fn test_invalid_hinted_attempt_is_repaired() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let outcome =
        RepairController::default().run(&pool, &constraints, constraints.budget, &["rafa"]);

    assert_eq!(outcome.resolution, Resolution::Repaired);
    assert!(outcome.is_valid());
    assert_eq!(ids(&outcome), STANDARD_SQUAD_IDS.to_vec());
    assert_eq!(outcome.total_cost, Decimal::from(100));
    assert_eq!(
        outcome
            .initial_violations
            .iter()
            .map(Violation::kind)
            .collect::<Vec<_>>(),
        vec![
            ViolationKind::SizeMismatch,
            ViolationKind::CategoryCountMismatch
        ]
    );
    assert_eq!(outcome.stats.allocations, 2);
    assert_eq!(outcome.stats.validations, 2);
    assert_eq!(
        outcome.transitions,
        vec![
            ControllerState::Start,
            ControllerState::Allocate { with_hints: true },
            ControllerState::Validate,
            ControllerState::Repair,
            ControllerState::Revalidate,
            ControllerState::Accept(Resolution::Repaired),
        ]
    );
    assert!(outcome.allocation.hints.is_empty());
}

#[test]
fn test_forced_policy_clears_violations_without_looking() {
    let scenario = Scenario::unaffordable_category();
    let controller = RepairController::new(AllocationOptions::default(), RepairPolicy::forced());
    let outcome = controller.run(
        &scenario.pool,
        &scenario.constraints,
        scenario.budget(),
        NO_HINTS,
    );

    assert_eq!(outcome.resolution, Resolution::Forced);
    assert!(outcome.violations.is_empty());
    assert_eq!(outcome.initial_violations.len(), 2);
    assert_eq!(outcome.stats.validations, 1);
    // The forced squad is still short a goalkeeper.
    assert!(!validate(&outcome.squad, &scenario.constraints).is_empty());
    assert_eq!(
        outcome.transitions.last(),
        Some(&ControllerState::Accept(Resolution::Forced))
    );
}

#[test]
fn test_unrepairable_request_is_unresolved() {
    let scenario = Scenario::unaffordable_category();
    let outcome = RepairController::default().run(
        &scenario.pool,
        &scenario.constraints,
        scenario.budget(),
        NO_HINTS,
    );

    assert_eq!(outcome.resolution, Resolution::Unresolved);
    assert!(!outcome.resolution.is_valid());
    assert_eq!(outcome.violations, outcome.initial_violations);
    assert!(outcome.violations.contains(&Violation::CategoryCountMismatch {
        category: Category::Goalkeeper,
        required: 1,
        actual: 0,
    }));
    assert_eq!(outcome.stats.allocations, 2);
}

#[test]
fn test_repair_prefers_score_and_drops_hints() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let options = AllocationOptions::default().with_prefer_score(false);
    let controller = RepairController::new(options, RepairPolicy::default());
    let outcome = controller.run(
        &pool,
        &constraints,
        constraints.budget,
        &["aaron vale", "bruno", "carl"],
    );

    assert!(outcome
        .initial_violations
        .contains(&Violation::CategoryCountMismatch {
            category: Category::Goalkeeper,
            required: 2,
            actual: 3,
        }));
    assert_eq!(outcome.resolution, Resolution::Repaired);
    assert_eq!(ids(&outcome), STANDARD_SQUAD_IDS.to_vec());
}

#[test]
fn test_open_category_scope_avoids_repair() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let config = SquadConfig::new().with_hint_scope(HintScope::OpenCategories);
    let outcome = RepairController::from_config(&config).run(
        &pool,
        &constraints,
        constraints.budget,
        &["aaron vale", "bruno", "carl"],
    );

    assert_eq!(outcome.resolution, Resolution::Accepted);
}

#[test]
fn test_from_config_reads_policy() {
    let config = SquadConfig::new().with_revalidate(false);
    let controller = RepairController::from_config(&config);
    assert_eq!(controller.policy(), RepairPolicy::forced());
    assert!(RepairController::default().policy().revalidate);
}

#[test]
fn test_listeners_see_every_state() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let counter = Arc::new(CountingEventListener::new());
    let controller = RepairController::default().with_listener(counter.clone());

    controller.run(&pool, &constraints, constraints.budget, &["rafa"]);

    assert_eq!(counter.state_entered_count(), 6);
    assert_eq!(counter.attempt_completed_count(), 2);
    assert_eq!(counter.resolved_count(), 1);
}

#[test]
fn test_state_display() {
    assert_eq!(
        ControllerState::Allocate { with_hints: true }.to_string(),
        "allocate(hints)"
    );
    assert_eq!(
        ControllerState::Accept(Resolution::Unresolved).to_string(),
        "accept(unresolved)"
    );
}
