//! Property-based tests for allocation and validation.
//!
//! These tests verify that:
//! - Allocated squads never repeat an id, exceed a group cap or the budget
//! - Validation ignores item order and returns the same list every time
//! - An exact, affordable hint always lands in the squad

use proptest::prelude::*;
use squadforge_config::HintScope;
use squadforge_core::{Budget, Category, ConstraintSet, Decimal, Item, Squad};
use squadforge_solver::{validate, AllocationOptions, GreedyAllocator, NO_HINTS};

const GROUPS: [&str; 5] = ["North", "South", "East", "West", "Centre"];

/// Strategy to generate a pool with unique ids and unique names.
fn arb_pool() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0usize..4, 0usize..GROUPS.len(), 0i64..150, 0u32..300), 0..40)
        .prop_map(|rows| {
            rows.into_iter()
                .zip(1u32..)
                .map(|((category, group, tenths, score), id)| {
                    Item::new(
                        id,
                        format!("P{id}X"),
                        Category::ALL[category],
                        GROUPS[group],
                        Decimal::new(tenths, 1),
                        score,
                    )
                    .unwrap()
                })
                .collect()
        })
}

/// Strategy to generate a constraint set.
fn arb_constraints() -> impl Strategy<Value = ConstraintSet> {
    (prop::array::uniform4(0u32..5), 0u32..4, 0u32..1000).prop_map(|(quotas, cap, budget)| {
        let budget = Budget::new(Decimal::new(i64::from(budget), 1)).unwrap();
        Category::ALL
            .into_iter()
            .zip(quotas)
            .fold(ConstraintSet::empty(budget, cap), |set, (category, count)| {
                set.with_quota(category, count)
            })
    })
}

fn arb_options() -> impl Strategy<Value = AllocationOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(prefer_score, open)| {
        AllocationOptions::default()
            .with_prefer_score(prefer_score)
            .with_hint_scope(if open {
                HintScope::OpenCategories
            } else {
                HintScope::WholePool
            })
    })
}

proptest! {
    /// Allocated squads respect ids, group caps and the budget.
    #[test]
    fn allocation_respects_running_constraints(
        pool in arb_pool(),
        constraints in arb_constraints(),
        options in arb_options(),
        hint_ids in prop::collection::vec(1u32..45, 0..4),
    ) {
        let hints: Vec<String> = hint_ids.iter().map(|id| format!("p{id}x")).collect();
        let allocation = GreedyAllocator::new(options)
            .allocate(&pool, &constraints, constraints.budget, &hints);

        let mut seen = std::collections::HashSet::new();
        for item in &allocation.squad {
            prop_assert!(seen.insert(item.id));
        }
        for count in allocation.squad.count_by_group().values() {
            prop_assert!(*count <= constraints.max_per_group as usize);
        }
        prop_assert!(allocation.total_cost <= constraints.budget.amount());
        prop_assert_eq!(allocation.total_cost, allocation.squad.total_cost());
    }

    /// Without hints no category is ever filled past its quota.
    #[test]
    fn allocation_never_overfills_without_hints(
        pool in arb_pool(),
        constraints in arb_constraints(),
        prefer_score in any::<bool>(),
    ) {
        let options = AllocationOptions::default().with_prefer_score(prefer_score);
        let allocation = GreedyAllocator::new(options)
            .allocate(&pool, &constraints, constraints.budget, NO_HINTS);

        for (category, count) in allocation.squad.count_by_category() {
            prop_assert!(count <= constraints.required(category) as usize);
        }
        prop_assert!(allocation.squad.len() <= constraints.target_size());
    }

    /// Permuting a squad does not change its violations.
    #[test]
    fn validation_is_order_independent(
        (items, shuffled) in arb_pool().prop_flat_map(|items| {
            let shuffled = Just(items.clone()).prop_shuffle();
            (Just(items), shuffled)
        }),
        constraints in arb_constraints(),
    ) {
        let squad = Squad::new(items);
        let permuted = Squad::new(shuffled);
        prop_assert_eq!(validate(&squad, &constraints), validate(&permuted, &constraints));
    }

    /// Validating the same squad twice gives the same list.
    #[test]
    fn validation_is_deterministic(
        pool in arb_pool(),
        constraints in arb_constraints(),
    ) {
        let squad = Squad::new(pool);
        let first = validate(&squad, &constraints);
        prop_assert_eq!(&first, &validate(&squad, &constraints));
        if first.is_empty() {
            prop_assert!(validate(&squad, &constraints).is_empty());
        }
    }

    /// An exact hint for an affordable item with an open slot is honored.
    #[test]
    fn exact_hint_is_honored(
        pool in arb_pool().prop_filter("non-empty", |pool| !pool.is_empty()),
        constraints in arb_constraints(),
        pick in any::<prop::sample::Index>(),
        open in any::<bool>(),
    ) {
        let target = pick.get(&pool).clone();
        prop_assume!(target.price <= constraints.budget.amount());
        prop_assume!(constraints.max_per_group > 0);
        prop_assume!(constraints.required(target.category) > 0);

        let scope = if open { HintScope::OpenCategories } else { HintScope::WholePool };
        let options = AllocationOptions::default().with_hint_scope(scope);
        let hints = [target.name.to_uppercase()];
        let allocation = GreedyAllocator::new(options)
            .allocate(&pool, &constraints, constraints.budget, &hints);

        prop_assert!(allocation.squad.contains(target.id));
    }
}
