//! Tests for the greedy allocator.

use super::*;
use squadforge_core::Category;
use squadforge_test::{item, price, standard_constraints, standard_pool, Scenario};

fn ids(allocation: &Allocation) -> Vec<u32> {
    allocation.squad.iter().map(|item| item.id.0).collect()
}

fn run<H: AsRef<str>>(scenario: &Scenario, hints: &[H]) -> Allocation {
    GreedyAllocator::default().allocate(
        &scenario.pool,
        &scenario.constraints,
        scenario.budget(),
        hints,
    )
}

#[test]
fn test_score_first_picks_highest_scores() {
    let scenario = Scenario::cheapest_pair_by_score();
    let allocation = run(&scenario, NO_HINTS);

    assert_eq!(ids(&allocation), vec![1, 2]);
    assert_eq!(allocation.total_cost, price(90));
    assert!(allocation.is_complete());
    assert!(!allocation.stats.fallback_ran);
    assert_eq!(allocation.stats.quota_picks, 2);
}

#[test]
fn test_allocation_budget_is_separate_from_constraints() {
    let scenario = Scenario::cheapest_pair_by_score();
    let allocator = GreedyAllocator::default();

    let tight = allocator.allocate(
        &scenario.pool,
        &scenario.constraints,
        Budget::from(9),
        NO_HINTS,
    );
    assert_eq!(ids(&tight), vec![1, 2]);

    let tighter = allocator.allocate(
        &scenario.pool,
        &scenario.constraints,
        Budget::from(8),
        NO_HINTS,
    );
    assert_eq!(ids(&tighter), vec![1]);
    assert_eq!(tighter.stats.unmet, vec![Category::Forward]);
}

#[test]
fn test_unaffordable_category_stays_unmet() {
    let scenario = Scenario::unaffordable_category();
    let allocation = run(&scenario, NO_HINTS);

    assert_eq!(ids(&allocation), vec![3]);
    assert_eq!(allocation.stats.unmet, vec![Category::Goalkeeper]);
    assert!(allocation.stats.fallback_ran);
    assert_eq!(allocation.stats.fallback_picks, 0);
    assert!(allocation.total_cost <= scenario.budget().amount());
}

#[test]
fn test_single_group_fills_one_category() {
    let scenario = Scenario::single_group();
    let allocation = run(&scenario, NO_HINTS);

    assert_eq!(ids(&allocation), vec![1]);
    assert_eq!(allocation.stats.unmet, vec![Category::Forward]);
}

#[test]
fn test_empty_pool_yields_empty_squad() {
    let allocation = GreedyAllocator::default().allocate(
        &[],
        &standard_constraints(),
        Budget::from(100),
        NO_HINTS,
    );

    assert!(allocation.squad.is_empty());
    assert_eq!(allocation.total_cost, Decimal::ZERO);
    assert_eq!(allocation.stats.unmet, Category::ALL.to_vec());
}

#[test]
fn test_standard_pool_fills_every_quota() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let allocation =
        GreedyAllocator::default().allocate(&pool, &constraints, constraints.budget, NO_HINTS);

    assert_eq!(ids(&allocation), squadforge_test::pool::STANDARD_SQUAD_IDS.to_vec());
    assert_eq!(allocation.total_cost, Decimal::from(100));
    assert!(allocation.is_complete());
    for count in allocation.squad.count_by_group().values() {
        assert!(*count <= 3);
    }
}

#[test]
fn test_price_first_picks_cheapest() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let options = AllocationOptions::default().with_prefer_score(false);
    let allocation =
        GreedyAllocator::new(options).allocate(&pool, &constraints, constraints.budget, NO_HINTS);

    assert_eq!(allocation.squad.len(), 15);
    assert_eq!(allocation.total_cost, price(715));
    let keepers: Vec<&str> = allocation
        .squad
        .iter()
        .filter(|item| item.category == Category::Goalkeeper)
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(keepers, vec!["Emil Roth", "Felix Mond"]);
}

#[test]
fn test_ties_break_by_name_then_id() {
    let pool = vec![
        item(3, "Same", Category::Defender, "A", 50, 10),
        item(2, "Same", Category::Defender, "B", 50, 10),
        item(1, "Zed", Category::Defender, "C", 50, 10),
    ];
    let constraints = ConstraintSet::empty(Budget::from(100), 3).with_quota(Category::Defender, 2);
    let allocation = allocate(&pool, &constraints, constraints.budget, NO_HINTS, true);

    assert_eq!(ids(&allocation), vec![2, 3]);
}

#[test]
fn test_duplicate_ids_only_first_selectable() {
    let pool = vec![
        item(1, "Alpha", Category::Forward, "North", 40, 10),
        item(1, "Alpha copy", Category::Forward, "South", 40, 10),
    ];
    let constraints = ConstraintSet::empty(Budget::from(100), 3).with_quota(Category::Forward, 2);
    let allocation = allocate(&pool, &constraints, constraints.budget, NO_HINTS, true);

    assert_eq!(allocation.squad.len(), 1);
    assert_eq!(allocation.squad.items()[0].name, "Alpha");
}

#[test]
fn test_hint_is_placed_first() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let allocation =
        GreedyAllocator::default().allocate(&pool, &constraints, constraints.budget, &["rafa"]);

    assert_eq!(allocation.squad.items()[0].name, "Rafa Lemos");
    assert_eq!(
        allocation.hints,
        vec![HintReport {
            hint: "rafa".to_string(),
            outcome: HintOutcome::Placed(ItemId(18)),
        }]
    );
    assert_eq!(allocation.stats.hint_picks, 1);
    // The expensive midfielder crowds out the third forward.
    assert_eq!(allocation.stats.unmet, vec![Category::Forward]);
    assert_eq!(allocation.total_cost, Decimal::from(99));
}

#[test]
fn test_blank_hint_matches_best_item_in_pool() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let allocation = GreedyAllocator::default().allocate(
        &pool,
        &constraints,
        constraints.budget,
        &["  ", "nobody", "a"],
    );

    let outcomes: Vec<_> = allocation.hints.iter().map(|r| r.outcome.clone()).collect();
    assert_eq!(
        outcomes,
        vec![
            HintOutcome::Placed(ItemId(17)),
            HintOutcome::NoMatch,
            HintOutcome::Placed(ItemId(27)),
        ]
    );
    assert_eq!(allocation.stats.hint_picks, 2);
    assert_eq!(allocation.stats.hints_skipped, 1);
    assert!(allocation.is_complete());
    assert_eq!(allocation.total_cost, Decimal::from(100));
}

#[test]
fn test_blank_hint_ignores_price_first_order() {
    let pool = vec![
        item(1, "Low", Category::Forward, "North", 10, 1),
        item(2, "Star", Category::Forward, "South", 90, 99),
    ];
    let constraints = ConstraintSet::empty(Budget::from(100), 3).with_quota(Category::Forward, 1);
    let allocation = GreedyAllocator::new(AllocationOptions::default().with_prefer_score(false))
        .allocate(&pool, &constraints, constraints.budget, &[""]);

    assert_eq!(allocation.hints[0].outcome, HintOutcome::Placed(ItemId(2)));
    assert_eq!(ids(&allocation), vec![2]);
    assert_eq!(allocation.stats.quota_picks, 0);
}

#[test]
fn test_hint_match_is_case_insensitive_and_trimmed() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let allocation = GreedyAllocator::default().allocate(
        &pool,
        &constraints,
        constraints.budget,
        &["  QUINN rowe "],
    );

    assert_eq!(allocation.hints[0].outcome, HintOutcome::Placed(ItemId(17)));
}

#[test]
fn test_repeated_hint_is_rejected_as_picked() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let allocation = GreedyAllocator::default().allocate(
        &pool,
        &constraints,
        constraints.budget,
        &["rafa", "Rafa Lemos"],
    );

    assert_eq!(
        allocation.hints[1].outcome,
        HintOutcome::Rejected(ItemId(18), Rejection::AlreadyPicked)
    );
}

#[test]
fn test_hint_over_budget_is_rejected() {
    let scenario = Scenario::unaffordable_category();
    let allocation = run(&scenario, &["hank"]);

    assert_eq!(
        allocation.hints[0].outcome,
        HintOutcome::Rejected(ItemId(2), Rejection::OverBudget)
    );
    assert!(!allocation.squad.contains(ItemId(2)));
}

#[test]
fn test_hint_at_group_cap_is_rejected() {
    let scenario = Scenario::single_group();
    let allocation = run(&scenario, &["jo", "kit"]);

    assert_eq!(
        allocation.hints[1].outcome,
        HintOutcome::Rejected(ItemId(2), Rejection::GroupAtCap)
    );
}

#[test]
fn test_whole_pool_hints_can_overfill_a_category() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let hints = ["aaron vale", "bruno", "carl"];
    let allocation =
        GreedyAllocator::default().allocate(&pool, &constraints, constraints.budget, &hints);

    assert!(allocation
        .hints
        .iter()
        .all(|r| matches!(r.outcome, HintOutcome::Placed(_))));
    assert_eq!(allocation.squad.count_in(Category::Goalkeeper), 3);
}

#[test]
fn test_open_category_hints_never_overfill() {
    let pool = standard_pool();
    let constraints = standard_constraints();
    let hints = ["aaron vale", "bruno", "carl"];
    let options = AllocationOptions::default().with_hint_scope(HintScope::OpenCategories);
    let allocation =
        GreedyAllocator::new(options).allocate(&pool, &constraints, constraints.budget, &hints);

    assert_eq!(allocation.hints[2].outcome, HintOutcome::NoMatch);
    assert_eq!(allocation.squad.count_in(Category::Goalkeeper), 2);
    assert!(allocation.is_complete());
    assert_eq!(allocation.total_cost, Decimal::from(100));
}

#[test]
fn test_options_from_config() {
    let config = AllocationConfig {
        prefer_score: false,
        hint_scope: HintScope::OpenCategories,
    };
    let options = AllocationOptions::from_config(&config);
    assert!(!options.prefer_score);
    assert_eq!(options.hint_scope, HintScope::OpenCategories);
    assert_eq!(AllocationOptions::default().hint_scope, HintScope::WholePool);
}

#[test]
fn test_sort_order_compare() {
    let cheap = item(1, "Cheap", Category::Forward, "A", 40, 50);
    let star = item(2, "Star", Category::Forward, "B", 90, 200);

    assert_eq!(
        SortOrder::ScoreFirst.compare(&star, &cheap),
        std::cmp::Ordering::Less
    );
    assert_eq!(
        SortOrder::PriceFirst.compare(&cheap, &star),
        std::cmp::Ordering::Less
    );
    assert_eq!(SortOrder::from_prefer_score(false), SortOrder::PriceFirst);
}
