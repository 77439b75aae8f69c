//! Greedy allocator.
//!
//! Builds a squad in up to three passes over the pool:
//!
//! 1. **Hints**: each hint selects its best name match, which is placed if
//!    it is affordable, not yet picked and its group is under the cap.
//! 2. **Quota walk**: every category with open slots walks its bucket in
//!    preference order and places items until the quota is met.
//! 3. **Fallback**: if any category is still short, unpicked items from the
//!    short categories are tried cheapest first.
//!
//! Allocation never fails. An infeasible pool yields a partial squad, which
//! the validator reports on.

mod bucket;
mod fallback;
mod hints;
mod state;

#[cfg(test)]
mod tests;

pub use bucket::SortOrder;
pub use state::Rejection;

use std::time::Instant;

use rust_decimal::Decimal;
use squadforge_config::{AllocationConfig, HintScope};
use squadforge_core::{Budget, ConstraintSet, Item, ItemId, Squad};
use tracing::{debug, trace};

use crate::stats::{AllocationStats, Pass};
use state::AllocationState;

/// Empty hint list for callers that allocate without hints.
pub const NO_HINTS: &[&str] = &[];

/// Options of a single allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationOptions {
    /// Order buckets by score first (true) or by price first (false).
    pub prefer_score: bool,
    /// Which items a hint may match.
    pub hint_scope: HintScope,
}

impl Default for AllocationOptions {
    fn default() -> Self {
        Self {
            prefer_score: true,
            hint_scope: HintScope::WholePool,
        }
    }
}

impl AllocationOptions {
    pub fn from_config(config: &AllocationConfig) -> Self {
        Self {
            prefer_score: config.prefer_score,
            hint_scope: config.hint_scope,
        }
    }

    pub fn with_prefer_score(mut self, prefer_score: bool) -> Self {
        self.prefer_score = prefer_score;
        self
    }

    pub fn with_hint_scope(mut self, hint_scope: HintScope) -> Self {
        self.hint_scope = hint_scope;
        self
    }

    fn sort_order(&self) -> SortOrder {
        SortOrder::from_prefer_score(self.prefer_score)
    }
}

/// What became of a single hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// The best match was placed.
    Placed(ItemId),
    /// No item name contains the hint.
    NoMatch,
    /// The best match failed a running constraint.
    Rejected(ItemId, Rejection),
}

/// A hint and its outcome, in the order hints were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintReport {
    pub hint: String,
    pub outcome: HintOutcome,
}

/// Result of an allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Selected items in placement order.
    pub squad: Squad,
    /// Sum of the selected items' prices.
    pub total_cost: Decimal,
    /// Per-hint outcomes.
    pub hints: Vec<HintReport>,
    pub stats: AllocationStats,
}

impl Allocation {
    /// Returns true if every quota was met.
    pub fn is_complete(&self) -> bool {
        self.stats.unmet.is_empty()
    }
}

/// Greedy squad allocator.
///
/// Stateless apart from its options; every call owns its accumulators.
///
/// # Example
///
/// ```
/// use squadforge_core::{Budget, Category, ConstraintSet, Decimal, Item};
/// use squadforge_solver::{GreedyAllocator, NO_HINTS};
///
/// let pool = vec![
///     Item::new(1, "Ada", Category::Forward, "North", Decimal::from(4), 10).unwrap(),
///     Item::new(2, "Bo", Category::Forward, "South", Decimal::from(5), 8).unwrap(),
///     Item::new(3, "Cy", Category::Forward, "East", Decimal::from(6), 6).unwrap(),
/// ];
/// let constraints = ConstraintSet::empty(Budget::from(100), 3)
///     .with_quota(Category::Forward, 2);
///
/// let allocation = GreedyAllocator::default().allocate(
///     &pool,
///     &constraints,
///     constraints.budget,
///     NO_HINTS,
/// );
/// assert_eq!(allocation.squad.len(), 2);
/// assert_eq!(allocation.total_cost, Decimal::from(9));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAllocator {
    options: AllocationOptions,
}

impl GreedyAllocator {
    pub fn new(options: AllocationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AllocationOptions {
        &self.options
    }

    /// Allocates a squad from `pool`.
    ///
    /// `budget` caps the running cost; `constraints.budget` is only read by
    /// the validator. Pass [`NO_HINTS`] to disable hint biasing.
    pub fn allocate<H: AsRef<str>>(
        &self,
        pool: &[Item],
        constraints: &ConstraintSet,
        budget: Budget,
        hints: &[H],
    ) -> Allocation {
        let start = Instant::now();
        debug!(
            event = "allocate_start",
            pool_size = pool.len(),
            target_size = constraints.target_size(),
            budget = %budget,
            hint_count = hints.len(),
            prefer_score = self.options.prefer_score,
        );

        let mut state = AllocationState::new(constraints, budget);
        let mut reports = Vec::with_capacity(hints.len());

        for hint in hints {
            let hint = hint.as_ref();
            let outcome = self.place_hint(pool, &mut state, hint);
            if !matches!(outcome, HintOutcome::Placed(_)) {
                state.stats.record_hint_skipped();
                debug!(event = "hint_skipped", hint, outcome = ?outcome);
            }
            reports.push(HintReport {
                hint: hint.to_string(),
                outcome,
            });
        }
        if !hints.is_empty() {
            pass_end(Pass::Hint, &state);
        }

        let buckets = bucket::partition(pool, self.options.sort_order());
        for (&category, &required) in &constraints.quotas {
            if required == 0 || state.open_slots(category) <= 0 {
                continue;
            }
            let Some(bucket) = buckets.get(&category) else {
                continue;
            };
            for &item in bucket {
                if state.open_slots(category) <= 0 {
                    break;
                }
                try_place(&mut state, item, Pass::Quota);
            }
        }
        pass_end(Pass::Quota, &state);

        if !state.unmet_categories().is_empty() {
            state.stats.fallback_ran = true;
            for item in fallback::candidates(pool, &state) {
                try_place(&mut state, item, Pass::Fallback);
            }
            pass_end(Pass::Fallback, &state);
        }

        state.stats.unmet = state.unmet_categories();
        let (squad, mut stats) = state.into_squad();
        stats.duration = start.elapsed();
        let total_cost = squad.total_cost();

        debug!(
            event = "allocate_end",
            squad_size = squad.len(),
            target_size = constraints.target_size(),
            total_cost = %total_cost,
            unmet = stats.unmet.len(),
            fallback = stats.fallback_ran,
            duration_ms = stats.duration.as_millis() as u64,
        );

        Allocation {
            squad,
            total_cost,
            hints: reports,
            stats,
        }
    }

    fn place_hint<'a>(
        &self,
        pool: &'a [Item],
        state: &mut AllocationState<'a>,
        hint: &str,
    ) -> HintOutcome {
        let needle = hints::normalize(hint);

        let found = match self.options.hint_scope {
            HintScope::WholePool => hints::best_match(pool, &needle),
            HintScope::OpenCategories => hints::best_match(
                pool.iter()
                    .filter(|item| state.open_slots(item.category) > 0),
                &needle,
            ),
        };
        let Some(item) = found else {
            return HintOutcome::NoMatch;
        };

        let verdict = match self.options.hint_scope {
            HintScope::WholePool => state.check(item),
            HintScope::OpenCategories => state.check_with_slot(item),
        };
        match verdict {
            Ok(()) => {
                state.accept(item, Pass::Hint);
                HintOutcome::Placed(item.id)
            }
            Err(reason) => {
                state.reject();
                HintOutcome::Rejected(item.id, reason)
            }
        }
    }
}

/// Convenience wrapper over [`GreedyAllocator`] with the default hint scope.
pub fn allocate<H: AsRef<str>>(
    pool: &[Item],
    constraints: &ConstraintSet,
    budget: Budget,
    hints: &[H],
    prefer_score: bool,
) -> Allocation {
    GreedyAllocator::new(AllocationOptions::default().with_prefer_score(prefer_score))
        .allocate(pool, constraints, budget, hints)
}

fn try_place<'a>(state: &mut AllocationState<'a>, item: &'a Item, pass: Pass) {
    match state.check_with_slot(item) {
        Ok(()) => state.accept(item, pass),
        Err(reason) => {
            state.reject();
            trace!(
                event = "candidate_rejected",
                pass = pass.as_str(),
                item = %item.id,
                reason = reason.as_str(),
            );
        }
    }
}

fn pass_end(pass: Pass, state: &AllocationState<'_>) {
    let stats = &state.stats;
    let picks = match pass {
        Pass::Hint => stats.hint_picks,
        Pass::Quota => stats.quota_picks,
        Pass::Fallback => stats.fallback_picks,
    };
    debug!(
        event = "pass_end",
        pass = pass.as_str(),
        picks,
        remaining_budget = %state.remaining_budget(),
        unmet = state.unmet_categories().len(),
    );
}
