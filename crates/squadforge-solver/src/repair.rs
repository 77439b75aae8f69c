//! Repair controller.
//!
//! Runs one request through a bounded state machine:
//!
//! ```text
//! Start -> Allocate { with_hints } -> Validate -> Accept(Accepted)
//!                                              -> Repair -> Revalidate -> Accept(Repaired | Unresolved)
//!                                                        -> Accept(Forced)
//! ```
//!
//! The repair allocation runs without hints and prefers score. At most two
//! allocations and two validations happen per request.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use squadforge_config::{RepairConfig, SquadConfig};
use squadforge_core::{Budget, ConstraintSet, Item, Squad, Violation};
use tracing::info;

use crate::allocator::{Allocation, AllocationOptions, GreedyAllocator, NO_HINTS};
use crate::event::{RepairEventListener, RepairEventSupport};
use crate::stats::ControllerStats;
use crate::validator::validate;

#[cfg(test)]
#[path = "repair_tests.rs"]
mod tests;

/// How the controller treats the repaired squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairPolicy {
    /// Validate the repaired squad; when false, its violations are cleared
    /// without looking.
    pub revalidate: bool,
}

impl Default for RepairPolicy {
    fn default() -> Self {
        Self { revalidate: true }
    }
}

impl RepairPolicy {
    pub fn from_config(config: &RepairConfig) -> Self {
        Self {
            revalidate: config.revalidate,
        }
    }

    /// Clears violations after repair without validating again.
    pub fn forced() -> Self {
        Self { revalidate: false }
    }
}

/// How a request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The first attempt was valid.
    Accepted,
    /// The repair attempt validated clean.
    Repaired,
    /// The repair attempt still has violations.
    Unresolved,
    /// The repair attempt was accepted without validation.
    Forced,
}

impl Resolution {
    pub const fn as_str(self) -> &'static str {
        match self {
            Resolution::Accepted => "accepted",
            Resolution::Repaired => "repaired",
            Resolution::Unresolved => "unresolved",
            Resolution::Forced => "forced",
        }
    }

    /// Returns true if the final squad is known to be valid.
    pub fn is_valid(self) -> bool {
        matches!(self, Resolution::Accepted | Resolution::Repaired)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state of the controller, as recorded in [`RepairOutcome::transitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    Start,
    Allocate { with_hints: bool },
    Validate,
    Repair,
    Revalidate,
    Accept(Resolution),
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerState::Start => f.write_str("start"),
            ControllerState::Allocate { with_hints: true } => f.write_str("allocate(hints)"),
            ControllerState::Allocate { with_hints: false } => f.write_str("allocate(no_hints)"),
            ControllerState::Validate => f.write_str("validate"),
            ControllerState::Repair => f.write_str("repair"),
            ControllerState::Revalidate => f.write_str("revalidate"),
            ControllerState::Accept(resolution) => write!(f, "accept({})", resolution),
        }
    }
}

/// Final result of a request.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub squad: Squad,
    pub total_cost: Decimal,
    /// Violations of the final squad, empty unless `resolution` is
    /// [`Resolution::Unresolved`].
    pub violations: Vec<Violation>,
    /// Violations of the first attempt that triggered the repair.
    pub initial_violations: Vec<Violation>,
    pub resolution: Resolution,
    /// Every state entered, in order.
    pub transitions: Vec<ControllerState>,
    /// The allocation that produced `squad`.
    pub allocation: Allocation,
    pub stats: ControllerStats,
}

impl RepairOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn was_repaired(&self) -> bool {
        !matches!(self.resolution, Resolution::Accepted)
    }
}

enum Stage {
    Start,
    Allocate {
        with_hints: bool,
    },
    Validate(Allocation),
    Repair {
        initial_violations: Vec<Violation>,
    },
    Revalidate {
        allocation: Allocation,
        initial_violations: Vec<Violation>,
    },
    Accept {
        allocation: Allocation,
        violations: Vec<Violation>,
        initial_violations: Vec<Violation>,
        resolution: Resolution,
    },
}

impl Stage {
    fn state(&self) -> ControllerState {
        match self {
            Stage::Start => ControllerState::Start,
            Stage::Allocate { with_hints } => ControllerState::Allocate {
                with_hints: *with_hints,
            },
            Stage::Validate(_) => ControllerState::Validate,
            Stage::Repair { .. } => ControllerState::Repair,
            Stage::Revalidate { .. } => ControllerState::Revalidate,
            Stage::Accept { resolution, .. } => ControllerState::Accept(*resolution),
        }
    }
}

/// Allocate, validate and repair at most once.
///
/// Constructed per request from configuration; holds no state between runs
/// apart from registered listeners.
///
/// # Example
///
/// ```
/// use squadforge_core::{Budget, Category, ConstraintSet, Decimal, Item};
/// use squadforge_solver::{RepairController, Resolution};
///
/// let pool = vec![
///     Item::new(1, "Ada", Category::Goalkeeper, "North", Decimal::from(5), 50).unwrap(),
///     Item::new(2, "Bo", Category::Forward, "South", Decimal::from(7), 80).unwrap(),
/// ];
/// let constraints = ConstraintSet::empty(Budget::from(20), 1)
///     .with_quota(Category::Goalkeeper, 1)
///     .with_quota(Category::Forward, 1);
///
/// let outcome = RepairController::default().run(&pool, &constraints, constraints.budget, &["bo"]);
/// assert_eq!(outcome.resolution, Resolution::Accepted);
/// assert_eq!(outcome.total_cost, Decimal::from(12));
/// ```
#[derive(Debug, Default)]
pub struct RepairController {
    allocator: GreedyAllocator,
    repair_allocator: GreedyAllocator,
    policy: RepairPolicy,
    events: RepairEventSupport,
}

impl RepairController {
    /// Creates a controller; the repair attempt keeps the hint scope but
    /// always prefers score.
    pub fn new(options: AllocationOptions, policy: RepairPolicy) -> Self {
        Self {
            allocator: GreedyAllocator::new(options),
            repair_allocator: GreedyAllocator::new(options.with_prefer_score(true)),
            policy,
            events: RepairEventSupport::new(),
        }
    }

    pub fn from_config(config: &SquadConfig) -> Self {
        Self::new(
            AllocationOptions::from_config(&config.allocation),
            RepairPolicy::from_config(&config.repair),
        )
    }

    /// Registers a listener for controller events.
    pub fn with_listener(mut self, listener: Arc<dyn RepairEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn policy(&self) -> RepairPolicy {
        self.policy
    }

    /// Runs one request to completion.
    pub fn run<H: AsRef<str>>(
        &self,
        pool: &[Item],
        constraints: &ConstraintSet,
        budget: Budget,
        hints: &[H],
    ) -> RepairOutcome {
        let mut stats = ControllerStats::default();
        stats.start();
        info!(
            event = "solve_start",
            pool_size = pool.len(),
            target_size = constraints.target_size(),
            budget = %budget,
            hint_count = hints.len(),
            revalidate = self.policy.revalidate,
        );

        let mut transitions = Vec::new();
        let mut attempt = 0u32;
        let mut stage = Stage::Start;

        let (allocation, violations, initial_violations, resolution) = loop {
            let state = stage.state();
            transitions.push(state);
            self.events.fire_state_entered(state);

            stage = match stage {
                Stage::Start => Stage::Allocate {
                    with_hints: !hints.is_empty(),
                },
                Stage::Allocate { with_hints } => {
                    attempt += 1;
                    stats.record_allocation();
                    let allocation = if with_hints {
                        self.allocator.allocate(pool, constraints, budget, hints)
                    } else {
                        self.allocator.allocate(pool, constraints, budget, NO_HINTS)
                    };
                    Stage::Validate(allocation)
                }
                Stage::Validate(allocation) => {
                    let violations = validate(&allocation.squad, constraints);
                    stats.record_validation(violations.len());
                    self.events
                        .fire_attempt_completed(attempt, &allocation, &violations);
                    if violations.is_empty() {
                        Stage::Accept {
                            allocation,
                            violations,
                            initial_violations: Vec::new(),
                            resolution: Resolution::Accepted,
                        }
                    } else {
                        Stage::Repair {
                            initial_violations: violations,
                        }
                    }
                }
                Stage::Repair { initial_violations } => {
                    info!(
                        event = "repair_start",
                        violations = initial_violations.len(),
                        revalidate = self.policy.revalidate,
                    );
                    attempt += 1;
                    stats.record_allocation();
                    let allocation =
                        self.repair_allocator
                            .allocate(pool, constraints, budget, NO_HINTS);
                    if self.policy.revalidate {
                        Stage::Revalidate {
                            allocation,
                            initial_violations,
                        }
                    } else {
                        self.events.fire_attempt_completed(attempt, &allocation, &[]);
                        Stage::Accept {
                            allocation,
                            violations: Vec::new(),
                            initial_violations,
                            resolution: Resolution::Forced,
                        }
                    }
                }
                Stage::Revalidate {
                    allocation,
                    initial_violations,
                } => {
                    let violations = validate(&allocation.squad, constraints);
                    stats.record_validation(violations.len());
                    self.events
                        .fire_attempt_completed(attempt, &allocation, &violations);
                    let resolution = if violations.is_empty() {
                        Resolution::Repaired
                    } else {
                        Resolution::Unresolved
                    };
                    Stage::Accept {
                        allocation,
                        violations,
                        initial_violations,
                        resolution,
                    }
                }
                Stage::Accept {
                    allocation,
                    violations,
                    initial_violations,
                    resolution,
                } => break (allocation, violations, initial_violations, resolution),
            };
        };

        info!(
            event = "solve_end",
            resolution = resolution.as_str(),
            squad_size = allocation.squad.len(),
            total_cost = %allocation.total_cost,
            violations = violations.len(),
            allocations = stats.allocations,
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        let outcome = RepairOutcome {
            squad: allocation.squad.clone(),
            total_cost: allocation.total_cost,
            violations,
            initial_violations,
            resolution,
            transitions,
            allocation,
            stats,
        };
        self.events.fire_resolved(&outcome);
        outcome
    }
}
