//! Allocation and controller statistics.
//!
//! Plain counters recorded while a request is processed, reported through
//! tracing events and returned with every outcome.

use std::time::{Duration, Instant};

use squadforge_core::Category;

/// Which pass of the allocator placed an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Hints honored before the regular passes.
    Hint,
    /// Per-category walk in preference order.
    Quota,
    /// Cheapest-first fill of categories still short.
    Fallback,
}

impl Pass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Pass::Hint => "hint",
            Pass::Quota => "quota",
            Pass::Fallback => "fallback",
        }
    }
}

/// Statistics for a single allocation run.
///
/// # Example
///
/// ```
/// use squadforge_solver::stats::{AllocationStats, Pass};
///
/// let mut stats = AllocationStats::default();
/// stats.record_pick(Pass::Hint);
/// stats.record_pick(Pass::Quota);
/// stats.record_rejection();
///
/// assert_eq!(stats.hint_picks, 1);
/// assert_eq!(stats.total_picks(), 2);
/// assert_eq!(stats.candidates_evaluated, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationStats {
    /// Items placed by hints.
    pub hint_picks: u64,
    /// Items placed by the per-category walk.
    pub quota_picks: u64,
    /// Items placed by the fallback pass.
    pub fallback_picks: u64,
    /// Hints that were unmatched or rejected.
    pub hints_skipped: u64,
    /// Candidates checked against the running constraints.
    pub candidates_evaluated: u64,
    /// Whether the fallback pass ran at all.
    pub fallback_ran: bool,
    /// Categories still short after every pass.
    pub unmet: Vec<Category>,
    /// Wall time of the run.
    pub duration: Duration,
}

impl AllocationStats {
    /// Records an accepted candidate.
    pub fn record_pick(&mut self, pass: Pass) {
        self.candidates_evaluated += 1;
        match pass {
            Pass::Hint => self.hint_picks += 1,
            Pass::Quota => self.quota_picks += 1,
            Pass::Fallback => self.fallback_picks += 1,
        }
    }

    /// Records a rejected candidate.
    pub fn record_rejection(&mut self) {
        self.candidates_evaluated += 1;
    }

    /// Records a hint that placed nothing.
    pub fn record_hint_skipped(&mut self) {
        self.hints_skipped += 1;
    }

    /// Returns the number of items placed across all passes.
    pub fn total_picks(&self) -> u64 {
        self.hint_picks + self.quota_picks + self.fallback_picks
    }
}

/// Controller-level statistics.
///
/// Tracks work done across both attempts of a request.
///
/// # Example
///
/// ```
/// use squadforge_solver::stats::ControllerStats;
///
/// let mut stats = ControllerStats::default();
/// stats.start();
/// stats.record_allocation();
/// stats.record_validation(2);
///
/// assert_eq!(stats.allocations, 1);
/// assert_eq!(stats.violations_seen, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControllerStats {
    start_time: Option<Instant>,
    /// Allocator runs performed (at most two).
    pub allocations: u32,
    /// Validator runs performed.
    pub validations: u32,
    /// Violations reported across all validations.
    pub violations_seen: u64,
}

impl ControllerStats {
    /// Marks the start of a request.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since the request started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_allocation(&mut self) {
        self.allocations += 1;
    }

    pub fn record_validation(&mut self, violation_count: usize) {
        self.validations += 1;
        self.violations_seen += violation_count as u64;
    }
}
