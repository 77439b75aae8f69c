//! Event system for monitoring the repair controller.
//!
//! Listeners registered on a [`RepairController`](crate::RepairController)
//! are notified as it moves through its states, after each attempt is
//! judged, and once with the final outcome.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use squadforge_solver::event::{CountingEventListener, RepairEventSupport};
//! use squadforge_solver::ControllerState;
//!
//! let counter = Arc::new(CountingEventListener::new());
//! let mut support = RepairEventSupport::new();
//! support.add_listener(counter.clone());
//!
//! support.fire_state_entered(ControllerState::Start);
//! assert_eq!(counter.state_entered_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use squadforge_core::Violation;
use tracing::info;

use crate::allocator::Allocation;
use crate::repair::{ControllerState, RepairOutcome};

/// Listener for controller events.
///
/// All methods are called synchronously on the thread running the request.
pub trait RepairEventListener: Send + Sync + Debug {
    /// Called when the controller enters a state.
    fn on_state_entered(&self, state: ControllerState);

    /// Called once an attempt's violations are known.
    ///
    /// # Arguments
    ///
    /// * `attempt` - 1 for the first allocation, 2 for the repair
    /// * `allocation` - The allocation that was judged
    /// * `violations` - Its violations; empty when accepted unchecked
    fn on_attempt_completed(
        &self,
        _attempt: u32,
        _allocation: &Allocation,
        _violations: &[Violation],
    ) {
    }

    /// Called once with the final outcome.
    fn on_resolved(&self, _outcome: &RepairOutcome) {}
}

/// Central event broadcaster for controller events.
///
/// Listeners are called in registration order.
#[derive(Default)]
pub struct RepairEventSupport {
    listeners: Vec<Arc<dyn RepairEventListener>>,
}

impl RepairEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn RepairEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn fire_state_entered(&self, state: ControllerState) {
        for listener in &self.listeners {
            listener.on_state_entered(state);
        }
    }

    pub fn fire_attempt_completed(
        &self,
        attempt: u32,
        allocation: &Allocation,
        violations: &[Violation],
    ) {
        for listener in &self.listeners {
            listener.on_attempt_completed(attempt, allocation, violations);
        }
    }

    pub fn fire_resolved(&self, outcome: &RepairOutcome) {
        for listener in &self.listeners {
            listener.on_resolved(outcome);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Debug for RepairEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepairEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A listener that reports events through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging listener with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl RepairEventListener for LoggingEventListener {
    fn on_state_entered(&self, state: ControllerState) {
        info!(
            event = "state_entered",
            prefix = %self.prefix,
            state = %state,
        );
    }

    fn on_attempt_completed(&self, attempt: u32, allocation: &Allocation, violations: &[Violation]) {
        info!(
            event = "attempt_completed",
            prefix = %self.prefix,
            attempt,
            squad_size = allocation.squad.len(),
            total_cost = %allocation.total_cost,
            violations = violations.len(),
        );
    }

    fn on_resolved(&self, outcome: &RepairOutcome) {
        info!(
            event = "resolved",
            prefix = %self.prefix,
            resolution = outcome.resolution.as_str(),
            violations = outcome.violations.len(),
        );
    }
}

/// A listener that counts event occurrences.
///
/// Useful for testing.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    state_entered_count: AtomicUsize,
    attempt_completed_count: AtomicUsize,
    resolved_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_entered_count(&self) -> usize {
        self.state_entered_count.load(Ordering::SeqCst)
    }

    pub fn attempt_completed_count(&self) -> usize {
        self.attempt_completed_count.load(Ordering::SeqCst)
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.state_entered_count.store(0, Ordering::SeqCst);
        self.attempt_completed_count.store(0, Ordering::SeqCst);
        self.resolved_count.store(0, Ordering::SeqCst);
    }
}

impl RepairEventListener for CountingEventListener {
    fn on_state_entered(&self, _state: ControllerState) {
        self.state_entered_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_attempt_completed(
        &self,
        _attempt: u32,
        _allocation: &Allocation,
        _violations: &[Violation],
    ) {
        self.attempt_completed_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_resolved(&self, _outcome: &RepairOutcome) {
        self.resolved_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
