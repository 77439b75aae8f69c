//! SquadForge Solver
//!
//! This crate provides the allocation engine:
//! - Greedy allocator (hints, per-category quota walk, cheapest-first fallback)
//! - Constraint validator reporting every violation at once
//! - Repair controller with a single bounded retry
//! - Event system for monitoring the controller
//! - Run statistics

pub mod allocator;
pub mod event;
pub mod repair;
pub mod stats;
pub mod validator;

pub use allocator::{
    allocate, Allocation, AllocationOptions, GreedyAllocator, HintOutcome, HintReport, Rejection,
    SortOrder, NO_HINTS,
};
pub use event::{
    CountingEventListener, LoggingEventListener, RepairEventListener, RepairEventSupport,
};
pub use repair::{ControllerState, RepairController, RepairOutcome, RepairPolicy, Resolution};
pub use stats::{AllocationStats, ControllerStats, Pass};
pub use validator::{is_valid, validate};
