//! SquadForge - Constrained Squad Allocation in Rust
//!
//! Greedy allocation under quotas, a budget and a per-group cap, a validator
//! that reports every violation, and a controller that repairs at most once.
//!
//! # Example
//!
//! ```rust
//! use squadforge::prelude::*;
//!
//! let engine = Engine::new(SquadConfig::default()).unwrap();
//! let response = engine.solve(SolveRequest {
//!     pool: Vec::new(),
//!     constraints: None,
//!     budget: None,
//!     hints: Vec::new(),
//!     prefer_score: None,
//! });
//! assert_eq!(response.resolution, "unresolved");
//! assert!(response.squad.is_empty());
//! ```

pub mod error;
pub mod hints;
pub mod operation;
pub mod source;
pub mod wire;


pub use error::{HintError, RecordError, RequestError, SourceError};
pub use hints::{parse_hint_payload, resolve_hints, HintSource, PayloadHintSource, StaticHintSource};
pub use operation::{Engine, Operation, OperationOutput};
pub use source::{collect_pool, BootstrapPoolSource, CollectedPool, PoolSource, StaticPoolSource};
pub use wire::{
    ProposeRequest, ProposeResponse, SolveRequest, SolveResponse, ValidateRequest,
    ValidateResponse,
};

pub use squadforge_config::{HintScope, SquadConfig};
pub use squadforge_core::{
    Budget, Category, ConstraintSet, Decimal, Item, ItemId, Squad, Violation, ViolationKind,
};
pub use squadforge_solver::{
    validate, GreedyAllocator, RepairController, RepairOutcome, RepairPolicy, Resolution,
};

/// Console output, available with the `console` feature.
#[cfg(feature = "console")]
pub use squadforge_console as console;

pub mod prelude {
    pub use super::{
        Budget, Category, ConstraintSet, Decimal, Engine, Item, ItemId, Operation,
        OperationOutput, Squad, SquadConfig, Violation,
    };
    pub use super::{ProposeRequest, SolveRequest, ValidateRequest};
    pub use super::{GreedyAllocator, RepairController, Resolution};
}
