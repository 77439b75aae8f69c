//! SquadForge Core - Domain types for constrained squad allocation
//!
//! This crate provides the value types shared by every SquadForge crate:
//! - Candidate items and their closed category set
//! - Budgets and constraint sets
//! - Squads produced by allocation
//! - Violations reported by validation

pub mod domain;
pub mod error;

pub use domain::{
    Budget, Category, ConstraintSet, Item, ItemId, Squad, Violation, ViolationKind,
};
pub use error::SquadForgeError;

/// Decimal type used for prices, budgets and costs.
pub use rust_decimal::Decimal;
