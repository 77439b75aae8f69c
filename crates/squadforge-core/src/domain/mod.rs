//! Domain model for squad allocation.
//!
//! All types here are plain values. Invariants that can be expressed in the
//! type system are (non-negative budgets, the closed category set); the
//! squad-level constraints are checked by the validator, not enforced here.

mod constraints;
mod item;
mod squad;
mod violation;


pub use constraints::{Budget, ConstraintSet};
pub use item::{Category, Item, ItemId};
pub use squad::Squad;
pub use violation::{Violation, ViolationKind};
