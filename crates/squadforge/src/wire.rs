//! Request and response types.
//!
//! Field names follow the agent tooling that drives the engine:
//! `player_pool`, `seed_names` and `budget_used` are accepted or emitted as
//! written there. Constraints and budgets are optional in requests and fall
//! back to the engine configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use squadforge_core::{Budget, ConstraintSet, Item, Squad, Violation};

/// Allocate once, without validation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProposeRequest {
    #[serde(alias = "pool")]
    pub player_pool: Vec<Item>,
    #[serde(default)]
    pub constraints: Option<ConstraintSet>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default, alias = "seed_names")]
    pub hints: Vec<String>,
    #[serde(default, alias = "prefer_points")]
    pub prefer_score: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProposeResponse {
    pub squad: Squad,
    pub constraints: ConstraintSet,
    pub budget_used: Decimal,
}

/// Validate a given squad.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValidateRequest {
    pub squad: Squad,
    #[serde(default)]
    pub constraints: Option<ConstraintSet>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    /// Rendered violation messages.
    pub violations: Vec<String>,
    /// The same violations as structured data.
    #[serde(default)]
    pub details: Vec<Violation>,
}

impl ValidateResponse {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations: violations.iter().map(ToString::to_string).collect(),
            details: violations,
        }
    }
}

/// Allocate, validate and repair at most once.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SolveRequest {
    #[serde(alias = "player_pool")]
    pub pool: Vec<Item>,
    #[serde(default)]
    pub constraints: Option<ConstraintSet>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default, alias = "seed_names")]
    pub hints: Vec<String>,
    #[serde(default, alias = "prefer_points")]
    pub prefer_score: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SolveResponse {
    pub squad: Squad,
    pub total_cost: Decimal,
    /// Rendered violation messages of the final squad.
    pub violations: Vec<String>,
    #[serde(default)]
    pub details: Vec<Violation>,
    /// Violations of the first attempt, when a repair was needed.
    #[serde(default)]
    pub initial_violations: Vec<String>,
    /// One of `accepted`, `repaired`, `unresolved` or `forced`.
    pub resolution: String,
}

impl SolveResponse {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}
