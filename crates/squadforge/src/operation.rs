//! Operations and their dispatch.
//!
//! Every supported operation is a variant of [`Operation`]; [`Engine::dispatch`]
//! maps each variant to its handler with an exhaustive `match`.

use std::sync::Arc;

use serde::Serialize;
use squadforge_config::{ConfigError, SquadConfig};
use squadforge_core::{Budget, ConstraintSet, Item};
use squadforge_solver::{
    validate, AllocationOptions, GreedyAllocator, RepairController, RepairEventListener,
    RepairOutcome, RepairPolicy,
};
use tracing::debug;

use crate::error::RequestError;
use crate::wire::{
    ProposeRequest, ProposeResponse, SolveRequest, SolveResponse, ValidateRequest,
    ValidateResponse,
};

/// A supported operation with its request.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Propose(ProposeRequest),
    Validate(ValidateRequest),
    Solve(SolveRequest),
}

impl Operation {
    /// Names accepted by [`Operation::from_json`].
    pub const NAMES: [&'static str; 3] = ["propose", "validate", "solve"];

    /// Decodes a request body for the named operation.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::UnknownOperation`] for a name outside
    /// [`Operation::NAMES`], or [`RequestError::Body`] for an invalid body.
    pub fn from_json(name: &str, body: &str) -> Result<Self, RequestError> {
        match name {
            "propose" => Ok(Operation::Propose(serde_json::from_str(body)?)),
            "validate" => Ok(Operation::Validate(serde_json::from_str(body)?)),
            "solve" => Ok(Operation::Solve(serde_json::from_str(body)?)),
            other => Err(RequestError::UnknownOperation(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Propose(_) => "propose",
            Operation::Validate(_) => "validate",
            Operation::Solve(_) => "solve",
        }
    }
}

/// Response of a dispatched operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Propose(ProposeResponse),
    Validate(ValidateResponse),
    Solve(SolveResponse),
}

impl OperationOutput {
    /// Returns false if the response reports violations.
    ///
    /// Proposals are never validated and always count as valid.
    pub fn is_valid(&self) -> bool {
        match self {
            OperationOutput::Propose(_) => true,
            OperationOutput::Validate(response) => response.valid,
            OperationOutput::Solve(response) => response.is_valid(),
        }
    }
}

/// Per-request engine built from configuration.
///
/// # Example
///
/// ```
/// use squadforge::{Engine, Operation, OperationOutput};
/// use squadforge_config::SquadConfig;
///
/// let engine = Engine::new(SquadConfig::default()).unwrap();
/// let op = Operation::from_json("validate", r#"{"squad": []}"#).unwrap();
/// match engine.dispatch(op) {
///     OperationOutput::Validate(response) => assert!(!response.valid),
///     other => panic!("unexpected output: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: SquadConfig,
    constraints: ConstraintSet,
    listeners: Vec<Arc<dyn RepairEventListener>>,
}

impl Engine {
    /// Creates an engine, validating the configured constraints.
    pub fn new(config: SquadConfig) -> Result<Self, ConfigError> {
        let constraints = config.constraint_set()?;
        Ok(Self {
            config,
            constraints,
            listeners: Vec::new(),
        })
    }

    /// Registers a listener on every controller this engine builds.
    pub fn with_listener(mut self, listener: Arc<dyn RepairEventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn config(&self) -> &SquadConfig {
        &self.config
    }

    /// Returns the configured constraint set.
    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Runs one operation.
    pub fn dispatch(&self, operation: Operation) -> OperationOutput {
        debug!(event = "dispatch", operation = operation.name());
        match operation {
            Operation::Propose(request) => OperationOutput::Propose(self.propose(request)),
            Operation::Validate(request) => OperationOutput::Validate(self.validate(request)),
            Operation::Solve(request) => OperationOutput::Solve(self.solve(request)),
        }
    }

    /// Allocates once with the request's hints.
    pub fn propose(&self, request: ProposeRequest) -> ProposeResponse {
        let constraints = request
            .constraints
            .unwrap_or_else(|| self.constraints.clone());
        let budget = request.budget.unwrap_or(constraints.budget);
        let allocator = GreedyAllocator::new(self.options(request.prefer_score));
        let allocation =
            allocator.allocate(&request.player_pool, &constraints, budget, &request.hints);

        ProposeResponse {
            budget_used: allocation.total_cost,
            squad: allocation.squad,
            constraints,
        }
    }

    /// Validates a given squad.
    pub fn validate(&self, request: ValidateRequest) -> ValidateResponse {
        let constraints = request.constraints.as_ref().unwrap_or(&self.constraints);
        ValidateResponse::from_violations(validate(&request.squad, constraints))
    }

    /// Allocates, validates and repairs at most once.
    pub fn solve(&self, request: SolveRequest) -> SolveResponse {
        let constraints = request
            .constraints
            .unwrap_or_else(|| self.constraints.clone());
        let budget = request.budget.unwrap_or(constraints.budget);
        let outcome = self.run(
            &request.pool,
            &constraints,
            budget,
            &request.hints,
            request.prefer_score,
        );
        solve_response(outcome)
    }

    /// Runs the repair controller directly and returns the full outcome.
    pub fn run(
        &self,
        pool: &[Item],
        constraints: &ConstraintSet,
        budget: Budget,
        hints: &[String],
        prefer_score: Option<bool>,
    ) -> RepairOutcome {
        let controller = RepairController::new(
            self.options(prefer_score),
            RepairPolicy::from_config(&self.config.repair),
        );
        let controller = self
            .listeners
            .iter()
            .cloned()
            .fold(controller, RepairController::with_listener);
        controller.run(pool, constraints, budget, hints)
    }

    fn options(&self, prefer_score: Option<bool>) -> AllocationOptions {
        let options = AllocationOptions::from_config(&self.config.allocation);
        match prefer_score {
            Some(prefer_score) => options.with_prefer_score(prefer_score),
            None => options,
        }
    }
}

fn solve_response(outcome: RepairOutcome) -> SolveResponse {
    SolveResponse {
        total_cost: outcome.total_cost,
        violations: outcome.violations.iter().map(ToString::to_string).collect(),
        initial_violations: outcome
            .initial_violations
            .iter()
            .map(ToString::to_string)
            .collect(),
        details: outcome.violations,
        resolution: outcome.resolution.as_str().to_string(),
        squad: outcome.squad,
    }
}
