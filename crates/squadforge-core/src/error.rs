//! Error types for SquadForge

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for SquadForge operations.
///
/// Infeasibility is never reported through this type; a squad that cannot
/// satisfy its constraints is expressed as violations. Only malformed input
/// data fails here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquadForgeError {
    /// A budget or budget ceiling below zero.
    #[error("Budget must be non-negative, got {0}")]
    NegativeBudget(Decimal),

    /// An item price below zero.
    #[error("Price of item {id} must be non-negative, got {price}")]
    NegativePrice { id: u32, price: Decimal },

    /// A category label outside the closed category set.
    #[error("Unknown category label: {0:?}")]
    UnknownCategory(String),

    /// Malformed constraint data.
    #[error("Invalid constraints: {0}")]
    InvalidConstraints(String),
}

/// Result type alias for SquadForge operations
pub type Result<T> = std::result::Result<T, SquadForgeError>;
