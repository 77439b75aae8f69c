//! Error types for the external boundaries.

use squadforge_core::SquadForgeError;
use thiserror::Error;

/// Failure to read a pool document as a whole.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed pool document: {0}")]
    Malformed(String),
}

/// Failure to turn one pool record into an item.
///
/// Reported per record; the rest of the pool is unaffected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record {index}: {message}")]
    Malformed { index: usize, message: String },

    #[error("record {index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("item {id}: unknown element type {element_type}")]
    UnknownElementType { id: u32, element_type: i64 },

    #[error("item {id}: unknown team {team}")]
    UnknownTeam { id: u32, team: i64 },

    #[error("item {id}: {source}")]
    Invalid {
        id: u32,
        #[source]
        source: SquadForgeError,
    },
}

/// Failure to read planner hints.
#[derive(Debug, Error)]
pub enum HintError {
    #[error("hint payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`seed_names` must be a list, found {0}")]
    NotAList(&'static str),

    #[error("`seed_names[{0}]` is not a string")]
    NotAString(usize),
}

/// Failure to decode a request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    #[error("invalid request body: {0}")]
    Body(#[from] serde_json::Error),
}
