//! Error types for survivor selection.
//!
//! Every public operation returns [`SelectionResult`]. Failures are
//! expected validation outcomes (bad options, missing derived state), so
//! the orchestrator can adjust parameters and retry, skip a generation, or
//! abort the run. Nothing here is fatal to the process.

use thiserror::Error;

/// Error type for all selection operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    /// A candidate has no normalized objectives.
    #[error("candidate {id} has no normalized objectives")]
    MissingNormalizedObjectives { id: String },

    /// A candidate's normalized objective map is present but empty.
    #[error("candidate {id} has an empty normalized objective map")]
    NoObjectives { id: String },

    /// A candidate lacks a value for an objective the rest of the set carries.
    #[error("candidate {id} is missing normalized objective '{objective}'")]
    MissingObjective { id: String, objective: String },

    /// A normalized objective value is NaN or infinite.
    #[error("candidate {id} has a non-finite value for objective '{objective}'")]
    InvalidObjective { id: String, objective: String },

    /// A candidate has no Pareto rank where one is required.
    #[error("candidate {id} has no pareto rank")]
    MissingRank { id: String },

    /// A candidate has no crowding distance where one is required.
    #[error("candidate {id} has no crowding distance")]
    MissingCrowdingDistance { id: String },

    /// A call-site option is out of its valid range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// More candidates were requested than the input holds.
    #[error("requested {requested} candidates but only {available} available")]
    CountExceedsPopulation { requested: usize, available: usize },

    /// The operation needs at least one candidate.
    #[error("empty population")]
    EmptyPopulation,

    /// Two candidates share the same id.
    #[error("duplicate candidate id {id}")]
    DuplicateId { id: String },

    /// Adding a candidate would exceed the population capacity.
    #[error("population capacity {capacity} exceeded")]
    CapacityExceeded { capacity: usize },

    /// No candidate with the given id exists.
    #[error("unknown candidate {id}")]
    UnknownCandidate { id: String },
}

impl SelectionError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SelectionError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;
