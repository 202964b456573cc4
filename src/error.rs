//! Error taxonomy for solver construction and the generational loop.
//!
//! None of these errors are retried internally. A failing call leaves the
//! solver exactly as it was before the call.

use crate::engine::SolverState;

/// Errors surfaced by the solver, genomes, and operators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    /// `step()` was called while the solver was not in progress.
    #[error("solver is not in progress (state: {state:?})")]
    NotInProgress { state: SolverState },

    /// A real-vector genome (or its step-size vector) has the wrong length.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Two genomes built for different objectives were recombined.
    #[error("incompatible genomes: {left} vs {right}")]
    IncompatibleGenomes { left: String, right: String },

    /// The configuration failed validation at construction.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
