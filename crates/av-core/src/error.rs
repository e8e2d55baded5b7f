//! Core error types.
//!
//! Two families live here:
//!
//! - [`StepError`] is raised while a run is emitting steps.  Every algorithm
//!   returns `StepResult<_>` and propagates it with `?`, so an observer
//!   failure or a cancellation unwinds the whole run immediately.
//! - [`CoreError`] covers input validation for the data model (grid dimensions,
//!   adjacency, coordinates).
//!
//! Sub-crates define their own enums and wrap both via `From` impls.

use thiserror::Error;

use crate::Pos;

/// Error returned by a [`StepObserver`][crate::StepObserver].
///
/// Boxed so hosts can surface any error type of their own.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a run stopped emitting steps before completing.
#[derive(Debug, Error)]
pub enum StepError {
    /// The observer returned an error; the run aborted with no partial-state
    /// guarantee on the structure.
    #[error("observer failed: {0}")]
    Observer(ObserverError),

    /// The run's [`CancelToken`][crate::CancelToken] was triggered.
    #[error("run cancelled after {after_steps} steps")]
    Cancelled { after_steps: u64 },
}

pub type StepResult<T> = Result<T, StepError>;

/// Data-model validation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cells {a} and {b} are not grid-adjacent")]
    NotAdjacent { a: Pos, b: Pos },

    #[error("position {0} lies outside the grid")]
    OutOfBounds(Pos),
}

pub type CoreResult<T> = Result<T, CoreError>;
