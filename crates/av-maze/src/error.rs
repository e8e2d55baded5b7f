//! Maze-subsystem error type.

use thiserror::Error;

use av_core::{CoreError, Pos, StepError};

/// Errors produced by `av-maze`.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("invalid maze input: {0}")]
    InvalidInput(String),

    #[error("endpoint {0} lies outside the grid")]
    OutOfBounds(Pos),

    #[error("start and goal are the same cell {0}")]
    SameEndpoints(Pos),

    #[error("no open path from {start} to {goal}")]
    Unreachable { start: Pos, goal: Pos },

    #[error("unknown maze algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Step(#[from] StepError),
}

pub type MazeResult<T> = Result<T, MazeError>;
