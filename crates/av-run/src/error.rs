use av_core::StepError;
use av_maze::MazeError;
use av_sort::SortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error("`{name}` names more than one algorithm; prefix it with sort:, generate: or solve:")]
    Ambiguous { name: String },

    #[error("{algorithm} cannot run on a {structure}")]
    Mismatch {
        algorithm: &'static str,
        structure: &'static str,
    },

    #[error("run worker panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Sort(#[from] SortError),

    #[error(transparent)]
    Maze(#[from] MazeError),
}

impl RunError {
    /// The step-level failure underneath, if the run stopped mid-way.
    pub fn step_error(&self) -> Option<&StepError> {
        match self {
            RunError::Sort(SortError::Step(e)) | RunError::Maze(MazeError::Step(e)) => Some(e),
            _ => None,
        }
    }

    /// `true` if the run stopped because its cancel token fired.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.step_error(), Some(StepError::Cancelled { .. }))
    }
}

pub type RunResult<T> = Result<T, RunError>;
