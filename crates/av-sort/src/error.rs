use av_core::StepError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("invalid sort input: {0}")]
    InvalidInput(String),

    #[error("unknown sort algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Step(#[from] StepError),
}

pub type SortResult<T> = Result<T, SortError>;
