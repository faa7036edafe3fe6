use cab_core::CabError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error(transparent)]
    Core(#[from] CabError),

    #[error("animation requires a running tokio runtime")]
    NoRuntime,
}

pub type MotionResult<T> = Result<T, MotionError>;
