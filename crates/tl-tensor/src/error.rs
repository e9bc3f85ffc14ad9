use thiserror::Error;

#[derive(Error, Debug)]
pub enum TensorError {
    #[error("invalid shape {0:?}: dimensions must be positive")]
    InvalidShape(Vec<usize>),
    #[error("size mismatch: shape {shape:?} holds {expected} elements, got {got}")]
    SizeMismatch {
        shape: Vec<usize>,
        expected: usize,
        got: usize,
    },
    #[error("rank mismatch: expected {expected}, got {got}")]
    RankMismatch { expected: usize, got: usize },
    #[error("out of range: {0}")]
    OutOfRange(String),
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: Vec<usize>,
        right: Vec<usize>,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, TensorError>;
