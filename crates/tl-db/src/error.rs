use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("tensor not found: {0}")]
    NotFound(String),
    #[error("corrupt registry file: {0}")]
    Corrupt(String),
    #[error("tensor error: {0}")]
    Tensor(#[from] tl_tensor::TensorError),
}

pub type Result<T> = std::result::Result<T, DbError>;
