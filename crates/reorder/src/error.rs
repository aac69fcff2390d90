use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReorderError {
    #[error("cannot replace items while a drag session is active")]
    SessionActive,
    #[error("row spacing must be finite and non-negative, got {0}")]
    InvalidSpacing(f32),
}

pub type Result<T> = std::result::Result<T, ReorderError>;
