use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("{inside} inside points exceed {generated} generated points")]
    InsideExceedsGenerated { inside: usize, generated: usize },
    #[error("inside point {index} is not one of the generated points")]
    InsideNotGenerated { index: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
