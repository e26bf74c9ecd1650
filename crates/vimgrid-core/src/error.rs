use thiserror::Error;

/// Errors raised by the grid buffer.
///
/// Only reads can fail: writes outside the grid are dropped silently,
/// because the shifting algorithms probe positions past the row end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("out of bounds: ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, GridError>;
