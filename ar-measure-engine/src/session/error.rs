use thiserror::Error;

/// Errors raised when host-supplied session data cannot be accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("pose matrix must contain 16 elements, got {0}")]
    MatrixLength(usize),

    #[error("pose matrix contains non-finite values")]
    NonFiniteMatrix,

    #[error("{axis} must be a positive finite number of centimetres, got {value}")]
    InvalidDimension { axis: &'static str, value: f32 },
}
