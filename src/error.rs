//! Errors raised when the input of the planner or the telemetry pipeline violates a precondition.
//!
//! Running out of telemetry (a non-empty remainder) or hitting the planner iteration cap are
//! not errors and are reported through the regular return values.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrajectoryError {
    /// Input ordering or coverage does not allow the operation.
    #[error("precondition not met: {0}")]
    Precondition(String),

    /// The interpolation policy cannot handle this kind of value.
    #[error("{policy} interpolation cannot process {found} values")]
    TypeMismatch { policy: &'static str, found: &'static str },

    /// Two vectors that must have the same length do not.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Streams being merged are not aligned on the same timestamps.
    #[error("timestamp mismatch at index {index}: expected {expected}, found {found}")]
    TimestampMismatch { index: usize, expected: f64, found: f64 },

    /// Joint vector of the wrong size.
    #[error("expected {expected} joint values, found {found}")]
    Arity { expected: usize, found: usize },
}

impl TrajectoryError {
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, TrajectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            TrajectoryError::precondition("first keyframe after first target").to_string(),
            "precondition not met: first keyframe after first target"
        );
        let err = TrajectoryError::TimestampMismatch { index: 3, expected: 1.5, found: 1.25 };
        assert!(err.to_string().contains("index 3"));
        let err = TrajectoryError::TypeMismatch { policy: "linear", found: "motion" };
        assert_eq!(err.to_string(), "linear interpolation cannot process motion values");
    }
}
