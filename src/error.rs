//! Caller-visible errors.
//!
//! Only problems with the input itself surface as [`TourError`]. Failures
//! inside individual algorithms are absorbed by the ensemble and recorded
//! in its report instead.

use thiserror::Error;

/// Errors raised while building a [`ProblemInstance`](crate::instance::ProblemInstance)
/// or an [`Ensemble`](crate::ensemble::Ensemble).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourError {
    /// The instance has no nodes.
    #[error("instance must contain at least one node")]
    EmptyInstance,

    /// A matrix row has the wrong length.
    #[error("matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// `matrix[i][j] != matrix[j][i]`.
    #[error("matrix is not symmetric at ({i}, {j})")]
    Asymmetric { i: usize, j: usize },

    /// A distance is below zero.
    #[error("negative distance {value} at ({i}, {j})")]
    NegativeDistance { i: usize, j: usize, value: f64 },

    /// A distance is NaN or infinite.
    #[error("non-finite distance at ({i}, {j})")]
    NonFiniteDistance { i: usize, j: usize },

    /// A diagonal entry is not zero.
    #[error("diagonal entry ({i}, {i}) must be zero")]
    NonZeroDiagonal { i: usize },

    /// The start node does not exist.
    #[error("start index {start} out of range for {n} nodes")]
    StartOutOfRange { start: usize, n: usize },

    /// A latitude/longitude pair is outside the valid range.
    #[error("invalid coordinate #{index}: ({latitude}, {longitude})")]
    InvalidCoordinate {
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    /// An algorithm or ensemble configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type TourResult<T> = Result<T, TourError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_entry() {
        let err = TourError::Asymmetric { i: 1, j: 3 };
        assert_eq!(err.to_string(), "matrix is not symmetric at (1, 3)");

        let err = TourError::StartOutOfRange { start: 7, n: 4 };
        assert_eq!(err.to_string(), "start index 7 out of range for 4 nodes");
    }

    #[test]
    fn test_invalid_config_wraps_message() {
        let err = TourError::InvalidConfig("population_size must be at least 2".into());
        assert!(err.to_string().contains("population_size"));
    }
}
