//! The immutable problem instance shared by every algorithm.

use crate::error::{TourError, TourResult};
use crate::geo::{self, Coordinate};

/// Relative tolerance for the symmetry check.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A validated routing problem: a square, symmetric, non-negative distance
/// matrix with zero diagonal, plus the node every route must start from.
///
/// Construction is the only place the input is checked. After that the
/// instance is read-only and may be shared freely between threads.
///
/// # Examples
///
/// ```
/// use u_tour::instance::ProblemInstance;
///
/// let matrix = vec![
///     vec![0.0, 2.0, 9.0],
///     vec![2.0, 0.0, 6.0],
///     vec![9.0, 6.0, 0.0],
/// ];
/// let instance = ProblemInstance::new(matrix, 0).unwrap();
/// assert_eq!(instance.len(), 3);
/// assert_eq!(instance.distance(1, 2), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProblemInstance {
    matrix: Vec<Vec<f64>>,
    start: usize,
}

impl ProblemInstance {
    /// Validates `matrix` and `start` and builds the instance.
    pub fn new(matrix: Vec<Vec<f64>>, start: usize) -> TourResult<Self> {
        let n = matrix.len();
        if n == 0 {
            return Err(TourError::EmptyInstance);
        }
        if start >= n {
            return Err(TourError::StartOutOfRange { start, n });
        }

        for (row, values) in matrix.iter().enumerate() {
            if values.len() != n {
                return Err(TourError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
        }

        for i in 0..n {
            if matrix[i][i] != 0.0 {
                return Err(TourError::NonZeroDiagonal { i });
            }
            for j in 0..n {
                let value = matrix[i][j];
                if !value.is_finite() {
                    return Err(TourError::NonFiniteDistance { i, j });
                }
                if value < 0.0 {
                    return Err(TourError::NegativeDistance { i, j, value });
                }
                if j > i {
                    let other = matrix[j][i];
                    let scale = value.abs().max(other.abs()).max(1.0);
                    if (value - other).abs() > SYMMETRY_TOLERANCE * scale {
                        return Err(TourError::Asymmetric { i, j });
                    }
                }
            }
        }

        Ok(Self { matrix, start })
    }

    /// Builds an instance from coordinates using an injected distance function.
    ///
    /// ```
    /// use u_tour::geo::haversine_km;
    /// use u_tour::instance::ProblemInstance;
    ///
    /// let stops = [(37.5665, 126.9780), (37.4563, 126.7052), (37.2636, 127.0286)];
    /// let instance = ProblemInstance::from_coordinates(&stops, 0, haversine_km).unwrap();
    /// assert_eq!(instance.len(), 3);
    /// ```
    pub fn from_coordinates<F>(coords: &[Coordinate], start: usize, distance: F) -> TourResult<Self>
    where
        F: Fn(Coordinate, Coordinate) -> f64,
    {
        let matrix = geo::distance_matrix(coords, distance)?;
        Self::new(matrix, start)
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    /// Always `false`; an instance holds at least one node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Index every route starts from.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Distance between nodes `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.matrix[i][j]
    }

    /// The full matrix, row-major.
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Mean over all `n * n` entries, diagonal included.
    pub fn mean_distance(&self) -> f64 {
        let n = self.len();
        let total: f64 = self.matrix.iter().flatten().sum();
        total / (n * n) as f64
    }

    /// Largest entry in the matrix.
    pub fn max_distance(&self) -> f64 {
        self.matrix
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_km;

    fn square() -> Vec<Vec<f64>> {
        let d = std::f64::consts::SQRT_2;
        vec![
            vec![0.0, 1.0, d, 1.0],
            vec![1.0, 0.0, 1.0, d],
            vec![d, 1.0, 0.0, 1.0],
            vec![1.0, d, 1.0, 0.0],
        ]
    }

    #[test]
    fn test_accepts_valid_matrix() {
        let instance = ProblemInstance::new(square(), 2).expect("valid");
        assert_eq!(instance.len(), 4);
        assert_eq!(instance.start(), 2);
        assert!((instance.max_distance() - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_single_node() {
        let instance = ProblemInstance::new(vec![vec![0.0]], 0).expect("valid");
        assert_eq!(instance.len(), 1);
        assert_eq!(instance.mean_distance(), 0.0);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(ProblemInstance::new(vec![], 0), Err(TourError::EmptyInstance));
    }

    #[test]
    fn test_rejects_start_out_of_range() {
        let err = ProblemInstance::new(square(), 4).unwrap_err();
        assert_eq!(err, TourError::StartOutOfRange { start: 4, n: 4 });
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let mut m = square();
        m[2].pop();
        let err = ProblemInstance::new(m, 0).unwrap_err();
        assert!(matches!(err, TourError::NotSquare { row: 2, len: 3, expected: 4 }));
    }

    #[test]
    fn test_rejects_asymmetric() {
        let mut m = square();
        m[0][1] = 5.0;
        let err = ProblemInstance::new(m, 0).unwrap_err();
        assert_eq!(err, TourError::Asymmetric { i: 0, j: 1 });
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let mut m = square();
        m[1][3] = -1.0;
        m[3][1] = -1.0;
        assert!(matches!(
            ProblemInstance::new(m, 0),
            Err(TourError::NegativeDistance { i: 1, j: 3, .. })
        ));

        let mut m = square();
        m[0][2] = f64::NAN;
        assert!(matches!(
            ProblemInstance::new(m, 0),
            Err(TourError::NonFiniteDistance { i: 0, j: 2 })
        ));
    }

    #[test]
    fn test_rejects_nonzero_diagonal() {
        let mut m = square();
        m[3][3] = 0.5;
        assert_eq!(
            ProblemInstance::new(m, 0),
            Err(TourError::NonZeroDiagonal { i: 3 })
        );
    }

    #[test]
    fn test_from_coordinates() {
        let stops = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)];
        let instance = ProblemInstance::from_coordinates(&stops, 1, haversine_km).expect("valid");
        assert_eq!(instance.start(), 1);
        assert!(instance.distance(0, 1) > 100.0);
    }

    #[test]
    fn test_mean_distance_counts_diagonal() {
        let m = vec![vec![0.0, 4.0], vec![4.0, 0.0]];
        let instance = ProblemInstance::new(m, 0).expect("valid");
        assert!((instance.mean_distance() - 2.0).abs() < 1e-12);
    }
}
