//! Matrix validation.

use super::DistanceMatrix;
use crate::error::ValidationError;

/// A distance matrix that passed [`validate`].
///
/// Dense, row-major and immutable. Guarantees: square, `N >= 1`, every
/// entry finite and non-negative, zero diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMatrix {
    data: Vec<f64>,
    size: usize,
}

impl ValidatedMatrix {
    /// Cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of points, depot included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stops, depot excluded.
    pub fn stop_count(&self) -> usize {
        self.size - 1
    }

    /// Largest entry in the matrix.
    pub fn max_entry(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Total cost of walking `path` edge by edge.
    ///
    /// Costs are accumulated left to right at native precision. Every
    /// solver reports through this function so costs of the same path
    /// compare bit-for-bit across strategies.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2)
            .fold(0.0, |acc, w| acc + self.get(w[0], w[1]))
    }
}

/// Checks shape and value invariants and produces the dense form.
///
/// Checks run in order: shape, then entry values, then the diagonal. A
/// negative diagonal entry is reported as a value error.
///
/// # Examples
///
/// ```
/// use u_tour::error::ValidationError;
/// use u_tour::matrix::{validate, DistanceMatrix};
///
/// let bad = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 3.0]]);
/// assert!(matches!(validate(&bad), Err(ValidationError::Diagonal { index: 1, .. })));
/// ```
pub fn validate(matrix: &DistanceMatrix) -> Result<ValidatedMatrix, ValidationError> {
    let rows = matrix.rows();
    let size = rows.len();
    if size == 0 {
        return Err(ValidationError::Empty);
    }

    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
        return Err(ValidationError::Shape {
            row,
            len: r.len(),
            expected: size,
        });
    }

    let mut data = Vec::with_capacity(size * size);
    for (row, r) in rows.iter().enumerate() {
        for (col, &value) in r.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::Value { row, col, value });
            }
            data.push(value);
        }
    }

    for index in 0..size {
        let value = data[index * size + index];
        if value != 0.0 {
            return Err(ValidationError::Diagonal { index, value });
        }
    }

    Ok(ValidatedMatrix { data, size })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(rows: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows)
    }

    #[test]
    fn test_valid_matrix() {
        let m = validate(&square(vec![
            vec![0.0, 1.5, 2.0],
            vec![1.0, 0.0, 4.0],
            vec![2.0, 3.0, 0.0],
        ]))
        .expect("valid");
        assert_eq!(m.size(), 3);
        assert_eq!(m.stop_count(), 2);
        assert_eq!(m.get(0, 1), 1.5);
        assert_eq!(m.get(1, 0), 1.0);
        assert!(!m.is_symmetric(1e-10));
        assert_eq!(m.max_entry(), 4.0);
    }

    #[test]
    fn test_depot_only() {
        let m = validate(&square(vec![vec![0.0]])).expect("valid");
        assert_eq!(m.size(), 1);
        assert_eq!(m.stop_count(), 0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate(&square(vec![])), Err(ValidationError::Empty));
    }

    #[test]
    fn test_not_square() {
        let err = validate(&square(vec![vec![0.0, 1.0], vec![1.0]])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Shape {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_rectangular() {
        let err = validate(&square(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 2.0]])).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_negative_entry() {
        let err = validate(&square(vec![vec![0.0, -1.0], vec![1.0, 0.0]])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Value {
                row: 0,
                col: 1,
                value: -1.0
            }
        );
    }

    #[test]
    fn test_nan_entry() {
        let err = validate(&square(vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]])).unwrap_err();
        assert!(matches!(err, ValidationError::Value { row: 1, col: 0, .. }));
    }

    #[test]
    fn test_infinite_entry() {
        let err = validate(&square(vec![vec![0.0, f64::INFINITY], vec![1.0, 0.0]])).unwrap_err();
        assert!(matches!(err, ValidationError::Value { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_nonzero_diagonal() {
        let err = validate(&square(vec![vec![0.5, 1.0], vec![1.0, 0.0]])).unwrap_err();
        assert_eq!(err, ValidationError::Diagonal { index: 0, value: 0.5 });
    }

    #[test]
    fn test_path_cost() {
        let m = validate(&square(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 4.0],
            vec![2.0, 3.0, 0.0],
        ]))
        .expect("valid");
        assert_eq!(m.path_cost(&[0, 1, 2, 0]), 1.0 + 4.0 + 2.0);
        assert_eq!(m.path_cost(&[0, 2, 1, 0]), 2.0 + 3.0 + 1.0);
        assert_eq!(m.path_cost(&[0]), 0.0);
    }
}
