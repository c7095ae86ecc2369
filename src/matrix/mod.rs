//! Distance matrices.
//!
//! [`DistanceMatrix`] is the caller's raw input: rows of costs exactly as
//! the data-preparation side produced them. [`ValidatedMatrix`] is the dense
//! form every solver reads; the only way to obtain one is [`validate`],
//! so shape and value invariants hold for the lifetime of a request.
//!
//! The engine never assumes `cost(i, j) == cost(j, i)`.

mod validate;

pub use validate::{validate, ValidatedMatrix};

/// An `N×N` grid of travel costs as supplied by the caller.
///
/// Index `0` is the depot. Nothing is checked at construction time.
///
/// # Examples
///
/// ```
/// use u_tour::matrix::DistanceMatrix;
///
/// let m = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0],
///     vec![2.0, 0.0],
/// ]);
/// assert_eq!(m.len(), 2);
/// assert!(m.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Wraps rows of costs.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Builds a matrix from row-major data.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: &[f64]) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        let rows = if size == 0 {
            Vec::new()
        } else {
            data.chunks(size).map(<[f64]>::to_vec).collect()
        };
        Some(Self { rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The raw rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Shorthand for [`validate`].
    pub fn validate(&self) -> Result<ValidatedMatrix, crate::error::ValidationError> {
        validate(self)
    }
}

impl From<Vec<Vec<f64>>> for DistanceMatrix {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::from_rows(rows)
    }
}
