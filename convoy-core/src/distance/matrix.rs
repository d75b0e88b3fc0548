//! Dense square distance matrix indexed by point position.

use super::error::DistanceError;

/// Square, read-only table of distances in metres.
///
/// `get(i, j)` is the distance from point `i` to point `j`. Matrices built by
/// [`crate::build_distance_matrix`] are symmetric with a zero diagonal; matrices
/// supplied through [`DistanceMatrix::from_rows`] only need to be square,
/// finite and non-negative.
///
/// # Examples
/// ```
/// use convoy_core::DistanceMatrix;
///
/// # fn main() -> Result<(), convoy_core::DistanceError> {
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 120.0],
///     vec![120.0, 0.0],
/// ])?;
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.get(0, 1), Some(120.0));
/// assert_eq!(matrix.get(0, 2), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// A `size x size` matrix of zeros.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size.saturating_mul(size)],
        }
    }

    /// Build a matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::NonSquare`] when a row length differs from the
    /// row count and [`DistanceError::InvalidDistance`] for negative or
    /// non-finite entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DistanceError> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size.saturating_mul(size));
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(DistanceError::NonSquare {
                    row: from,
                    columns: row.len(),
                    expected: size,
                });
            }
            for (to, value) in row.into_iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(DistanceError::InvalidDistance { from, to, value });
                }
                values.push(value);
            }
        }
        Ok(Self { size, values })
    }

    /// Number of points covered (rows and columns).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Whether the matrix covers no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance from `from` to `to`, or `None` when either index is out of range.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        let offset = from.checked_mul(self.size)?.checked_add(to)?;
        self.values.get(offset).copied()
    }

    pub(crate) fn set_symmetric(&mut self, a: usize, b: usize, value: f64) {
        for (from, to) in [(a, b), (b, a)] {
            let slot = from
                .checked_mul(self.size)
                .and_then(|row| row.checked_add(to))
                .and_then(|offset| self.values.get_mut(offset));
            if let Some(entry) = slot {
                *entry = value;
            }
        }
    }

    /// Restrict the matrix to `indices`, in that order.
    ///
    /// Local index `k` of the result corresponds to `indices[k]`. Returns
    /// `None` if any index is out of range.
    ///
    /// # Examples
    /// ```
    /// use convoy_core::DistanceMatrix;
    ///
    /// # fn main() -> Result<(), convoy_core::DistanceError> {
    /// let matrix = DistanceMatrix::from_rows(vec![
    ///     vec![0.0, 1.0, 2.0],
    ///     vec![1.0, 0.0, 3.0],
    ///     vec![2.0, 3.0, 0.0],
    /// ])?;
    /// let sub = matrix.submatrix(&[0, 2]).expect("indices in range");
    /// assert_eq!(sub.get(0, 1), Some(2.0));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn submatrix(&self, indices: &[usize]) -> Option<Self> {
        let mut values = Vec::with_capacity(indices.len().saturating_mul(indices.len()));
        for &from in indices {
            for &to in indices {
                values.push(self.get(from, to)?);
            }
        }
        Some(Self {
            size: indices.len(),
            values,
        })
    }

    /// Whether `get(i, j) == get(j, i)` for every pair, within `tolerance`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "symmetry check compares floating-point distances"
    )]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            (i..self.size).all(|j| match (self.get(i, j), self.get(j, i)) {
                (Some(forward), Some(backward)) => (forward - backward).abs() <= tolerance,
                _ => false,
            })
        })
    }

    /// Iterate over rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.size.max(1))
    }
}
