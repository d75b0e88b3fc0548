//! Distance provider trait for point sets.

use crate::Point;

use super::error::DistanceError;
use super::matrix::DistanceMatrix;

/// Produce pairwise distances for a set of points.
///
/// Implementers must return a square matrix with one row per point, in the
/// order supplied. `matrix.get(i, j)` is the distance in metres from
/// `points[i]` to `points[j]`.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use convoy_core::{DistanceError, DistanceMatrix, DistanceProvider, Point};
///
/// struct UnitProvider;
///
/// impl DistanceProvider for UnitProvider {
///     fn distance_matrix(&self, points: &[Point]) -> Result<DistanceMatrix, DistanceError> {
///         if points.is_empty() {
///             return Err(DistanceError::EmptyInput);
///         }
///         let n = points.len();
///         DistanceMatrix::from_rows(
///             (0..n)
///                 .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
///                 .collect(),
///         )
///     }
/// }
///
/// let depot = Point::depot(Coord { x: 0.0, y: 0.0 });
/// let matrix = UnitProvider.distance_matrix(&[depot])?;
/// assert_eq!(matrix.len(), 1);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DistanceProvider: Send + Sync {
    /// Return the distance matrix for `points`.
    ///
    /// Implementations must return `Err(DistanceError::EmptyInput)` when
    /// `points` is empty.
    fn distance_matrix(&self, points: &[Point]) -> Result<DistanceMatrix, DistanceError>;
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for Box<T> {
    fn distance_matrix(&self, points: &[Point]) -> Result<DistanceMatrix, DistanceError> {
        (**self).distance_matrix(points)
    }
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for &T {
    fn distance_matrix(&self, points: &[Point]) -> Result<DistanceMatrix, DistanceError> {
        (**self).distance_matrix(points)
    }
}
