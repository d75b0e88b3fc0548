//! Great-circle distances between WGS84 coordinates.

use geo::Coord;

use super::error::DistanceError;
use super::matrix::DistanceMatrix;
use super::provider::DistanceProvider;
use crate::{Point, ValidationError};

/// Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Metres in a kilometre; distances are always reported in metres.
pub const METRES_PER_KILOMETRE: f64 = 1000.0;

/// Haversine distance in metres between two coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use convoy_core::haversine_metres;
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 0.0, y: 1.0 };
/// let metres = haversine_metres(a, b);
/// assert!((metres - 111_194.9).abs() < 1.0);
/// assert_eq!(haversine_metres(a, a), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "great-circle distance is floating-point trigonometry"
)]
pub fn haversine_metres(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let delta_lat = lat_b - lat_a;
    let delta_lon = (b.x - a.x).to_radians();

    // Rounding can push `h` just past 1 for near-antipodal points.
    let h = ((delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * central_angle * METRES_PER_KILOMETRE
}

/// Build the full pairwise distance matrix from coordinate columns.
///
/// Index 0 is the depot. Each unordered pair is computed once and mirrored,
/// so the result is exactly symmetric with a zero diagonal.
///
/// # Errors
///
/// Returns [`ValidationError::CoordinateLengthMismatch`] when the columns
/// differ in length.
///
/// # Examples
/// ```
/// use convoy_core::build_distance_matrix;
///
/// # fn main() -> Result<(), convoy_core::ValidationError> {
/// let matrix = build_distance_matrix(&[0.0, 0.0, 1.0], &[0.0, 1.0, 0.0])?;
/// assert_eq!(matrix.len(), 3);
/// assert_eq!(matrix.get(1, 2), matrix.get(2, 1));
/// # Ok(())
/// # }
/// ```
pub fn build_distance_matrix(
    latitudes: &[f64],
    longitudes: &[f64],
) -> Result<DistanceMatrix, ValidationError> {
    if latitudes.len() != longitudes.len() {
        return Err(ValidationError::CoordinateLengthMismatch {
            latitudes: latitudes.len(),
            longitudes: longitudes.len(),
        });
    }
    let coords: Vec<Coord<f64>> = latitudes
        .iter()
        .zip(longitudes)
        .map(|(&y, &x)| Coord { x, y })
        .collect();

    let mut matrix = DistanceMatrix::zeros(coords.len());
    for (i, &from) in coords.iter().enumerate() {
        for (offset, &to) in coords.iter().skip(i + 1).enumerate() {
            let j = i + 1 + offset;
            matrix.set_symmetric(i, j, haversine_metres(from, to));
        }
    }
    Ok(matrix)
}

/// [`DistanceProvider`] computing straight-line great-circle distances.
#[derive(Debug, Default, Clone, Copy)]
pub struct HaversineDistanceProvider;

impl DistanceProvider for HaversineDistanceProvider {
    fn distance_matrix(&self, points: &[Point]) -> Result<DistanceMatrix, DistanceError> {
        if points.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        let latitudes: Vec<f64> = points.iter().map(Point::latitude).collect();
        let longitudes: Vec<f64> = points.iter().map(Point::longitude).collect();
        Ok(build_distance_matrix(&latitudes, &longitudes)?)
    }
}
