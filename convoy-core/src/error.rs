//! Input validation errors shared across the planning pipeline.
//!
//! Every variant is raised before any distance matrix is built, so a failed
//! validation never leaves a partially planned run behind.

use thiserror::Error;

/// Malformed or inconsistent planning input.
///
/// # Examples
/// ```
/// use convoy_core::{PlannerConfig, ValidationError};
///
/// let config = PlannerConfig::default().with_vehicle_capacity(0);
/// assert_eq!(config.validate(), Err(ValidationError::NonPositiveCapacity));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    /// Latitude and longitude columns have different lengths.
    #[error("coordinate columns differ in length: {latitudes} latitudes, {longitudes} longitudes")]
    CoordinateLengthMismatch {
        /// Number of latitudes supplied.
        latitudes: usize,
        /// Number of longitudes supplied.
        longitudes: usize,
    },
    /// The demand column does not line up with the coordinate columns.
    #[error("demand column has {demands} entries but {customers} customers were supplied")]
    DemandLengthMismatch {
        /// Number of demands supplied.
        demands: usize,
        /// Number of customers described by the coordinate columns.
        customers: usize,
    },
    /// A customer carries a negative demand.
    #[error("customer {index} has negative demand {demand}")]
    NegativeDemand {
        /// Global point index of the customer.
        index: usize,
        /// Offending demand value.
        demand: i64,
    },
    /// A customer demand does not fit the demand type.
    #[error("customer {index} demand {demand} exceeds the supported range")]
    DemandOutOfRange {
        /// Global point index of the customer.
        index: usize,
        /// Offending demand value.
        demand: i64,
    },
    /// A point lies outside the valid latitude/longitude ranges or is not finite.
    #[error("point {index} has invalid coordinates (latitude {latitude}, longitude {longitude})")]
    InvalidCoordinate {
        /// Global point index (0 is the depot).
        index: usize,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// Vehicle capacity was zero.
    #[error("vehicle capacity must be positive")]
    NonPositiveCapacity,
    /// The route cost budget was zero, negative or not finite.
    #[error("maximum route cost must be positive and finite, got {0}")]
    NonPositiveMaxCost(f64),
    /// The per-distance cost rate was zero, negative or not finite.
    #[error("cost rate must be positive and finite, got {0}")]
    NonPositiveCostRate(f64),
    /// A worker pool of zero threads was requested.
    #[error("worker count must be at least one")]
    ZeroWorkers,
}
