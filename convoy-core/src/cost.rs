//! Route distance and monetary cost.

use crate::{DistanceMatrix, METRES_PER_KILOMETRE, ValidationError};

/// Default rate expressed per kilometre.
pub const DEFAULT_COST_PER_KILOMETRE: f64 = 5.0;

/// Monetary cost per metre travelled.
///
/// Rates are always stored in the same unit as the distance matrix (metres).
///
/// # Examples
/// ```
/// use convoy_core::CostRate;
///
/// # fn main() -> Result<(), convoy_core::ValidationError> {
/// let rate = CostRate::per_kilometre(5.0)?;
/// assert_eq!(rate.as_per_metre(), 0.005);
/// assert_eq!(rate, CostRate::default());
/// assert!(CostRate::per_metre(0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct CostRate(f64);

impl CostRate {
    /// Rate given directly in currency per metre.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveCostRate`] unless `rate` is
    /// positive and finite.
    pub fn per_metre(rate: f64) -> Result<Self, ValidationError> {
        if rate.is_finite() && rate > 0.0 {
            Ok(Self(rate))
        } else {
            Err(ValidationError::NonPositiveCostRate(rate))
        }
    }

    /// Rate given in currency per kilometre, normalised to metres.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveCostRate`] unless `rate` is
    /// positive and finite.
    #[expect(
        clippy::float_arithmetic,
        reason = "unit conversion from kilometres to metres"
    )]
    pub fn per_kilometre(rate: f64) -> Result<Self, ValidationError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ValidationError::NonPositiveCostRate(rate));
        }
        Self::per_metre(rate / METRES_PER_KILOMETRE)
    }

    /// The rate in currency per metre.
    #[must_use]
    pub const fn as_per_metre(self) -> f64 {
        self.0
    }
}

impl Default for CostRate {
    fn default() -> Self {
        Self(DEFAULT_COST_PER_KILOMETRE / METRES_PER_KILOMETRE)
    }
}

impl TryFrom<f64> for CostRate {
    type Error = ValidationError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::per_metre(rate)
    }
}

impl From<CostRate> for f64 {
    fn from(rate: CostRate) -> Self {
        rate.0
    }
}

/// Distance and cost of one route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteCost {
    /// Sum of consecutive edge distances in metres.
    pub total_distance: f64,
    /// `total_distance` multiplied by the cost rate.
    pub total_cost: f64,
}

/// Sum of `matrix[stops[i]][stops[i + 1]]` over consecutive stops.
///
/// Sequences shorter than two stops have zero length. An edge outside the
/// matrix contributes nothing and is logged.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "route length accumulates floating-point distances"
)]
pub fn route_distance(stops: &[usize], matrix: &DistanceMatrix) -> f64 {
    let mut total = 0.0;
    for pair in stops.windows(2) {
        if let [from, to] = *pair {
            if let Some(distance) = matrix.get(from, to) {
                total += distance;
            } else {
                log::warn!("edge {from}->{to} is outside the distance matrix; counting it as zero");
            }
        }
    }
    total
}

/// Evaluate distance and cost of a stop sequence.
///
/// # Examples
/// ```
/// use convoy_core::{CostRate, DistanceMatrix, evaluate_route};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 400.0],
///     vec![400.0, 0.0],
/// ])?;
/// let cost = evaluate_route(&[0, 1, 0], &matrix, CostRate::per_metre(2.5)?);
/// assert_eq!(cost.total_distance, 800.0);
/// assert_eq!(cost.total_cost, 2000.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "cost is distance times rate")]
pub fn evaluate_route(stops: &[usize], matrix: &DistanceMatrix, rate: CostRate) -> RouteCost {
    let total_distance = route_distance(stops, matrix);
    RouteCost {
        total_distance,
        total_cost: total_distance * rate.as_per_metre(),
    }
}
