//! Depot and customer locations for a planning run.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`. Index 0 is
//! always the depot; customers occupy indices `1..=N` in input order.

use geo::Coord;

use crate::ValidationError;

/// Global index of the depot within every point set and distance matrix.
pub const DEPOT_INDEX: usize = 0;

/// A depot or customer location with its demand.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use convoy_core::Point;
///
/// let point = Point::new(3, Coord { x: 32.85, y: 39.92 }, 12);
/// assert_eq!(point.latitude(), 39.92);
/// assert_eq!(point.longitude(), 32.85);
/// assert!(!point.is_depot());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Position in the planning run (0 = depot).
    pub index: usize,
    /// Geographic position.
    pub location: Coord<f64>,
    /// Units to deliver; always 0 for the depot.
    pub demand: u32,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub const fn new(index: usize, location: Coord<f64>, demand: u32) -> Self {
        Self {
            index,
            location,
            demand,
        }
    }

    /// Construct the depot at `location`.
    #[must_use]
    pub const fn depot(location: Coord<f64>) -> Self {
        Self::new(DEPOT_INDEX, location, 0)
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Whether this point is the depot.
    #[must_use]
    pub const fn is_depot(&self) -> bool {
        self.index == DEPOT_INDEX
    }
}

/// The validated, immutable point set of one planning run.
///
/// The depot is prepended at index 0 and carries no demand.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use convoy_core::CustomerSet;
///
/// # fn main() -> Result<(), convoy_core::ValidationError> {
/// let depot = Coord { x: 32.8541, y: 39.9208 };
/// let customers = CustomerSet::new(depot, [(Coord { x: 32.86, y: 39.93 }, 10)])?;
/// assert_eq!(customers.customer_count(), 1);
/// assert_eq!(customers.demand(1), Some(10));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSet {
    points: Vec<Point>,
}

impl CustomerSet {
    /// Validate raw `(location, demand)` pairs and prepend the depot.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinate`] for non-finite or
    /// out-of-range coordinates and [`ValidationError::NegativeDemand`] or
    /// [`ValidationError::DemandOutOfRange`] for unusable demands.
    pub fn new<I>(depot: Coord<f64>, customers: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (Coord<f64>, i64)>,
    {
        validate_coordinate(DEPOT_INDEX, depot)?;
        let mut points = vec![Point::depot(depot)];
        for (offset, (location, raw_demand)) in customers.into_iter().enumerate() {
            let index = offset + 1;
            validate_coordinate(index, location)?;
            let demand = validate_demand(index, raw_demand)?;
            points.push(Point::new(index, location, demand));
        }
        Ok(Self { points })
    }

    /// Build a point set from parallel latitude, longitude and demand columns.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CoordinateLengthMismatch`] or
    /// [`ValidationError::DemandLengthMismatch`] when the columns disagree in
    /// length, plus every error of [`CustomerSet::new`].
    pub fn from_columns(
        depot: Coord<f64>,
        latitudes: &[f64],
        longitudes: &[f64],
        demands: &[i64],
    ) -> Result<Self, ValidationError> {
        if latitudes.len() != longitudes.len() {
            return Err(ValidationError::CoordinateLengthMismatch {
                latitudes: latitudes.len(),
                longitudes: longitudes.len(),
            });
        }
        if demands.len() != latitudes.len() {
            return Err(ValidationError::DemandLengthMismatch {
                demands: demands.len(),
                customers: latitudes.len(),
            });
        }
        let rows = latitudes
            .iter()
            .zip(longitudes)
            .zip(demands)
            .map(|((&y, &x), &demand)| (Coord { x, y }, demand));
        Self::new(depot, rows)
    }

    /// All points, depot first.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The depot.
    #[must_use]
    pub fn depot(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Customers only, in input order.
    #[must_use]
    pub fn customers(&self) -> &[Point] {
        self.points.get(1..).unwrap_or_default()
    }

    /// Number of customers, excluding the depot.
    #[must_use]
    pub fn customer_count(&self) -> usize {
        self.customers().len()
    }

    /// Demand of the point at global `index`.
    #[must_use]
    pub fn demand(&self, index: usize) -> Option<u32> {
        self.points.get(index).map(|point| point.demand)
    }

    /// Latitudes of every point, depot first.
    #[must_use]
    pub fn latitudes(&self) -> Vec<f64> {
        self.points.iter().map(Point::latitude).collect()
    }

    /// Longitudes of every point, depot first.
    #[must_use]
    pub fn longitudes(&self) -> Vec<f64> {
        self.points.iter().map(Point::longitude).collect()
    }
}

fn validate_coordinate(index: usize, location: Coord<f64>) -> Result<(), ValidationError> {
    let latitude = location.y;
    let longitude = location.x;
    let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
    if in_range {
        Ok(())
    } else {
        Err(ValidationError::InvalidCoordinate {
            index,
            latitude,
            longitude,
        })
    }
}

fn validate_demand(index: usize, demand: i64) -> Result<u32, ValidationError> {
    if demand < 0 {
        return Err(ValidationError::NegativeDemand { index, demand });
    }
    u32::try_from(demand).map_err(|_| ValidationError::DemandOutOfRange { index, demand })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DEPOT: Coord<f64> = Coord {
        x: 32.8541,
        y: 39.9208,
    };

    #[rstest]
    fn depot_is_prepended_at_index_zero() {
        let set = CustomerSet::new(DEPOT, [(Coord { x: 32.9, y: 39.9 }, 5)])
            .expect("valid customers");
        let depot = set.depot().expect("depot present");
        assert!(depot.is_depot());
        assert_eq!(depot.demand, 0);
        assert_eq!(set.points().len(), 2);
        assert_eq!(set.customers().first().map(|p| p.index), Some(1));
    }

    #[rstest]
    fn negative_demand_is_rejected() {
        let err = CustomerSet::new(DEPOT, [(Coord { x: 32.9, y: 39.9 }, 1), (DEPOT, -4)])
            .expect_err("negative demand");
        assert_eq!(
            err,
            ValidationError::NegativeDemand {
                index: 2,
                demand: -4
            }
        );
    }

    #[rstest]
    fn oversized_demand_is_rejected() {
        let demand = i64::from(u32::MAX) + 1;
        let err = CustomerSet::new(DEPOT, [(DEPOT, demand)]).expect_err("out of range");
        assert!(matches!(err, ValidationError::DemandOutOfRange { index: 1, .. }));
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: 91.0 })]
    #[case(Coord { x: 181.0, y: 0.0 })]
    #[case(Coord { x: f64::NAN, y: 0.0 })]
    fn invalid_coordinates_are_rejected(#[case] location: Coord<f64>) {
        let err = CustomerSet::new(DEPOT, [(location, 1)]).expect_err("invalid coordinate");
        assert!(matches!(err, ValidationError::InvalidCoordinate { index: 1, .. }));
    }

    #[rstest]
    fn mismatched_columns_are_rejected() {
        let err = CustomerSet::from_columns(DEPOT, &[39.9, 39.8], &[32.8], &[1, 2])
            .expect_err("mismatched coordinates");
        assert_eq!(
            err,
            ValidationError::CoordinateLengthMismatch {
                latitudes: 2,
                longitudes: 1
            }
        );

        let err = CustomerSet::from_columns(DEPOT, &[39.9], &[32.8], &[1, 2])
            .expect_err("mismatched demands");
        assert_eq!(
            err,
            ValidationError::DemandLengthMismatch {
                demands: 2,
                customers: 1
            }
        );
    }

    #[rstest]
    fn columns_map_latitude_to_y() {
        let set = CustomerSet::from_columns(DEPOT, &[39.95], &[32.75], &[0])
            .expect("valid columns");
        let customer = set.customers().first().expect("one customer");
        assert_eq!(customer.latitude(), 39.95);
        assert_eq!(customer.longitude(), 32.75);
        assert_eq!(set.latitudes(), vec![DEPOT.y, 39.95]);
        assert_eq!(set.longitudes(), vec![DEPOT.x, 32.75]);
    }
}
