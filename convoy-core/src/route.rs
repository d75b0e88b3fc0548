//! Closed vehicle circuits anchored at the depot.

use thiserror::Error;

use crate::DEPOT_INDEX;

/// A closed vehicle circuit over global point indices.
///
/// Every route starts and ends at the depot (index 0) and is at least two
/// stops long.
///
/// # Examples
///
/// ```
/// use convoy_core::Route;
///
/// # fn main() -> Result<(), convoy_core::RouteError> {
/// let route = Route::new(vec![0, 2, 1, 0])?;
/// assert_eq!(route.customers(), &[2, 1]);
/// assert_eq!(route.len(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Route {
    stops: Vec<usize>,
}

/// Errors returned by [`Route::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Fewer than two stops were supplied.
    #[error("route must contain at least two stops, got {0}")]
    TooShort(usize),
    /// The first or last stop is not the depot.
    #[error("route must start and end at the depot")]
    NotClosedAtDepot,
}

impl Route {
    /// Validates and constructs a [`Route`].
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::TooShort`] for fewer than two stops and
    /// [`RouteError::NotClosedAtDepot`] when either end is not the depot.
    pub fn new(stops: Vec<usize>) -> Result<Self, RouteError> {
        if stops.len() < 2 {
            return Err(RouteError::TooShort(stops.len()));
        }
        if stops.first() != Some(&DEPOT_INDEX) || stops.last() != Some(&DEPOT_INDEX) {
            return Err(RouteError::NotClosedAtDepot);
        }
        Ok(Self { stops })
    }

    /// All stops including both depot visits.
    #[must_use]
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Customer stops between the two depot visits.
    #[must_use]
    pub fn customers(&self) -> &[usize] {
        self.stops
            .get(1..self.stops.len().saturating_sub(1))
            .unwrap_or_default()
    }

    /// Number of stops including both depot visits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always `false`; a valid route has at least two stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl TryFrom<Vec<usize>> for Route {
    type Error = RouteError;

    fn try_from(stops: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<Route> for Vec<usize> {
    fn from(route: Route) -> Self {
        route.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], RouteError::TooShort(0))]
    #[case(vec![0], RouteError::TooShort(1))]
    #[case(vec![1, 0], RouteError::NotClosedAtDepot)]
    #[case(vec![0, 1], RouteError::NotClosedAtDepot)]
    fn rejects_malformed_routes(#[case] stops: Vec<usize>, #[case] expected: RouteError) {
        assert_eq!(Route::new(stops), Err(expected));
    }

    #[rstest]
    fn depot_only_route_has_no_customers() {
        let route = Route::new(vec![0, 0]).expect("degenerate but valid");
        assert!(route.customers().is_empty());
        assert!(!route.is_empty());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_stop_list() {
        let route = Route::new(vec![0, 3, 1, 0]).expect("valid route");
        let json = serde_json::to_string(&route).expect("serialise");
        assert_eq!(json, "[0,3,1,0]");
        let err = serde_json::from_str::<Route>("[1,0]");
        assert!(err.is_err());
    }
}
