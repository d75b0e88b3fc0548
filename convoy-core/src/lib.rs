//! Core domain types and planning pipeline for the Convoy route planner.
//!
//! Convoy plans delivery routes for capacity-limited vehicles leaving a
//! single depot. The pipeline is:
//!
//! - [`build_distance_matrix`] computes haversine distances in metres
//!   between the depot (index 0) and every customer.
//! - [`group_by_capacity`] packs customers, in input order, into groups that
//!   fit one vehicle.
//! - [`solve_group`] hands each group to a pluggable [`RouteSolver`] and
//!   maps its circuit back to global indices.
//! - [`evaluate_route`] prices a route from its length and a [`CostRate`].
//! - [`RoutePlanner`] drives the above and subdivides over-budget groups
//!   once, at half the vehicle capacity.
//!
//! Constructors validate their input and return [`ValidationError`] early,
//! so the algorithms themselves never see malformed data.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod cost;
pub mod distance;
mod error;
mod grouping;
mod planner;
mod point;
mod route;
pub mod solver;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use config::{DEFAULT_MAX_COST, DEFAULT_VEHICLE_CAPACITY, DEFAULT_WORKERS, PlannerConfig};
pub use cost::{CostRate, DEFAULT_COST_PER_KILOMETRE, RouteCost, evaluate_route, route_distance};
pub use distance::{
    DistanceError, DistanceMatrix, DistanceProvider, EARTH_RADIUS_KM, HaversineDistanceProvider,
    METRES_PER_KILOMETRE, build_distance_matrix, haversine_metres,
};
pub use error::ValidationError;
pub use grouping::{Group, GroupId, group_by_capacity, group_customers, subdivide_group};
pub use planner::{PlanEntry, PlanError, RoutePlan, RoutePlanner, RouteStatus, Subdivision};
pub use point::{CustomerSet, DEPOT_INDEX, Point};
pub use route::{Route, RouteError};
pub use solver::{
    CheapestArcSolver, DEFAULT_MAX_IMPROVEMENT_PASSES, RouteSolver, SolveError, solve_group,
    validate_circuit,
};
