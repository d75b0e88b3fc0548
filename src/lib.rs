//! Facade crate for the Convoy route planner.
//!
//! This crate re-exports the core planning types and exposes the optional
//! metaheuristic solver and CSV ingestion behind feature flags.

#![forbid(unsafe_code)]

pub use convoy_core::{
    CheapestArcSolver, CostRate, CustomerSet, DistanceMatrix, DistanceProvider, Group, GroupId,
    HaversineDistanceProvider, PlanEntry, PlanError, PlannerConfig, Point, Route, RouteCost,
    RoutePlan, RoutePlanner, RouteSolver, RouteStatus, SolveError, Subdivision, ValidationError,
    build_distance_matrix, evaluate_route, group_by_capacity, solve_group,
};

#[cfg(feature = "solver-vrp")]
pub use convoy_solver_vrp::{VrpRouteSolver, VrpRouteSolverConfig};

#[cfg(feature = "csv")]
pub use convoy_data::{
    CustomerCsvError, CustomerRecord, append_customer, load_customer_set, read_customers,
};
