//! Metaheuristic single-vehicle solver for convoy.
//!
//! This crate provides [`VrpRouteSolver`], an implementation of the
//! [`RouteSolver`](convoy_core::RouteSolver) trait backed by `vrp-core`. Each
//! group's local problem is modelled as a one-vehicle VRP with a required job
//! per customer, and the metaheuristic searches for the shortest closed tour
//! from the depot.
//!
//! The built-in [`CheapestArcSolver`](convoy_core::CheapestArcSolver) is
//! deterministic and remains the planner default; this solver trades
//! repeatability for better tours on larger groups. Modelling errors are
//! reported as [`SolveError::InvalidInput`](convoy_core::SolveError) and
//! incomplete tours as `SolveError::NoSolution`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod solver;
mod vrp;

pub use solver::{DEFAULT_MAX_GENERATIONS, VrpRouteSolver, VrpRouteSolverConfig};
