//! `vrp-core` modelling helpers for `VrpRouteSolver`.
//!
//! This module converts a local distance matrix into a single-vehicle
//! `vrp-core` problem, runs the solver, and translates the resulting tour
//! back into a circuit of local node indices.

use std::sync::Arc;

use convoy_core::{DistanceMatrix, SolveError};
use vrp_core::models::common::{Location, Profile};
use vrp_core::models::problem::TravelTime;
use vrp_core::models::solution::Route as VrpRoute;
use vrp_core::prelude::*;

use crate::solver::VrpRouteSolverConfig;

/// Every node must be served; among complete tours the shortest wins.
fn define_goal(transport: Arc<dyn TransportCost>) -> GenericResult<GoalContext> {
    let minimize_unassigned = MinimizeUnassignedBuilder::new("min-unassigned").build()?;
    let transport_feature = TransportFeatureBuilder::new("min-distance")
        .set_transport_cost(transport)
        .set_time_constrained(false)
        .build_minimize_distance()?;

    GoalContextBuilder::with_features(&[minimize_unassigned, transport_feature])?.build()
}

struct ProblemSpec {
    nodes: usize,
    start: Location,
    transport: Arc<dyn TransportCost>,
    goal: GoalContext,
}

fn define_problem(spec: ProblemSpec) -> GenericResult<Problem> {
    let ProblemSpec {
        nodes,
        start,
        transport,
        goal,
    } = spec;

    let jobs = (0..nodes)
        .filter(|&node| node != start)
        .map(|node| {
            SingleBuilder::default()
                .id(format!("node{node}").as_str())
                .location(node)?
                .build_as_job()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let vehicle = VehicleBuilder::default()
        .id("vehicle")
        .add_detail(
            VehicleDetailBuilder::default()
                .set_start_location(start)
                .set_end_location(start)
                .build()?,
        )
        .build()?;

    ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(std::iter::once(vehicle))
        .with_goal(goal)
        .with_transport_cost(transport)
        .build()
}

/// Matrix-backed transport costs; distance doubles as duration.
struct DistanceTransportCost {
    distances: Vec<Vec<f64>>,
}

impl DistanceTransportCost {
    fn new(matrix: &DistanceMatrix) -> Self {
        let distances = matrix.rows().map(<[f64]>::to_vec).collect();
        Self { distances }
    }

    fn metres(&self, from: Location, to: Location) -> f64 {
        let result = self
            .distances
            .get(from)
            .and_then(|row| row.get(to))
            .copied();
        debug_assert!(result.is_some(), "Matrix lookup failed: from={from}, to={to}");
        result.unwrap_or(0.0)
    }
}

impl TransportCost for DistanceTransportCost {
    // The trait passes route and departure context for time-dependent
    // routing; a static matrix ignores both.
    fn distance(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> Cost {
        self.metres(from, to)
    }

    fn duration(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> f64 {
        self.metres(from, to)
    }

    fn distance_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        self.metres(from, to)
    }

    fn duration_approx(&self, profile: &Profile, from: usize, to: usize) -> f64 {
        self.distance_approx(profile, from, to)
    }
}

fn invalid_input(err: &impl std::fmt::Display) -> SolveError {
    SolveError::InvalidInput(err.to_string())
}

/// Context for running a `vrp-core` solve with shared settings.
pub(super) struct VrpSolveContext<'a> {
    config: &'a VrpRouteSolverConfig,
}

impl<'a> VrpSolveContext<'a> {
    /// Create a new solve context.
    pub(super) const fn new(config: &'a VrpRouteSolverConfig) -> Self {
        Self { config }
    }

    /// Solve the circuit over every node of `matrix`, anchored at `start`.
    ///
    /// The returned sequence is built from the tour's visiting order; it is
    /// not validated here.
    pub(super) fn solve(
        &self,
        matrix: &DistanceMatrix,
        start: Location,
    ) -> Result<Vec<usize>, SolveError> {
        let transport = Arc::new(DistanceTransportCost::new(matrix));
        let goal = define_goal(transport.clone()).map_err(|err| invalid_input(&err))?;
        let problem_spec = ProblemSpec {
            nodes: matrix.len(),
            start,
            transport,
            goal,
        };
        let problem =
            Arc::new(define_problem(problem_spec).map_err(|err| invalid_input(&err))?);

        let vrp_config = VrpConfigBuilder::new(problem.clone())
            .prebuild()
            .map_err(|err| invalid_input(&err))?
            .with_max_generations(Some(self.config.max_generations))
            .build()
            .map_err(|err| invalid_input(&err))?;

        let solution = vrp_core::solver::Solver::new(problem, vrp_config)
            .solve()
            .map_err(|err| invalid_input(&err))?;

        if !solution.unassigned.is_empty() {
            log::debug!(
                "vrp-core left {} of {} nodes unassigned",
                solution.unassigned.len(),
                matrix.len().saturating_sub(1)
            );
            return Err(SolveError::NoSolution);
        }

        let mut circuit = Vec::with_capacity(matrix.len() + 1);
        circuit.push(start);
        for location in solution.get_locations().flatten() {
            if location != start && !circuit.contains(&location) {
                circuit.push(location);
            }
        }
        circuit.push(start);
        Ok(circuit)
    }
}
