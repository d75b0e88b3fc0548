//! `VrpRouteSolver` implementation backed by `vrp-core`.

use convoy_core::{DistanceMatrix, RouteSolver, SolveError};

use crate::vrp::VrpSolveContext;

/// Default upper bound on `vrp-core` generations.
pub const DEFAULT_MAX_GENERATIONS: usize = 50;

/// Configuration for [`VrpRouteSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VrpRouteSolverConfig {
    /// Upper bound on `vrp-core` generations.
    pub max_generations: usize,
}

impl Default for VrpRouteSolverConfig {
    fn default() -> Self {
        Self {
            max_generations: DEFAULT_MAX_GENERATIONS,
        }
    }
}

/// Single-vehicle solver using the `vrp-core` metaheuristics.
///
/// Each call models the local problem as one vehicle starting and ending at
/// `start` with a required job at every other node, and minimises the
/// distance travelled. The search is randomised, so repeated calls may
/// return different circuits of similar length.
///
/// Problems with at most two nodes have a single circuit and are answered
/// without invoking the search.
#[derive(Debug, Clone, Default)]
pub struct VrpRouteSolver {
    config: VrpRouteSolverConfig,
}

impl VrpRouteSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: VrpRouteSolverConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &VrpRouteSolverConfig {
        &self.config
    }
}

impl RouteSolver for VrpRouteSolver {
    fn solve_circuit(
        &self,
        matrix: &DistanceMatrix,
        start: usize,
    ) -> Result<Vec<usize>, SolveError> {
        if start >= matrix.len() {
            return Err(SolveError::InvalidInput(format!(
                "start node {start} outside a matrix of {} nodes",
                matrix.len()
            )));
        }
        if matrix.len() <= 2 {
            let mut circuit = vec![start];
            circuit.extend((0..matrix.len()).filter(|&node| node != start));
            circuit.push(start);
            return Ok(circuit);
        }

        log::debug!(
            "solving a {}-node circuit with vrp-core (max {} generations)",
            matrix.len(),
            self.config.max_generations
        );
        VrpSolveContext::new(&self.config).solve(matrix, start)
    }
}
