//! Single-vehicle route solving.
//!
//! A [`RouteSolver`] orders one group's stops. It sees only a local distance
//! matrix where index 0 is the depot, and returns a closed circuit of local
//! indices. [`solve_group`] builds that local problem from a group and maps
//! the answer back to global point indices.

mod adapter;
mod cheapest_arc;

use thiserror::Error;

use crate::DistanceMatrix;

pub use adapter::{solve_group, validate_circuit};
pub use cheapest_arc::{CheapestArcSolver, DEFAULT_MAX_IMPROVEMENT_PASSES};

/// Why a group could not be given a route.
///
/// Recorded against the (sub-)group in the plan; never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveError {
    /// The group has no customers.
    #[error("group has no customers to route")]
    EmptyGroup,
    /// The solver found no feasible circuit.
    #[error("solver found no feasible circuit")]
    NoSolution,
    /// The solver returned a sequence that is not a valid circuit.
    #[error("solver returned an invalid circuit: {0}")]
    InvalidCircuit(String),
    /// The local problem could not be built or was rejected by the solver.
    #[error("invalid solver input: {0}")]
    InvalidInput(String),
}

/// Order the nodes of a small complete graph into a closed circuit.
///
/// Given an `n x n` matrix and a `start` node, implementations return a
/// sequence beginning and ending at `start` that visits every other node
/// exactly once. Plans are only reproducible when the solver is: identical
/// input should yield identical output.
///
/// Solvers must be `Send + Sync` so groups can be evaluated in parallel.
///
/// # Examples
///
/// ```rust
/// use convoy_core::{DistanceMatrix, RouteSolver, SolveError};
///
/// struct IndexOrder;
///
/// impl RouteSolver for IndexOrder {
///     fn solve_circuit(
///         &self,
///         matrix: &DistanceMatrix,
///         start: usize,
///     ) -> Result<Vec<usize>, SolveError> {
///         let mut circuit = vec![start];
///         circuit.extend((0..matrix.len()).filter(|&node| node != start));
///         circuit.push(start);
///         Ok(circuit)
///     }
/// }
///
/// let circuit = IndexOrder.solve_circuit(&DistanceMatrix::zeros(3), 0)?;
/// assert_eq!(circuit, vec![0, 1, 2, 0]);
/// # Ok::<(), SolveError>(())
/// ```
pub trait RouteSolver: Send + Sync {
    /// Produce a circuit over every node of `matrix`, anchored at `start`.
    fn solve_circuit(&self, matrix: &DistanceMatrix, start: usize)
    -> Result<Vec<usize>, SolveError>;
}

impl<T: RouteSolver + ?Sized> RouteSolver for Box<T> {
    fn solve_circuit(
        &self,
        matrix: &DistanceMatrix,
        start: usize,
    ) -> Result<Vec<usize>, SolveError> {
        (**self).solve_circuit(matrix, start)
    }
}

impl<T: RouteSolver + ?Sized> RouteSolver for &T {
    fn solve_circuit(
        &self,
        matrix: &DistanceMatrix,
        start: usize,
    ) -> Result<Vec<usize>, SolveError> {
        (**self).solve_circuit(matrix, start)
    }
}
