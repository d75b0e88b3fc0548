//! Bridge between planner groups and [`RouteSolver`] implementations.

use crate::{DEPOT_INDEX, DistanceMatrix, Route};

use super::{RouteSolver, SolveError};

/// Local index of the depot in every per-group problem.
const LOCAL_DEPOT: usize = 0;

/// Solve the route for one group of customers.
///
/// The local problem is `[depot, members...]`; the solver receives the
/// matching sub-matrix with the depot at local index 0, and its circuit is
/// checked and translated back to global indices.
///
/// # Errors
///
/// - [`SolveError::EmptyGroup`] when `members` is empty.
/// - [`SolveError::InvalidInput`] when a member lies outside `matrix`.
/// - [`SolveError::InvalidCircuit`] when the solver output is not a closed
///   circuit over every member.
/// - Any error reported by the solver itself.
///
/// # Examples
/// ```
/// use convoy_core::{CheapestArcSolver, DistanceMatrix, solve_group};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 1.0],
///     vec![5.0, 0.0, 1.0],
///     vec![1.0, 1.0, 0.0],
/// ])?;
/// let route = solve_group(&CheapestArcSolver::default(), &[1, 2], &matrix)?;
/// assert_eq!(route.stops(), &[0, 2, 1, 0]);
/// # Ok(())
/// # }
/// ```
pub fn solve_group<S>(
    solver: &S,
    members: &[usize],
    matrix: &DistanceMatrix,
) -> Result<Route, SolveError>
where
    S: RouteSolver + ?Sized,
{
    if members.is_empty() {
        return Err(SolveError::EmptyGroup);
    }
    let mut local = Vec::with_capacity(members.len() + 1);
    local.push(DEPOT_INDEX);
    local.extend_from_slice(members);

    let sub_matrix = matrix.submatrix(&local).ok_or_else(|| {
        SolveError::InvalidInput(format!(
            "group members {members:?} exceed a distance matrix of {} points",
            matrix.len()
        ))
    })?;

    let circuit = solver.solve_circuit(&sub_matrix, LOCAL_DEPOT)?;
    validate_circuit(&circuit, local.len(), LOCAL_DEPOT)?;

    let stops = circuit
        .iter()
        .map(|&node| local.get(node).copied())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| SolveError::InvalidCircuit(format!("{circuit:?} has unknown nodes")))?;
    Route::new(stops).map_err(|err| SolveError::InvalidCircuit(err.to_string()))
}

/// Check that `circuit` starts and ends at `start` and visits each of the
/// other `nodes - 1` nodes exactly once.
///
/// # Errors
///
/// Returns [`SolveError::InvalidCircuit`] describing the first defect.
///
/// # Examples
/// ```
/// use convoy_core::validate_circuit;
///
/// assert!(validate_circuit(&[0, 2, 1, 0], 3, 0).is_ok());
/// assert!(validate_circuit(&[0, 1, 1, 0], 3, 0).is_err());
/// assert!(validate_circuit(&[1, 2, 0, 1], 3, 0).is_err());
/// ```
pub fn validate_circuit(circuit: &[usize], nodes: usize, start: usize) -> Result<(), SolveError> {
    let (Some(&first), Some(&last)) = (circuit.first(), circuit.last()) else {
        return Err(SolveError::InvalidCircuit("circuit is empty".to_owned()));
    };
    if first != start || last != start || circuit.len() < 2 {
        return Err(SolveError::InvalidCircuit(format!(
            "{circuit:?} does not start and end at node {start}"
        )));
    }
    if circuit.len() != nodes + 1 {
        return Err(SolveError::InvalidCircuit(format!(
            "{circuit:?} has {} stops but {nodes} nodes need {} stops",
            circuit.len(),
            nodes + 1
        )));
    }

    let mut seen = vec![false; nodes];
    let interior = circuit.get(1..circuit.len() - 1).unwrap_or_default();
    for &node in interior {
        match seen.get_mut(node) {
            Some(visited) if !*visited && node != start => *visited = true,
            _ => {
                return Err(SolveError::InvalidCircuit(format!(
                    "{circuit:?} repeats or misplaces node {node}"
                )));
            }
        }
    }
    Ok(())
}
