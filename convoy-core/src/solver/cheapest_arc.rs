//! Deterministic nearest-arc construction with 2-opt refinement.

use crate::{DistanceMatrix, route_distance};

use super::{RouteSolver, SolveError};

/// Default bound on full 2-opt sweeps.
pub const DEFAULT_MAX_IMPROVEMENT_PASSES: usize = 50;

/// Smallest gain treated as an improvement; stops float noise from cycling.
const MIN_GAIN: f64 = 1e-9;

/// Built-in [`RouteSolver`] that extends the path along the cheapest arc.
///
/// Starting at `start`, the path repeatedly moves to the nearest unvisited
/// node, breaking ties towards the lowest index, then returns to `start`. The
/// circuit is then improved by 2-opt segment reversals until no reversal
/// shortens it or the pass limit is reached. Output depends only on the
/// matrix, so repeated runs agree exactly.
///
/// # Examples
/// ```
/// use convoy_core::{CheapestArcSolver, DistanceMatrix, RouteSolver};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0, 4.0],
///     vec![2.0, 0.0, 3.0, 8.0],
///     vec![9.0, 3.0, 0.0, 1.0],
///     vec![4.0, 8.0, 1.0, 0.0],
/// ])?;
/// let circuit = CheapestArcSolver::default().solve_circuit(&matrix, 0)?;
/// assert_eq!(circuit, vec![0, 1, 2, 3, 0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheapestArcSolver {
    max_passes: usize,
}

impl Default for CheapestArcSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IMPROVEMENT_PASSES)
    }
}

impl CheapestArcSolver {
    /// Construct a solver performing at most `max_passes` 2-opt sweeps.
    ///
    /// Zero disables refinement and returns the construction as is.
    #[must_use]
    pub const fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }

    /// Configured 2-opt pass limit.
    #[must_use]
    pub const fn max_passes(&self) -> usize {
        self.max_passes
    }
}

impl RouteSolver for CheapestArcSolver {
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
        let mut circuit = construct(matrix, start);
        improve(&mut circuit, matrix, self.max_passes);
        Ok(circuit)
    }
}

fn construct(matrix: &DistanceMatrix, start: usize) -> Vec<usize> {
    let nodes = matrix.len();
    let mut visited = vec![false; nodes];
    let mut circuit = Vec::with_capacity(nodes + 1);
    if let Some(slot) = visited.get_mut(start) {
        *slot = true;
    }
    circuit.push(start);

    let mut current = start;
    while let Some(next) = nearest_unvisited(matrix, current, &visited) {
        if let Some(slot) = visited.get_mut(next) {
            *slot = true;
        }
        circuit.push(next);
        current = next;
    }
    circuit.push(start);
    circuit
}

fn nearest_unvisited(matrix: &DistanceMatrix, from: usize, visited: &[bool]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (node, &done) in visited.iter().enumerate() {
        if done {
            continue;
        }
        let distance = matrix.get(from, node).unwrap_or(f64::INFINITY);
        // Strict comparison keeps the lowest index on ties.
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((node, distance));
        }
    }
    best.map(|(node, _)| node)
}

fn improve(circuit: &mut [usize], matrix: &DistanceMatrix, max_passes: usize) {
    let len = circuit.len();
    // Reversing needs at least two interior stops.
    if len < 4 {
        return;
    }
    for _ in 0..max_passes {
        let mut improved = false;
        for i in 1..len - 2 {
            for j in i + 1..len - 1 {
                if reversal_gain(circuit, matrix, i, j) > MIN_GAIN {
                    if let Some(segment) = circuit.get_mut(i..=j) {
                        segment.reverse();
                    }
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
}

/// Distance saved by reversing `circuit[i..=j]`.
///
/// Evaluates the whole affected window so asymmetric matrices are handled.
#[expect(
    clippy::float_arithmetic,
    reason = "gain is the difference of two path lengths"
)]
fn reversal_gain(circuit: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let Some(window) = circuit.get(i - 1..=j + 1) else {
        return 0.0;
    };
    let mut reversed = window.to_vec();
    let inner_end = reversed.len() - 1;
    if let Some(segment) = reversed.get_mut(1..inner_end) {
        segment.reverse();
    }
    route_distance(window, matrix) - route_distance(&reversed, matrix)
}
