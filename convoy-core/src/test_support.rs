//! Deterministic collaborators for unit and behaviour tests.

use std::collections::BTreeSet;

use crate::{DistanceError, DistanceMatrix, DistanceProvider, Point, RouteSolver, SolveError};

/// `DistanceProvider` returning a preset matrix regardless of coordinates.
///
/// The matrix must cover exactly the points requested.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedMatrixDistanceProvider {
    matrix: DistanceMatrix,
}

impl FixedMatrixDistanceProvider {
    /// Wrap `matrix`.
    #[must_use]
    pub const fn new(matrix: DistanceMatrix) -> Self {
        Self { matrix }
    }

    /// Build from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns the error of [`DistanceMatrix::from_rows`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DistanceError> {
        DistanceMatrix::from_rows(rows).map(Self::new)
    }
}

impl DistanceProvider for FixedMatrixDistanceProvider {
    fn distance_matrix(&self, points: &[Point]) -> Result<DistanceMatrix, DistanceError> {
        if points.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        if self.matrix.len() != points.len() {
            return Err(DistanceError::DimensionMismatch {
                rows: self.matrix.len(),
                expected: points.len(),
            });
        }
        Ok(self.matrix.clone())
    }
}

/// `RouteSolver` visiting local nodes in ascending index order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialSolver;

impl RouteSolver for SequentialSolver {
    fn solve_circuit(
        &self,
        matrix: &DistanceMatrix,
        start: usize,
    ) -> Result<Vec<usize>, SolveError> {
        let mut circuit = Vec::with_capacity(matrix.len() + 1);
        circuit.push(start);
        circuit.extend((0..matrix.len()).filter(|&node| node != start));
        circuit.push(start);
        Ok(circuit)
    }
}

/// `RouteSolver` that fails on selected problem sizes.
///
/// Sizes count customers, i.e. local nodes excluding the depot. Problems of
/// other sizes are solved like [`SequentialSolver`].
#[derive(Debug, Default, Clone)]
pub struct FailingSolver {
    sizes: Option<BTreeSet<usize>>,
}

impl FailingSolver {
    /// Fail every solve with [`SolveError::NoSolution`].
    #[must_use]
    pub const fn always() -> Self {
        Self { sizes: None }
    }

    /// Fail only problems with one of the given customer counts.
    #[must_use]
    pub fn for_customer_counts<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            sizes: Some(sizes.into_iter().collect()),
        }
    }
}

impl RouteSolver for FailingSolver {
    fn solve_circuit(
        &self,
        matrix: &DistanceMatrix,
        start: usize,
    ) -> Result<Vec<usize>, SolveError> {
        let customers = matrix.len().saturating_sub(1);
        match &self.sizes {
            Some(sizes) if !sizes.contains(&customers) => {
                SequentialSolver.solve_circuit(matrix, start)
            }
            _ => Err(SolveError::NoSolution),
        }
    }
}
