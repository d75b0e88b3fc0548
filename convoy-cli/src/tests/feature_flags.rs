//! Unit tests covering feature-flag behaviour.

#![cfg(not(feature = "solver-vrp"))]

use super::*;
use rstest::rstest;

use crate::plan::{DefaultPlanSolverBuilder, PlanSolverBuilder, SolverKind};

#[rstest]
fn vrp_solver_requires_solver_vrp() {
    let err = DefaultPlanSolverBuilder
        .build(SolverKind::Vrp)
        .err()
        .expect("missing feature should error");
    match err {
        CliError::MissingFeature { feature, action } => {
            assert_eq!(feature, "solver-vrp");
            assert_eq!(action, "planning with the vrp solver");
        }
        other => panic!("expected MissingFeature, found {other:?}"),
    }
}
