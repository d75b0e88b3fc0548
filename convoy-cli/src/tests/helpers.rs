//! Test helpers for writing customer tables and stub solvers.

use super::*;
use camino::Utf8PathBuf;
use convoy_core::RouteSolver;
use convoy_core::test_support::SequentialSolver;
use std::fs;
use tempfile::TempDir;

use crate::plan::{PlanSolverBuilder, SolverKind};

/// Three customers of demand 40 around the default depot.
pub(super) const CUSTOMER_TABLE: &str = "\
enlem,boylam,malzeme_talebi
39.9300,32.8600,40
39.9250,32.8700,40
39.9100,32.8400,40
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, contents).expect("write file");
}

/// A temporary workspace holding one customer table.
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) customers: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let customers = root.join("customers.csv");
        write_utf8(&customers, CUSTOMER_TABLE.as_bytes());
        Self {
            _tmp: tmp,
            root,
            customers,
        }
    }

    pub(super) fn read_customers(&self) -> String {
        fs::read_to_string(&self.customers).expect("read customer table")
    }
}

/// Builds [`SequentialSolver`] whatever kind is requested, recording the kind.
#[derive(Debug, Default)]
pub(super) struct StubPlanSolverBuilder {
    pub(super) requested: std::cell::Cell<Option<SolverKind>>,
}

impl PlanSolverBuilder for StubPlanSolverBuilder {
    fn build(&self, kind: SolverKind) -> Result<Box<dyn RouteSolver>, CliError> {
        self.requested.set(Some(kind));
        Ok(Box::new(SequentialSolver))
    }
}
