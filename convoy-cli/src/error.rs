//! Error types emitted by the Convoy CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use convoy_core::{PlanError, ValidationError};
use convoy_data::CustomerCsvError;
use thiserror::Error;

/// Errors emitted by the Convoy CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The logger could not be installed.
    #[error("failed to initialise logging: {0}")]
    InitLogger(#[source] log::SetLoggerError),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Only some of the new customer's fields were given.
    #[error(
        "a new customer needs --new-customer-lat, --new-customer-lon and \
         --new-customer-demand together"
    )]
    IncompleteNewCustomer,
    /// The solver name is not recognised.
    #[error("unknown solver {name:?} (expected one of: cheapest-arc, vrp)")]
    UnknownSolver { name: String },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        feature: &'static str,
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Planner parameters are invalid.
    #[error("invalid planner configuration: {0}")]
    InvalidConfiguration(#[from] ValidationError),
    /// Reading or appending the customer table failed.
    #[error(transparent)]
    Customers(#[from] CustomerCsvError),
    /// The planning run failed as a whole.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Serialising the plan failed.
    #[error("failed to serialise route plan: {0}")]
    SerialisePlan(#[source] serde_json::Error),
    /// The output file could not be created.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the plan failed.
    #[error("failed to write route plan: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
