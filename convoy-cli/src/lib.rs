//! Command-line interface for the Convoy route planner.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use log::LevelFilter;

mod add_customer;
mod error;
mod logging;
mod plan;

pub use error::CliError;

use add_customer::{AddCustomerArgs, run_add_customer};
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_CUSTOMERS: &str = "customers";
pub(crate) const ARG_PLAN_CAPACITY: &str = "capacity";
pub(crate) const ARG_PLAN_MAX_COST: &str = "max-cost";
pub(crate) const ARG_PLAN_COST_PER_KM: &str = "cost-per-km";
pub(crate) const ARG_PLAN_DEPOT_LAT: &str = "depot-lat";
pub(crate) const ARG_PLAN_DEPOT_LON: &str = "depot-lon";
pub(crate) const ARG_PLAN_WORKERS: &str = "workers";
pub(crate) const ARG_PLAN_SOLVER: &str = "solver";
pub(crate) const ARG_PLAN_OUTPUT: &str = "output";
pub(crate) const ARG_NEW_CUSTOMER_LAT: &str = "new-customer-lat";
pub(crate) const ARG_NEW_CUSTOMER_LON: &str = "new-customer-lon";
pub(crate) const ARG_NEW_CUSTOMER_DEMAND: &str = "new-customer-demand";
pub(crate) const ARG_LATITUDE: &str = "lat";
pub(crate) const ARG_LONGITUDE: &str = "lon";
pub(crate) const ARG_DEMAND: &str = "demand";
pub(crate) const ENV_PLAN_CUSTOMERS: &str = "CONVOY_CMDS_PLAN_CUSTOMERS_PATH";
pub(crate) const ENV_ADD_CUSTOMER_CUSTOMERS: &str = "CONVOY_CMDS_ADD_CUSTOMER_CUSTOMERS_PATH";
pub(crate) const ENV_ADD_CUSTOMER_LATITUDE: &str = "CONVOY_CMDS_ADD_CUSTOMER_LATITUDE";
pub(crate) const ENV_ADD_CUSTOMER_LONGITUDE: &str = "CONVOY_CMDS_ADD_CUSTOMER_LONGITUDE";
pub(crate) const ENV_ADD_CUSTOMER_DEMAND: &str = "CONVOY_CMDS_ADD_CUSTOMER_DEMAND";

/// Run the Convoy CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger(cli.log_level)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::AddCustomer(args) => run_add_customer(args),
    }
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match convoy_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "convoy",
    about = "Plan capacity-limited delivery routes from a single depot",
    version
)]
struct Cli {
    /// Log verbosity written to stderr (off, error, warn, info, debug, trace).
    #[arg(long = "log-level", value_name = "level", default_value = "info", global = true)]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan routes for a customer table and print them as JSON.
    Plan(PlanArgs),
    /// Append one customer to a customer table.
    AddCustomer(AddCustomerArgs),
}

#[cfg(test)]
mod tests;
