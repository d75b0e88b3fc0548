//! Plan command implementation for the Convoy CLI.

use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use clap::Parser;
use convoy_core::{
    CheapestArcSolver, CostRate, DEFAULT_COST_PER_KILOMETRE, DEFAULT_MAX_COST,
    DEFAULT_VEHICLE_CAPACITY, DEFAULT_WORKERS, HaversineDistanceProvider, PlannerConfig,
    RoutePlan, RoutePlanner, RouteSolver,
};
use convoy_data::{CustomerRecord, append_customer, load_customer_set};
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CUSTOMERS, ARG_NEW_CUSTOMER_DEMAND, ARG_NEW_CUSTOMER_LAT, ARG_NEW_CUSTOMER_LON,
    ARG_PLAN_CAPACITY, ARG_PLAN_COST_PER_KM, ARG_PLAN_DEPOT_LAT, ARG_PLAN_DEPOT_LON,
    ARG_PLAN_MAX_COST, ARG_PLAN_OUTPUT, ARG_PLAN_SOLVER, ARG_PLAN_WORKERS, CliError,
    ENV_PLAN_CUSTOMERS, require_existing,
};

/// Depot latitude used when none is configured.
pub(crate) const DEFAULT_DEPOT_LATITUDE: f64 = 39.9208;
/// Depot longitude used when none is configured.
pub(crate) const DEFAULT_DEPOT_LONGITUDE: f64 = 32.8541;

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan delivery routes for every customer in a CSV table. \
                 Customers are grouped by vehicle capacity, each group is \
                 routed from the depot, and groups whose route costs more \
                 than the budget are re-grouped once at half capacity. The \
                 resulting plan is printed as JSON.",
    about = "Plan capacity-limited routes for a customer table"
)]
#[ortho_config(prefix = "CONVOY")]
pub(crate) struct PlanArgs {
    /// Path to the customer CSV table.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) customers_path: Option<Utf8PathBuf>,
    /// Vehicle capacity in demand units (default 100).
    #[arg(long = ARG_PLAN_CAPACITY, value_name = "units")]
    #[serde(default)]
    pub(crate) capacity: Option<u32>,
    /// Route cost above which a group is subdivided (default 10000).
    #[arg(long = ARG_PLAN_MAX_COST, value_name = "cost")]
    #[serde(default)]
    pub(crate) max_cost: Option<f64>,
    /// Cost per kilometre travelled (default 5).
    #[arg(long = ARG_PLAN_COST_PER_KM, value_name = "cost")]
    #[serde(default)]
    pub(crate) cost_per_km: Option<f64>,
    /// Depot latitude in degrees.
    #[arg(long = ARG_PLAN_DEPOT_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) depot_lat: Option<f64>,
    /// Depot longitude in degrees.
    #[arg(long = ARG_PLAN_DEPOT_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) depot_lon: Option<f64>,
    /// Worker threads used to route groups; 1 routes them sequentially.
    #[arg(long = ARG_PLAN_WORKERS, value_name = "count")]
    #[serde(default)]
    pub(crate) workers: Option<usize>,
    /// Single-vehicle solver: `cheapest-arc` (default) or `vrp`.
    #[arg(long = ARG_PLAN_SOLVER, value_name = "name")]
    #[serde(default)]
    pub(crate) solver: Option<String>,
    /// Latitude of a customer to append to the table before planning.
    #[arg(long = ARG_NEW_CUSTOMER_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) new_customer_lat: Option<f64>,
    /// Longitude of a customer to append to the table before planning.
    #[arg(long = ARG_NEW_CUSTOMER_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) new_customer_lon: Option<f64>,
    /// Demand of a customer to append to the table before planning.
    #[arg(long = ARG_NEW_CUSTOMER_DEMAND, value_name = "units", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) new_customer_demand: Option<i64>,
    /// Write the plan to this file instead of stdout.
    #[arg(long = ARG_PLAN_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Which single-vehicle solver routes each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SolverKind {
    /// Deterministic construction plus 2-opt.
    #[default]
    CheapestArc,
    /// Metaheuristic search backed by `vrp-core`.
    Vrp,
}

impl FromStr for SolverKind {
    type Err = CliError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cheapest-arc" | "cheapest_arc" => Ok(Self::CheapestArc),
            "vrp" => Ok(Self::Vrp),
            _ => Err(CliError::UnknownSolver {
                name: name.to_owned(),
            }),
        }
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the customer table.
    pub(crate) customers_path: Utf8PathBuf,
    /// Depot location, `x` as longitude.
    pub(crate) depot: Coord<f64>,
    /// Validated planner parameters.
    pub(crate) planner: PlannerConfig,
    /// Solver routing each group.
    pub(crate) solver: SolverKind,
    /// Customer appended to the table before planning.
    pub(crate) new_customer: Option<CustomerRecord>,
    /// Output file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.customers_path, ARG_CUSTOMERS)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let customers_path = args.customers_path.ok_or(CliError::MissingArgument {
            field: ARG_CUSTOMERS,
            env: ENV_PLAN_CUSTOMERS,
        })?;

        let cost_rate =
            CostRate::per_kilometre(args.cost_per_km.unwrap_or(DEFAULT_COST_PER_KILOMETRE))?;
        let planner = PlannerConfig::default()
            .with_vehicle_capacity(args.capacity.unwrap_or(DEFAULT_VEHICLE_CAPACITY))
            .with_max_cost(args.max_cost.unwrap_or(DEFAULT_MAX_COST))
            .with_cost_rate(cost_rate)
            .with_workers(args.workers.unwrap_or(DEFAULT_WORKERS));
        planner.validate()?;

        let solver = args
            .solver
            .as_deref()
            .map_or(Ok(SolverKind::default()), SolverKind::from_str)?;

        let new_customer = match (
            args.new_customer_lat,
            args.new_customer_lon,
            args.new_customer_demand,
        ) {
            (Some(latitude), Some(longitude), Some(demand)) => {
                Some(CustomerRecord::new(latitude, longitude, demand))
            }
            (None, None, None) => None,
            _ => return Err(CliError::IncompleteNewCustomer),
        };

        Ok(Self {
            customers_path,
            depot: Coord {
                x: args.depot_lon.unwrap_or(DEFAULT_DEPOT_LONGITUDE),
                y: args.depot_lat.unwrap_or(DEFAULT_DEPOT_LATITUDE),
            },
            planner,
            solver,
            new_customer,
            output: args.output,
        })
    }
}

/// Builds the route solver for the current plan invocation.
pub(crate) trait PlanSolverBuilder {
    fn build(&self, kind: SolverKind) -> Result<Box<dyn RouteSolver>, CliError>;
}

pub(crate) struct DefaultPlanSolverBuilder;

impl PlanSolverBuilder for DefaultPlanSolverBuilder {
    fn build(&self, kind: SolverKind) -> Result<Box<dyn RouteSolver>, CliError> {
        match kind {
            SolverKind::CheapestArc => Ok(Box::new(CheapestArcSolver::default())),
            SolverKind::Vrp => build_vrp_solver(),
        }
    }
}

#[cfg(feature = "solver-vrp")]
fn build_vrp_solver() -> Result<Box<dyn RouteSolver>, CliError> {
    Ok(Box::new(convoy_solver_vrp::VrpRouteSolver::new()))
}

#[cfg(not(feature = "solver-vrp"))]
fn build_vrp_solver() -> Result<Box<dyn RouteSolver>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-vrp",
        action: "planning with the vrp solver",
    })
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlanSolverBuilder, &mut stdout)
}

/// Plan and write the result to `--output`, or to `writer` when unset.
pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let plan = execute_plan(&config, builder)?;
    match &config.output {
        Some(path) => {
            let mut file =
                convoy_fs::create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                    path: path.clone(),
                    source,
                })?;
            write_plan(&mut file, &plan)?;
            log::info!("wrote route plan to {path}");
            Ok(())
        }
        None => write_plan(writer, &plan),
    }
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanSolverBuilder,
) -> Result<RoutePlan, CliError> {
    if let Some(record) = &config.new_customer {
        append_customer(&config.customers_path, record)?;
    }
    let customers = load_customer_set(&config.customers_path, config.depot)?;
    let solver = builder.build(config.solver)?;
    let planner = RoutePlanner::new(solver, HaversineDistanceProvider, config.planner)?;
    Ok(planner.plan(&customers)?)
}

fn write_plan(writer: &mut dyn Write, plan: &RoutePlan) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(plan).map_err(CliError::SerialisePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
