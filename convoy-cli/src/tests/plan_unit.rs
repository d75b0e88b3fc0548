//! Focused unit tests covering plan CLI configuration and execution.

use super::helpers::{StubPlanSolverBuilder, Workspace, write_utf8};
use super::*;
use convoy_core::{
    CostRate, DEFAULT_MAX_COST, DEFAULT_VEHICLE_CAPACITY, RoutePlan, RouteStatus,
    ValidationError,
};
use rstest::{fixture, rstest};

use crate::plan::{
    DEFAULT_DEPOT_LATITUDE, DEFAULT_DEPOT_LONGITUDE, PlanArgs, PlanConfig, SolverKind,
    config_from_layers_for_test, execute_plan, run_plan_with,
};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn args_for(workspace: &Workspace) -> PlanArgs {
    PlanArgs {
        customers_path: Some(workspace.customers.clone()),
        ..PlanArgs::default()
    }
}

#[rstest]
fn converting_plan_without_customers_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing table should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_CUSTOMERS);
            assert_eq!(env, ENV_PLAN_CUSTOMERS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_defaults(workspace: Workspace) {
    let config = PlanConfig::try_from(args_for(&workspace)).expect("config should build");
    assert_eq!(config.customers_path, workspace.customers);
    assert_eq!(config.depot.y, DEFAULT_DEPOT_LATITUDE);
    assert_eq!(config.depot.x, DEFAULT_DEPOT_LONGITUDE);
    assert_eq!(config.planner.vehicle_capacity, DEFAULT_VEHICLE_CAPACITY);
    assert_eq!(config.planner.max_cost, DEFAULT_MAX_COST);
    assert_eq!(config.planner.cost_rate, CostRate::default());
    assert_eq!(config.planner.workers, 1);
    assert_eq!(config.solver, SolverKind::CheapestArc);
    assert_eq!(config.new_customer, None);
    assert_eq!(config.output, None);
}

#[rstest]
fn plan_config_converts_cost_per_kilometre(workspace: Workspace) {
    let args = PlanArgs {
        cost_per_km: Some(2.0),
        ..args_for(&workspace)
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.planner.cost_rate.as_per_metre(), 0.002);
}

#[rstest]
#[case::zero_capacity(Some(0), None, None)]
#[case::negative_budget(None, Some(-1.0), None)]
#[case::zero_workers(None, None, Some(0))]
fn plan_config_rejects_invalid_planner_parameters(
    workspace: Workspace,
    #[case] capacity: Option<u32>,
    #[case] max_cost: Option<f64>,
    #[case] workers: Option<usize>,
) {
    let args = PlanArgs {
        capacity,
        max_cost,
        workers,
        ..args_for(&workspace)
    };
    let err = PlanConfig::try_from(args).expect_err("invalid parameters");
    match err {
        CliError::InvalidConfiguration(_) => {}
        other => panic!("expected InvalidConfiguration, found {other:?}"),
    }
}

#[rstest]
#[case("cheapest-arc", SolverKind::CheapestArc)]
#[case("CHEAPEST_ARC", SolverKind::CheapestArc)]
#[case("vrp", SolverKind::Vrp)]
fn solver_names_are_parsed(#[case] name: &str, #[case] expected: SolverKind) {
    assert_eq!(name.parse::<SolverKind>().expect("known solver"), expected);
}

#[rstest]
fn unknown_solver_names_are_rejected(workspace: Workspace) {
    let args = PlanArgs {
        solver: Some("genetic".to_owned()),
        ..args_for(&workspace)
    };
    match PlanConfig::try_from(args).expect_err("unknown solver") {
        CliError::UnknownSolver { name } => assert_eq!(name, "genetic"),
        other => panic!("expected UnknownSolver, found {other:?}"),
    }
}

#[rstest]
#[case(Some(39.9), None, None)]
#[case(Some(39.9), Some(32.8), None)]
#[case(None, None, Some(5))]
fn partial_new_customer_is_rejected(
    workspace: Workspace,
    #[case] lat: Option<f64>,
    #[case] lon: Option<f64>,
    #[case] demand: Option<i64>,
) {
    let args = PlanArgs {
        new_customer_lat: lat,
        new_customer_lon: lon,
        new_customer_demand: demand,
        ..args_for(&workspace)
    };
    let err = PlanConfig::try_from(args).expect_err("incomplete customer");
    assert!(matches!(err, CliError::IncompleteNewCustomer));
}

#[rstest]
fn validate_sources_reports_missing_table(workspace: Workspace) {
    let args = PlanArgs {
        customers_path: Some(workspace.root.join("absent.csv")),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    match config.validate_sources().expect_err("table missing") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_CUSTOMERS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories(workspace: Workspace) {
    let args = PlanArgs {
        customers_path: Some(workspace.root.clone()),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    match config.validate_sources().expect_err("directory is not a table") {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_CUSTOMERS);
            assert_eq!(path, workspace.root);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn execute_plan_groups_by_capacity(workspace: Workspace) {
    let config = PlanConfig::try_from(args_for(&workspace)).expect("config should build");
    let builder = StubPlanSolverBuilder::default();
    let plan = execute_plan(&config, &builder).expect("plan should succeed");

    assert_eq!(builder.requested.get(), Some(SolverKind::CheapestArc));
    let members: Vec<Vec<usize>> = plan
        .entries()
        .iter()
        .map(|entry| entry.members.clone())
        .collect();
    assert_eq!(members, vec![vec![1, 2], vec![3]]);
    assert_eq!(plan.entries()[0].stops(), &[0, 1, 2, 0]);
    assert!(
        plan.entries()
            .iter()
            .all(|entry| entry.status == RouteStatus::Accepted)
    );
}

#[rstest]
fn execute_plan_appends_new_customer_first(workspace: Workspace) {
    let args = PlanArgs {
        new_customer_lat: Some(39.94),
        new_customer_lon: Some(32.88),
        new_customer_demand: Some(15),
        ..args_for(&workspace)
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    let plan = execute_plan(&config, &StubPlanSolverBuilder::default()).expect("plan");

    assert!(workspace.read_customers().ends_with("39.94,32.88,15\n"));
    let routed: usize = plan.entries().iter().map(|entry| entry.members.len()).sum();
    assert_eq!(routed, 4);
}

#[rstest]
fn execute_plan_reports_negative_demand(workspace: Workspace) {
    write_utf8(&workspace.customers, b"lat,lon,demand\n39.93,32.86,-3\n");
    let config = PlanConfig::try_from(args_for(&workspace)).expect("config should build");
    let err = execute_plan(&config, &StubPlanSolverBuilder::default()).expect_err("bad demand");
    match err {
        CliError::Customers(convoy_data::CustomerCsvError::Validation(
            ValidationError::NegativeDemand { index, demand },
        )) => {
            assert_eq!(index, 1);
            assert_eq!(demand, -3);
        }
        other => panic!("expected NegativeDemand, found {other:?}"),
    }
}

#[rstest]
fn run_plan_writes_json_to_the_writer(workspace: Workspace) {
    let mut buffer = Vec::new();
    run_plan_with(
        args_for(&workspace),
        &StubPlanSolverBuilder::default(),
        &mut buffer,
    )
    .expect("plan should succeed");

    let stdout = String::from_utf8(buffer).expect("utf-8 output");
    assert!(stdout.ends_with('\n'));
    let plan: RoutePlan = serde_json::from_str(&stdout).expect("plan JSON");
    assert_eq!(plan.len(), 2);
}

#[rstest]
fn run_plan_writes_to_output_file(workspace: Workspace) {
    let output = workspace.root.join("out").join("plan.json");
    let args = PlanArgs {
        output: Some(output.clone()),
        ..args_for(&workspace)
    };
    let mut buffer = Vec::new();
    run_plan_with(args, &StubPlanSolverBuilder::default(), &mut buffer)
        .expect("plan should succeed");

    assert!(buffer.is_empty());
    let written = std::fs::read_to_string(&output).expect("read output");
    let plan: RoutePlan = serde_json::from_str(&written).expect("plan JSON");
    assert_eq!(plan.len(), 2);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "capacity": "lots" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence(workspace: Workspace) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "capacity": 60,
            "max_cost": 500.0,
            "solver": "vrp",
        }),
        None,
    );
    composer.push_environment(json!({
        "customers_path": workspace.customers.as_str(),
        "capacity": 70,
    }));
    composer.push_cli(json!({ "capacity": 80 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.customers_path, workspace.customers);
    assert_eq!(config.planner.vehicle_capacity, 80);
    assert_eq!(config.planner.max_cost, 500.0);
    assert_eq!(config.solver, SolverKind::Vrp);
}
