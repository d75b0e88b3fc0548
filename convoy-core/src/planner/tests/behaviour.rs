//! Behavioural coverage for route planning and one-level subdivision.

use std::cell::RefCell;

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::test_support::{FailingSolver, FixedMatrixDistanceProvider};
use crate::{
    CheapestArcSolver, CostRate, CustomerSet, DEPOT_INDEX, DistanceMatrix, DistanceProvider,
    HaversineDistanceProvider, PlanEntry, PlanError, PlannerConfig, RoutePlan, RoutePlanner,
    RouteSolver, RouteStatus,
};

#[derive(Debug)]
struct PlannerWorld {
    demands: RefCell<Vec<i64>>,
    config: RefCell<PlannerConfig>,
    matrix: RefCell<Option<DistanceMatrix>>,
    failing_sizes: RefCell<Option<Vec<usize>>>,
    outcome: RefCell<Option<Result<RoutePlan, String>>>,
}

impl PlannerWorld {
    fn new() -> Self {
        Self {
            demands: RefCell::new(Vec::new()),
            config: RefCell::new(PlannerConfig::default()),
            matrix: RefCell::new(None),
            failing_sizes: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn customers(&self) -> CustomerSet {
        let depot = Coord {
            x: 32.8541,
            y: 39.9208,
        };
        let rows: Vec<(Coord<f64>, i64)> = self
            .demands
            .borrow()
            .iter()
            .zip([(0.0, 0.009), (0.009, 0.0), (0.009, 0.009), (0.0, -0.009)].iter().cycle())
            .map(|(&demand, &(dx, dy))| {
                (
                    Coord {
                        x: depot.x + dx,
                        y: depot.y + dy,
                    },
                    demand,
                )
            })
            .collect();
        CustomerSet::new(depot, rows).unwrap_or_else(|err| panic!("invalid customers: {err}"))
    }

    fn plan(&self) -> RoutePlan {
        match self.outcome.borrow().as_ref() {
            Some(Ok(plan)) => plan.clone(),
            Some(Err(err)) => panic!("expected a plan, planning failed: {err}"),
            None => panic!("the planner must run before assertions"),
        }
    }

    fn entry(&self, id: &str) -> PlanEntry {
        let wanted = id.trim_matches('"');
        self.plan()
            .entries()
            .iter()
            .find(|entry| entry.group.to_string() == wanted)
            .cloned()
            .unwrap_or_else(|| panic!("no plan entry for group {wanted}"))
    }
}

fn run<S, D>(solver: S, distances: D, config: PlannerConfig, customers: &CustomerSet)
-> Result<RoutePlan, String>
where
    S: RouteSolver,
    D: DistanceProvider,
{
    RoutePlanner::new(solver, distances, config)
        .map_err(|err| err.to_string())?
        .plan(customers)
        .map_err(|err: PlanError| err.to_string())
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::new()
}

#[given("customers with demands {demands}")]
fn given_customers(world: &PlannerWorld, demands: String) {
    let parsed = demands
        .trim_matches('"')
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<i64>()
                .unwrap_or_else(|err| panic!("bad demand {value:?}: {err}"))
        })
        .collect();
    world.demands.replace(parsed);
}

#[given("a vehicle capacity of {capacity:u32}")]
fn given_capacity(world: &PlannerWorld, capacity: u32) {
    let config = world.config.borrow().with_vehicle_capacity(capacity);
    world.config.replace(config);
}

#[given("a maximum route cost of {max_cost:f64}")]
fn given_max_cost(world: &PlannerWorld, max_cost: f64) {
    let config = world.config.borrow().with_max_cost(max_cost);
    world.config.replace(config);
}

#[given("a cost rate of {rate:f64} per metre")]
fn given_rate(world: &PlannerWorld, rate: f64) {
    let cost_rate = CostRate::per_metre(rate).unwrap_or_else(|err| panic!("bad rate: {err}"));
    let config = world.config.borrow().with_cost_rate(cost_rate);
    world.config.replace(config);
}

#[given("a distance table where the joint tour is 7500 metres and each out-and-back is 4000 metres")]
fn given_split_table(world: &PlannerWorld) {
    let matrix = DistanceMatrix::from_rows(vec![
        vec![0.0, 2000.0, 2000.0],
        vec![2000.0, 0.0, 3500.0],
        vec![2000.0, 3500.0, 0.0],
    ])
    .unwrap_or_else(|err| panic!("bad matrix: {err}"));
    world.matrix.replace(Some(matrix));
}

#[given("a solver that fails for groups of {size:usize} customer")]
fn given_failing_solver(world: &PlannerWorld, size: usize) {
    world.failing_sizes.replace(Some(vec![size]));
}

#[when("the route planner runs")]
fn when_planner_runs(world: &PlannerWorld) {
    let customers = world.customers();
    let config = *world.config.borrow();
    let matrix = world.matrix.borrow().clone();
    let failing = world.failing_sizes.borrow().clone();
    let outcome = match (matrix, failing) {
        (Some(table), Some(sizes)) => run(
            FailingSolver::for_customer_counts(sizes),
            FixedMatrixDistanceProvider::new(table),
            config,
            &customers,
        ),
        (Some(table), None) => run(
            CheapestArcSolver::default(),
            FixedMatrixDistanceProvider::new(table),
            config,
            &customers,
        ),
        (None, Some(sizes)) => run(
            FailingSolver::for_customer_counts(sizes),
            HaversineDistanceProvider,
            config,
            &customers,
        ),
        (None, None) => run(
            CheapestArcSolver::default(),
            HaversineDistanceProvider,
            config,
            &customers,
        ),
    };
    world.outcome.replace(Some(outcome));
}

#[then("the plan has {count:usize} routes")]
fn then_route_count(world: &PlannerWorld, count: usize) {
    assert_eq!(world.plan().len(), count);
}

#[then("every route starts and ends at the depot")]
fn then_closed_routes(world: &PlannerWorld) {
    for entry in world.plan().accepted() {
        assert_eq!(entry.stops().first(), Some(&DEPOT_INDEX));
        assert_eq!(entry.stops().last(), Some(&DEPOT_INDEX));
    }
}

#[then("group {id} visits customers {customers}")]
fn then_group_visits(world: &PlannerWorld, id: String, customers: String) {
    let mut expected: Vec<usize> = customers
        .trim_matches('"')
        .split(',')
        .filter_map(|value| value.trim().parse().ok())
        .collect();
    expected.sort_unstable();
    let entry = world.entry(&id);
    let mut visited = entry
        .route
        .as_ref()
        .map(|route| route.customers().to_vec())
        .unwrap_or_default();
    visited.sort_unstable();
    assert_eq!(visited, expected);
}

#[then("group {id} is accepted")]
fn then_accepted(world: &PlannerWorld, id: String) {
    let entry = world.entry(&id);
    assert_eq!(entry.status, RouteStatus::Accepted);
    assert!(entry.total_distance > 0.0);
}

#[then("group {id} is accepted over budget")]
fn then_over_budget(world: &PlannerWorld, id: String) {
    assert_eq!(world.entry(&id).status, RouteStatus::AcceptedOverBudget);
}

#[then("group {id} failed")]
fn then_failed(world: &PlannerWorld, id: String) {
    let entry = world.entry(&id);
    assert_eq!(entry.status, RouteStatus::Failed);
    assert!(entry.stops().is_empty());
}

#[then("group {group:usize} was subdivided from cost {cost:f64} at capacity {capacity:u32}")]
fn then_subdivided(world: &PlannerWorld, group: usize, cost: f64, capacity: u32) {
    let plan = world.plan();
    let record = plan
        .subdivisions()
        .iter()
        .find(|record| record.group == group)
        .unwrap_or_else(|| panic!("group {group} was not subdivided"));
    assert!((record.original_cost - cost).abs() < 1e-6);
    assert_eq!(record.capacity, capacity);
}

#[scenario(path = "tests/features/route_planner.feature", index = 0)]
fn nearby_customers_share_a_route(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_planner.feature", index = 1)]
fn heavy_customers_are_split(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_planner.feature", index = 2)]
fn over_budget_group_is_subdivided(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_planner.feature", index = 3)]
fn sub_routes_over_budget_are_kept(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_planner.feature", index = 4)]
fn failed_sub_group_is_isolated(world: PlannerWorld) {
    let _ = world;
}
