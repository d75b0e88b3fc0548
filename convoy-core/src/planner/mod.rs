//! Route planning orchestration.
//!
//! [`RoutePlanner::plan`] builds the distance matrix once, groups customers
//! by vehicle capacity and evaluates every group independently:
//!
//! 1. Solve the group's circuit and price it.
//! 2. Accept it when the cost is within budget.
//! 3. Otherwise re-group its members at half the vehicle capacity and accept
//!    every resulting sub-route as is.
//!
//! Subdivision is deliberately one level deep. A sub-route that still costs
//! more than the budget is reported as [`RouteStatus::AcceptedOverBudget`]
//! rather than split further. A solver failure is recorded against its
//! (sub-)group and never stops the remaining groups from being planned.

mod plan;

use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

use crate::{
    CheapestArcSolver, CustomerSet, DistanceError, DistanceMatrix, DistanceProvider, Group,
    HaversineDistanceProvider, PlannerConfig, RouteSolver, ValidationError, evaluate_route,
    group_customers, solve_group, subdivide_group,
};

pub use plan::{PlanEntry, RoutePlan, RouteStatus, Subdivision};

/// Run-level planning failures.
///
/// Per-group solver failures are not errors at this level; they are
/// reported inside the [`RoutePlan`].
#[derive(Debug, Error)]
pub enum PlanError {
    /// Configuration or input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The distance matrix could not be built.
    #[error("failed to build distance matrix: {0}")]
    Distance(#[from] DistanceError),
    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] ThreadPoolBuildError),
}

/// Plans capacity-limited routes from a single depot.
///
/// Generic over the single-vehicle [`RouteSolver`] and the
/// [`DistanceProvider`]; both default to the built-in implementations.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use convoy_core::{CustomerSet, PlannerConfig, RoutePlanner, RouteStatus};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let depot = Coord { x: 0.0, y: 0.0 };
/// let customers = CustomerSet::new(
///     depot,
///     [
///         (Coord { x: 0.0, y: 0.009 }, 10),
///         (Coord { x: 0.009, y: 0.0 }, 10),
///         (Coord { x: 0.009, y: 0.009 }, 10),
///     ],
/// )?;
/// let planner = RoutePlanner::with_config(PlannerConfig::default().with_max_cost(100_000.0))?;
/// let plan = planner.plan(&customers)?;
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan.entries()[0].status, RouteStatus::Accepted);
/// assert!(plan.total_distance() > 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlanner<S = CheapestArcSolver, D = HaversineDistanceProvider> {
    solver: S,
    distances: D,
    config: PlannerConfig,
}

impl RoutePlanner {
    /// Planner using [`CheapestArcSolver`] and haversine distances.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `config` is invalid.
    pub fn with_config(config: PlannerConfig) -> Result<Self, ValidationError> {
        Self::new(
            CheapestArcSolver::default(),
            HaversineDistanceProvider,
            config,
        )
    }
}

impl<S, D> RoutePlanner<S, D>
where
    S: RouteSolver,
    D: DistanceProvider,
{
    /// Construct a planner from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `config` is invalid.
    pub fn new(solver: S, distances: D, config: PlannerConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            solver,
            distances,
            config,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The route solver in use.
    #[must_use]
    pub const fn solver(&self) -> &S {
        &self.solver
    }

    /// Plan routes for every customer in `customers`.
    ///
    /// Entries follow grouping order whatever the worker count.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Distance`] when the provider fails or returns a
    /// matrix of the wrong size, and [`PlanError::WorkerPool`] when a worker
    /// pool was requested but could not be started.
    pub fn plan(&self, customers: &CustomerSet) -> Result<RoutePlan, PlanError> {
        let points = customers.points();
        let matrix = self.distances.distance_matrix(points)?;
        if matrix.len() != points.len() {
            return Err(DistanceError::DimensionMismatch {
                rows: matrix.len(),
                expected: points.len(),
            }
            .into());
        }

        let groups = group_customers(customers, self.config.vehicle_capacity);
        log::info!(
            "planning {} customers in {} groups (capacity {})",
            customers.customer_count(),
            groups.len(),
            self.config.vehicle_capacity
        );

        let evaluator = GroupEvaluator {
            solver: &self.solver,
            matrix: &matrix,
            customers,
            config: &self.config,
        };
        let outcomes: Vec<GroupOutcome> = if self.config.workers > 1 && groups.len() > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.config.workers)
                .build()?;
            pool.install(|| {
                groups
                    .par_iter()
                    .map(|group| evaluator.evaluate(group))
                    .collect()
            })
        } else {
            groups
                .iter()
                .map(|group| evaluator.evaluate(group))
                .collect()
        };

        let mut entries = Vec::with_capacity(outcomes.len());
        let mut subdivisions = Vec::new();
        for outcome in outcomes {
            entries.extend(outcome.entries);
            subdivisions.extend(outcome.subdivision);
        }
        let plan = RoutePlan::new(entries, subdivisions);
        log::info!(
            "planned {} routes ({} failed, {} over budget), total cost {:.2}",
            plan.accepted().count(),
            plan.failures().count(),
            plan.over_budget().count(),
            plan.total_cost()
        );
        Ok(plan)
    }
}

/// Everything one group's evaluation produces.
struct GroupOutcome {
    entries: Vec<PlanEntry>,
    subdivision: Option<Subdivision>,
}

/// Read-only context shared by every group evaluation.
struct GroupEvaluator<'a, S> {
    solver: &'a S,
    matrix: &'a DistanceMatrix,
    customers: &'a CustomerSet,
    config: &'a PlannerConfig,
}

impl<S: RouteSolver> GroupEvaluator<'_, S> {
    fn warn_if_over_capacity(&self, group: &Group) {
        if group.load > u64::from(self.config.vehicle_capacity) {
            log::warn!(
                "group {} holds a single customer whose demand {} exceeds vehicle capacity {}",
                group.id,
                group.load,
                self.config.vehicle_capacity
            );
        }
    }

    fn evaluate(&self, group: &Group) -> GroupOutcome {
        self.warn_if_over_capacity(group);
        let route = match solve_group(self.solver, &group.members, self.matrix) {
            Ok(route) => route,
            Err(err) => {
                log::warn!("group {} could not be routed: {err}", group.id);
                return GroupOutcome {
                    entries: vec![PlanEntry::failed(group, err, self.config.vehicle_capacity)],
                    subdivision: None,
                };
            }
        };
        let cost = evaluate_route(route.stops(), self.matrix, self.config.cost_rate);
        if cost.total_cost <= self.config.max_cost {
            log::info!(
                "group {} accepted: {:.1} m, cost {:.2}",
                group.id,
                cost.total_distance,
                cost.total_cost
            );
            return GroupOutcome {
                entries: vec![PlanEntry::solved(
                    group,
                    route,
                    cost,
                    RouteStatus::Accepted,
                    self.config.vehicle_capacity,
                )],
                subdivision: None,
            };
        }

        let capacity = self.config.subdivision_capacity();
        let sub_groups = subdivide_group(group, self.customers, capacity);
        log::info!(
            "group {} costs {:.2} (budget {:.2}); subdividing into {} groups at capacity {capacity}",
            group.id,
            cost.total_cost,
            self.config.max_cost,
            sub_groups.len()
        );
        let entries = sub_groups.iter().map(|sub| self.evaluate_leaf(sub)).collect();
        GroupOutcome {
            entries,
            subdivision: Some(Subdivision {
                group: group.id.group,
                original_distance: cost.total_distance,
                original_cost: cost.total_cost,
                capacity,
                sub_groups: sub_groups.len(),
            }),
        }
    }

    fn evaluate_leaf(&self, group: &Group) -> PlanEntry {
        self.warn_if_over_capacity(group);
        match solve_group(self.solver, &group.members, self.matrix) {
            Ok(route) => {
                let cost = evaluate_route(route.stops(), self.matrix, self.config.cost_rate);
                let status = if cost.total_cost <= self.config.max_cost {
                    log::debug!("sub-group {} accepted at cost {:.2}", group.id, cost.total_cost);
                    RouteStatus::Accepted
                } else {
                    log::warn!(
                        "sub-group {} still costs {:.2} after subdivision (budget {:.2}); accepting it",
                        group.id,
                        cost.total_cost,
                        self.config.max_cost
                    );
                    RouteStatus::AcceptedOverBudget
                };
                PlanEntry::solved(group, route, cost, status, self.config.vehicle_capacity)
            }
            Err(err) => {
                log::warn!("sub-group {} could not be routed: {err}", group.id);
                PlanEntry::failed(group, err, self.config.vehicle_capacity)
            }
        }
    }
}
