//! Planner output.

use crate::{Group, GroupId, Route, RouteCost, SolveError};

/// Terminal state of a group or sub-group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RouteStatus {
    /// Solved within the cost budget.
    Accepted,
    /// A subdivision leaf whose cost still exceeds the budget.
    ///
    /// Subdivision happens once; such routes are kept with their real cost.
    AcceptedOverBudget,
    /// The solver produced no route.
    Failed,
}

impl RouteStatus {
    /// Whether the route is part of the plan.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted | Self::AcceptedOverBudget)
    }
}

/// One group or sub-group of the plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanEntry {
    /// Group, and sub-group if subdivided.
    pub group: GroupId,
    /// Global customer indices in grouping order.
    pub members: Vec<usize>,
    /// Solved circuit; `None` when the solve failed.
    pub route: Option<Route>,
    /// Route length in metres; zero for failures.
    pub total_distance: f64,
    /// Route cost; zero for failures.
    pub total_cost: f64,
    /// Sum of member demands.
    pub load: u64,
    /// Capacity the group was formed under; halved for sub-groups.
    pub capacity: u32,
    /// Whether the load exceeds the vehicle capacity.
    ///
    /// Only a single customer whose demand alone is larger than a vehicle
    /// can set this; a sub-group formed at reduced capacity never does.
    pub over_capacity: bool,
    /// Outcome.
    pub status: RouteStatus,
    /// Solver failure, for [`RouteStatus::Failed`] entries.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub error: Option<SolveError>,
}

impl PlanEntry {
    pub(crate) fn solved(
        group: &Group,
        route: Route,
        cost: RouteCost,
        status: RouteStatus,
        vehicle_capacity: u32,
    ) -> Self {
        Self {
            group: group.id,
            members: group.members.clone(),
            route: Some(route),
            total_distance: cost.total_distance,
            total_cost: cost.total_cost,
            load: group.load,
            capacity: group.capacity,
            over_capacity: group.load > u64::from(vehicle_capacity),
            status,
            error: None,
        }
    }

    pub(crate) fn failed(group: &Group, error: SolveError, vehicle_capacity: u32) -> Self {
        Self {
            group: group.id,
            members: group.members.clone(),
            route: None,
            total_distance: 0.0,
            total_cost: 0.0,
            load: group.load,
            capacity: group.capacity,
            over_capacity: group.load > u64::from(vehicle_capacity),
            status: RouteStatus::Failed,
            error: Some(error),
        }
    }

    /// Global point indices of the route, depot at both ends.
    ///
    /// Empty for failed entries.
    #[must_use]
    pub fn stops(&self) -> &[usize] {
        self.route.as_ref().map(Route::stops).unwrap_or_default()
    }
}

/// An over-budget group that was re-grouped at reduced capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subdivision {
    /// Number of the subdivided group.
    pub group: usize,
    /// Route length of the undivided group in metres.
    pub original_distance: f64,
    /// Cost of the undivided group.
    pub original_cost: f64,
    /// Capacity used for re-grouping.
    pub capacity: u32,
    /// Number of sub-groups produced.
    pub sub_groups: usize,
}

/// The result of a planning run.
///
/// Entries appear in grouping order; sub-groups replace their parent in
/// place. Failures are reported alongside accepted routes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    entries: Vec<PlanEntry>,
    subdivisions: Vec<Subdivision>,
}

impl RoutePlan {
    pub(crate) const fn new(entries: Vec<PlanEntry>, subdivisions: Vec<Subdivision>) -> Self {
        Self {
            entries,
            subdivisions,
        }
    }

    /// All entries in order.
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Consume the plan, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<PlanEntry> {
        self.entries
    }

    /// Number of entries, failed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose route is part of the plan.
    pub fn accepted(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.status.is_accepted())
    }

    /// Entries the solver could not route.
    pub fn failures(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == RouteStatus::Failed)
    }

    /// Accepted subdivision leaves whose cost exceeds the budget.
    pub fn over_budget(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == RouteStatus::AcceptedOverBudget)
    }

    /// Entries holding a customer whose demand exceeds the vehicle capacity.
    pub fn over_capacity(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.over_capacity)
    }

    /// Groups that were subdivided, in grouping order.
    #[must_use]
    pub fn subdivisions(&self) -> &[Subdivision] {
        &self.subdivisions
    }

    /// Total length of accepted routes in metres.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.accepted().map(|e| e.total_distance).sum()
    }

    /// Total cost of accepted routes.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.accepted().map(|e| e.total_cost).sum()
    }
}
