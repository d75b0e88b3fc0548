//! Planner configuration.

use crate::{CostRate, ValidationError};

/// Default vehicle capacity in demand units.
pub const DEFAULT_VEHICLE_CAPACITY: u32 = 100;
/// Default maximum cost of a single route.
pub const DEFAULT_MAX_COST: f64 = 10_000.0;
/// Default worker count; one evaluates groups sequentially.
pub const DEFAULT_WORKERS: usize = 1;

/// Parameters of a planning run.
///
/// # Examples
/// ```
/// use convoy_core::{CostRate, PlannerConfig};
///
/// # fn main() -> Result<(), convoy_core::ValidationError> {
/// let config = PlannerConfig::default()
///     .with_vehicle_capacity(80)
///     .with_max_cost(2_500.0)
///     .with_cost_rate(CostRate::per_kilometre(4.0)?)
///     .with_workers(4);
/// config.validate()?;
/// assert_eq!(config.subdivision_capacity(), 40);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Capacity of every vehicle in demand units.
    pub vehicle_capacity: u32,
    /// Cost above which a route is subdivided.
    pub max_cost: f64,
    /// Cost per metre travelled.
    pub cost_rate: CostRate,
    /// Worker threads used to evaluate groups. One means sequential.
    pub workers: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            vehicle_capacity: DEFAULT_VEHICLE_CAPACITY,
            max_cost: DEFAULT_MAX_COST,
            cost_rate: CostRate::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl PlannerConfig {
    /// Set the vehicle capacity.
    #[must_use]
    pub const fn with_vehicle_capacity(mut self, capacity: u32) -> Self {
        self.vehicle_capacity = capacity;
        self
    }

    /// Set the per-route cost budget.
    #[must_use]
    pub const fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = max_cost;
        self
    }

    /// Set the cost rate.
    #[must_use]
    pub const fn with_cost_rate(mut self, cost_rate: CostRate) -> Self {
        self.cost_rate = cost_rate;
        self
    }

    /// Set the number of worker threads.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.vehicle_capacity == 0 {
            return Err(ValidationError::NonPositiveCapacity);
        }
        if !self.max_cost.is_finite() || self.max_cost <= 0.0 {
            return Err(ValidationError::NonPositiveMaxCost(self.max_cost));
        }
        let rate = self.cost_rate.as_per_metre();
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ValidationError::NonPositiveCostRate(rate));
        }
        if self.workers == 0 {
            return Err(ValidationError::ZeroWorkers);
        }
        Ok(())
    }

    /// Capacity used when re-grouping an over-budget group.
    ///
    /// Integer half of the vehicle capacity; may be zero.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "subdivision halves the capacity with truncation"
    )]
    pub const fn subdivision_capacity(&self) -> u32 {
        self.vehicle_capacity / 2
    }
}
