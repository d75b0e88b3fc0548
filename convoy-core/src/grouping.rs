//! Capacity-constrained partitioning of customers into vehicle loads.
//!
//! Grouping is a single greedy left-to-right pass. Customers are never
//! reordered, so identical input always yields identical groups.

use std::fmt;

use crate::CustomerSet;

/// Partition `demands` into contiguous runs whose totals stay within `capacity`.
///
/// The returned groups hold zero-based positions into `demands`. A customer is
/// appended to the running group while the running load plus its demand does
/// not exceed `capacity`; otherwise the running group is closed and a new one
/// starts with that customer. A single demand larger than `capacity` therefore
/// ends up alone in its own group. Empty groups are never produced.
///
/// # Examples
/// ```
/// use convoy_core::group_by_capacity;
///
/// assert_eq!(group_by_capacity(&[60, 60], 100), vec![vec![0], vec![1]]);
/// assert_eq!(group_by_capacity(&[10, 0, 90, 5], 100), vec![vec![0, 1, 2], vec![3]]);
/// assert_eq!(group_by_capacity(&[150, 20], 100), vec![vec![0], vec![1]]);
/// ```
#[must_use]
pub fn group_by_capacity(demands: &[u32], capacity: u32) -> Vec<Vec<usize>> {
    let limit = u64::from(capacity);
    let mut groups = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut load = 0_u64;

    for (position, &demand) in demands.iter().enumerate() {
        let units = u64::from(demand);
        if load + units <= limit || current.is_empty() {
            current.push(position);
            load += units;
        } else {
            groups.push(std::mem::take(&mut current));
            current.push(position);
            load = units;
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Identifies a group, or a sub-group produced by subdivision.
///
/// Group numbers are 1-based in grouping order. Sub-group numbers are 1-based
/// within their parent.
///
/// # Examples
/// ```
/// use convoy_core::GroupId;
///
/// assert_eq!(GroupId::group(3).to_string(), "3");
/// assert_eq!(GroupId::sub_group(3, 2).to_string(), "3.2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId {
    /// 1-based group number from the first grouping pass.
    pub group: usize,
    /// 1-based sub-group number when the group was subdivided.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub sub_group: Option<usize>,
}

impl GroupId {
    /// Identifier of a first-pass group.
    #[must_use]
    pub const fn group(group: usize) -> Self {
        Self {
            group,
            sub_group: None,
        }
    }

    /// Identifier of a sub-group of `group`.
    #[must_use]
    pub const fn sub_group(group: usize, sub_group: usize) -> Self {
        Self {
            group,
            sub_group: Some(sub_group),
        }
    }

    /// Whether this identifies a sub-group.
    #[must_use]
    pub const fn is_sub_group(&self) -> bool {
        self.sub_group.is_some()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_group {
            Some(sub_group) => write!(f, "{}.{sub_group}", self.group),
            None => write!(f, "{}", self.group),
        }
    }
}

/// Customers assigned to one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Identifier in grouping order.
    pub id: GroupId,
    /// Global customer indices in their original order.
    pub members: Vec<usize>,
    /// Sum of member demands.
    pub load: u64,
    /// Capacity the group was formed under.
    pub capacity: u32,
}

impl Group {
    /// Whether the load exceeds the capacity the group was formed under.
    ///
    /// Only a single customer whose own demand exceeds the capacity can
    /// produce such a group.
    #[must_use]
    pub fn is_over_capacity(&self) -> bool {
        self.load > u64::from(self.capacity)
    }
}

/// Group every customer of `customers` under `capacity`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use convoy_core::{CustomerSet, GroupId, group_customers};
///
/// # fn main() -> Result<(), convoy_core::ValidationError> {
/// let depot = Coord { x: 0.0, y: 0.0 };
/// let customers = CustomerSet::new(depot, [(depot, 60), (depot, 60)])?;
/// let groups = group_customers(&customers, 100);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[1].id, GroupId::group(2));
/// assert_eq!(groups[1].members, vec![2]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn group_customers(customers: &CustomerSet, capacity: u32) -> Vec<Group> {
    let indices: Vec<usize> = customers.customers().iter().map(|c| c.index).collect();
    let demands: Vec<u32> = customers.customers().iter().map(|c| c.demand).collect();
    assemble(&indices, &demands, capacity, GroupId::group)
}

/// Re-group the members of `group` under a reduced `capacity`.
///
/// Sub-groups keep the parent's group number and are numbered from 1.
#[must_use]
pub fn subdivide_group(group: &Group, customers: &CustomerSet, capacity: u32) -> Vec<Group> {
    let demands: Vec<u32> = group
        .members
        .iter()
        .map(|&index| customers.demand(index).unwrap_or_default())
        .collect();
    let parent = group.id.group;
    assemble(&group.members, &demands, capacity, |sub| {
        GroupId::sub_group(parent, sub)
    })
}

fn assemble(
    indices: &[usize],
    demands: &[u32],
    capacity: u32,
    make_id: impl Fn(usize) -> GroupId,
) -> Vec<Group> {
    group_by_capacity(demands, capacity)
        .into_iter()
        .enumerate()
        .map(|(position, run)| {
            let members: Vec<usize> = run
                .iter()
                .filter_map(|&local| indices.get(local).copied())
                .collect();
            let load = run
                .iter()
                .filter_map(|&local| demands.get(local))
                .map(|&demand| u64::from(demand))
                .sum();
            Group {
                id: make_id(position + 1),
                members,
                load,
                capacity,
            }
        })
        .collect()
}
