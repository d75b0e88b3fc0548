//! Pairwise distances between the depot and customers.
//!
//! [`build_distance_matrix`] turns coordinate columns into a symmetric
//! [`DistanceMatrix`] of haversine distances in metres. The
//! [`DistanceProvider`] trait lets callers substitute another source, such
//! as a road network or a precomputed table.

mod error;
mod haversine;
mod matrix;
mod provider;

pub use error::DistanceError;
pub use haversine::{
    EARTH_RADIUS_KM, HaversineDistanceProvider, METRES_PER_KILOMETRE, build_distance_matrix, haversine_metres,
};
pub use matrix::DistanceMatrix;
pub use provider::DistanceProvider;
