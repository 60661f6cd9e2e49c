//! Weighted road network and shortest-path queries.
//!
//! Provides [`RoadNetwork`], an undirected weighted graph over named
//! locations with single-source Dijkstra, point-to-point shortest paths,
//! minimum-spanning-tree extraction, and bulk weight overwrite for traffic
//! updates.

mod network;

pub use network::{EdgeWeights, RoadNetwork, DEFAULT_PENALTY_WEIGHT};
