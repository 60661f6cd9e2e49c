//! # fleet-routing
//!
//! Delivery fleet routing over a weighted road network: shortest-path
//! queries, greedy capacity-constrained assignment, and live traffic
//! re-optimization.
//!
//! ## Modules
//!
//! - [`graph`] — Road network with Dijkstra shortest paths, minimum spanning tree, bulk weight overwrite
//! - [`models`] — Domain model types (Vehicle, VehicleKind, Delivery, TimeWindow, RouteView)
//! - [`fleet`] — Assignment/optimization pipeline and the shared, lock-protected context
//! - [`traffic`] — Traffic feed sources and the cancellable periodic update task
//! - [`config`] — Deserializable setup data for topology, roster, deliveries, and polling
//! - [`error`] — Error taxonomy for routing queries and feed ingestion

pub mod config;
pub mod error;
pub mod fleet;
pub mod graph;
pub mod models;
pub mod traffic;
