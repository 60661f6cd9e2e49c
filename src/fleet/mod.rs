//! Fleet ownership and the shared routing context.
//!
//! [`FleetManager`] runs the two-stage pipeline — greedy assignment, then
//! shortest-path optimization — and [`RoutingContext`] wraps it together
//! with the road network behind locks for concurrent readers and the
//! traffic update loop.

mod context;
mod manager;

pub use context::RoutingContext;
pub use manager::{AssignmentReport, FleetManager, OptimizeReport};
