//! Domain model types for fleet routing.
//!
//! Provides the core abstractions: deliveries with time windows, priorities,
//! and weights; vehicles with capacity drawn from a per-kind configuration
//! table; and the tagged route representation exposed to external readers.

mod delivery;
mod route;
mod vehicle;

pub use delivery::{Delivery, ParseTimeWindowError, TimeWindow};
pub use route::{RouteStage, RouteView};
pub use vehicle::{Vehicle, VehicleKind, VehicleStatus};
