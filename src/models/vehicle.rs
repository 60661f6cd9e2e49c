//! Vehicle kinds and per-vehicle route state.

use serde::Deserialize;

use super::{RouteStage, RouteView};

/// The vehicle classes of the fleet.
///
/// Kinds differ only by the constants they look up (capacity and maximum
/// travel distance), so they are a configuration table rather than a type
/// hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    /// Small courier vehicle, capacity 20.
    Motorcycle,
    /// Mid-size vehicle, capacity 100.
    Van,
    /// Heavy vehicle, capacity 300.
    Lorry,
}

impl VehicleKind {
    /// Maximum cumulative delivery weight for this kind.
    pub fn capacity(&self) -> u32 {
        match self {
            VehicleKind::Motorcycle => 20,
            VehicleKind::Van => 100,
            VehicleKind::Lorry => 300,
        }
    }

    /// Maximum travel distance for this kind.
    ///
    /// Stored on every vehicle but not checked against route length
    /// anywhere in the pipeline.
    pub fn max_distance(&self) -> f64 {
        5_000.0
    }
}

/// Coarse availability flag.
///
/// A plain field, not an enforced state machine: assignment sets it, but no
/// operation refuses a busy vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleStatus {
    /// No deliveries assigned.
    #[default]
    Available,
    /// Carrying assigned deliveries.
    Busy,
}

/// A fleet vehicle.
///
/// Route state lives in two distinct fields for the two pipeline stages:
/// [`assigned_deliveries`](Vehicle::assigned_deliveries) holds delivery IDs
/// in assignment order, and [`path`](Vehicle::path) holds the concrete
/// location sequence once optimization has run. The fields are never
/// conflated; [`route_view`](Vehicle::route_view) reports whichever stage
/// is current.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Vehicle, VehicleKind};
///
/// let vehicle = Vehicle::new("Moto_1", VehicleKind::Motorcycle, "Depot");
/// assert_eq!(vehicle.capacity(), 20);
/// assert_eq!(vehicle.current_location(), "Depot");
/// assert!(vehicle.can_carry(15));
/// assert!(!vehicle.can_carry(25));
/// ```
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: String,
    kind: VehicleKind,
    capacity: u32,
    max_distance: f64,
    current_location: String,
    status: VehicleStatus,
    assigned_deliveries: Vec<String>,
    path: Vec<String>,
    current_load: u32,
}

impl Vehicle {
    /// Creates an empty vehicle of the given kind stationed at the depot.
    pub fn new(id: impl Into<String>, kind: VehicleKind, depot: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            capacity: kind.capacity(),
            max_distance: kind.max_distance(),
            current_location: depot.into(),
            status: VehicleStatus::Available,
            assigned_deliveries: Vec::new(),
            path: Vec::new(),
            current_load: 0,
        }
    }

    /// Vehicle ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Vehicle kind.
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    /// Maximum cumulative delivery weight.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Maximum travel distance. Stored but unenforced.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Where the vehicle currently is (the depot until it departs).
    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    /// Availability flag.
    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    /// Ordered delivery IDs placed on this vehicle by assignment.
    pub fn assigned_deliveries(&self) -> &[String] {
        &self.assigned_deliveries
    }

    /// Ordered location sequence produced by route optimization.
    ///
    /// Empty until optimization has run for this vehicle.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Cumulative weight of the assigned deliveries.
    pub fn current_load(&self) -> u32 {
        self.current_load
    }

    /// Returns `true` if a delivery of the given weight still fits.
    pub fn can_carry(&self, weight: u32) -> bool {
        self.current_load + weight <= self.capacity
    }

    /// The route surface representation for this vehicle: the concrete path
    /// when optimization has run, the assigned delivery IDs otherwise.
    pub fn route_view(&self) -> RouteView {
        let route = if self.path.is_empty() {
            RouteStage::Deliveries(self.assigned_deliveries.clone())
        } else {
            RouteStage::Path(self.path.clone())
        };
        RouteView {
            vehicle_id: self.id.clone(),
            route,
        }
    }

    /// Appends a delivery and consumes capacity. Caller checks
    /// [`can_carry`](Vehicle::can_carry) first.
    pub(crate) fn assign(&mut self, delivery_id: &str, weight: u32) {
        self.assigned_deliveries.push(delivery_id.to_string());
        self.current_load += weight;
        self.status = VehicleStatus::Busy;
    }

    /// Drops all assignment and path state, freeing capacity.
    pub(crate) fn clear_assignments(&mut self) {
        self.assigned_deliveries.clear();
        self.path.clear();
        self.current_load = 0;
        self.status = VehicleStatus::Available;
    }

    /// Replaces the optimized path in one step.
    pub(crate) fn set_path(&mut self, path: Vec<String>) {
        self.path = path;
    }
}
