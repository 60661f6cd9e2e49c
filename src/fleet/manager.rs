//! Fleet ownership, greedy assignment, and route optimization.

use tracing::{debug, warn};

use crate::error::RoutingError;
use crate::graph::RoadNetwork;
use crate::models::{Delivery, RouteView, Vehicle};

/// Outcome of [`FleetManager::assign_deliveries`].
///
/// Deliveries that fit no vehicle are reported here instead of being
/// silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentReport {
    /// IDs of deliveries placed on a vehicle, in processing order.
    pub assigned: Vec<String>,
    /// IDs of deliveries that fit no vehicle, in processing order.
    pub unassigned: Vec<String>,
}

/// Outcome of [`FleetManager::optimize_routes`].
#[derive(Debug, Default)]
pub struct OptimizeReport {
    /// Vehicles whose path was rewritten.
    pub optimized: Vec<String>,
    /// Vehicles whose update was aborted, with the failing query error.
    /// These keep their previous path.
    pub failed: Vec<(String, RoutingError)>,
}

/// Owns the vehicle roster and delivery list and runs the two-stage
/// routing pipeline: greedy assignment, then shortest-path optimization.
///
/// Vehicles and deliveries are unique by ID; registration order is
/// preserved and is the deterministic tie-break for both stages.
///
/// # Examples
///
/// ```
/// use fleet_routing::fleet::FleetManager;
/// use fleet_routing::graph::RoadNetwork;
/// use fleet_routing::models::{Delivery, TimeWindow, Vehicle, VehicleKind};
///
/// let network = RoadNetwork::from_edges([("Depot", "A", 1.0), ("A", "B", 1.0)]).unwrap();
///
/// let mut fleet = FleetManager::new();
/// fleet.add_vehicle(Vehicle::new("Van_1", VehicleKind::Van, "Depot"));
/// let window = TimeWindow::parse("9am", "12pm").unwrap();
/// fleet.add_delivery(Delivery::new("D1", "B", window, 1, 10));
///
/// let report = fleet.assign_deliveries();
/// assert_eq!(report.assigned, vec!["D1"]);
///
/// fleet.optimize_routes(&network);
/// assert_eq!(fleet.vehicles()[0].path(), ["Depot", "A", "B"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FleetManager {
    vehicles: Vec<Vehicle>,
    deliveries: Vec<Delivery>,
}

impl FleetManager {
    /// Creates an empty fleet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a vehicle. A duplicate ID is ignored; the first
    /// registration wins. Returns `true` if the vehicle was added.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> bool {
        if self.vehicle(vehicle.id()).is_some() {
            warn!(vehicle = %vehicle.id(), "ignoring duplicate vehicle registration");
            return false;
        }
        self.vehicles.push(vehicle);
        true
    }

    /// Registers a delivery. A duplicate ID is ignored; the first
    /// registration wins. Returns `true` if the delivery was added.
    pub fn add_delivery(&mut self, delivery: Delivery) -> bool {
        if self.delivery(delivery.id()).is_some() {
            warn!(delivery = %delivery.id(), "ignoring duplicate delivery registration");
            return false;
        }
        self.deliveries.push(delivery);
        true
    }

    /// The vehicle roster, in registration order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// The delivery list, in registration order.
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Looks up a vehicle by ID.
    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Looks up a delivery by ID.
    pub fn delivery(&self, id: &str) -> Option<&Delivery> {
        self.deliveries.iter().find(|d| d.id() == id)
    }

    /// Assigns deliveries to vehicles with a greedy, priority-ordered
    /// first-fit scan.
    ///
    /// Deliveries are processed by `(priority ascending, time window
    /// ascending)`; the sort is stable, so deliveries with identical keys
    /// keep registration order. Each delivery goes to the first vehicle, in
    /// registration order, with enough remaining capacity. A delivery that
    /// fits no vehicle lands in
    /// [`AssignmentReport::unassigned`].
    ///
    /// All prior assignment and path state is cleared first, so repeated
    /// runs over the same inputs produce the same mapping.
    pub fn assign_deliveries(&mut self) -> AssignmentReport {
        for vehicle in &mut self.vehicles {
            vehicle.clear_assignments();
        }

        let mut order: Vec<usize> = (0..self.deliveries.len()).collect();
        order.sort_by_key(|&i| (self.deliveries[i].priority(), self.deliveries[i].time_window()));

        let mut report = AssignmentReport::default();
        for i in order {
            let delivery = &self.deliveries[i];
            match self
                .vehicles
                .iter_mut()
                .find(|vehicle| vehicle.can_carry(delivery.weight()))
            {
                Some(vehicle) => {
                    debug!(
                        delivery = %delivery.id(),
                        vehicle = %vehicle.id(),
                        weight = delivery.weight(),
                        "delivery assigned"
                    );
                    vehicle.assign(delivery.id(), delivery.weight());
                    report.assigned.push(delivery.id().to_string());
                }
                None => {
                    warn!(
                        delivery = %delivery.id(),
                        weight = delivery.weight(),
                        "delivery fits no vehicle"
                    );
                    report.unassigned.push(delivery.id().to_string());
                }
            }
        }
        report
    }

    /// Rewrites each assigned vehicle's concrete path using shortest paths
    /// between consecutive stops.
    ///
    /// Stops are the vehicle's current location followed by its assigned
    /// delivery locations in assignment order; the heuristic does not
    /// reorder stops, it only shortest-paths between them. Consecutive
    /// segments share their boundary node, which appears once in the
    /// concatenated path.
    ///
    /// A segment with no path aborts only that vehicle's update: the
    /// previous path is kept and the failure recorded, while other vehicles
    /// still get fresh paths.
    pub fn optimize_routes(&mut self, network: &RoadNetwork) -> OptimizeReport {
        let mut report = OptimizeReport::default();
        for index in 0..self.vehicles.len() {
            if self.vehicles[index].assigned_deliveries().is_empty() {
                continue;
            }
            let stops = self.stops_for(&self.vehicles[index]);
            let vehicle_id = self.vehicles[index].id().to_string();
            match plan_path(network, &stops) {
                Ok(path) => {
                    debug!(vehicle = %vehicle_id, stops = path.len(), "path rewritten");
                    self.vehicles[index].set_path(path);
                    report.optimized.push(vehicle_id);
                }
                Err(error) => {
                    warn!(vehicle = %vehicle_id, %error, "keeping previous path");
                    report.failed.push((vehicle_id, error));
                }
            }
        }
        report
    }

    /// Current route representation for every vehicle, in registration
    /// order.
    pub fn route_views(&self) -> Vec<RouteView> {
        self.vehicles.iter().map(Vehicle::route_view).collect()
    }

    fn stops_for(&self, vehicle: &Vehicle) -> Vec<String> {
        let mut stops = vec![vehicle.current_location().to_string()];
        for id in vehicle.assigned_deliveries() {
            match self.delivery(id) {
                Some(delivery) => stops.push(delivery.location().to_string()),
                // Assignment only references owned deliveries; a miss means
                // the registry was mutated out from under the vehicle.
                None => warn!(delivery = %id, "assigned delivery missing from registry"),
            }
        }
        stops
    }
}

/// Shortest-paths each consecutive stop pair and concatenates the
/// segments, deduplicating the shared boundary node.
fn plan_path(network: &RoadNetwork, stops: &[String]) -> Result<Vec<String>, RoutingError> {
    let mut full = Vec::new();
    for (i, pair) in stops.windows(2).enumerate() {
        let (segment, _) = network.shortest_path(&pair[0], &pair[1])?;
        if i == 0 {
            full.extend(segment);
        } else {
            full.extend(segment.into_iter().skip(1));
        }
    }
    Ok(full)
}
