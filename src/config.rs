//! Typed setup data: topology, roster, deliveries, and polling parameters.
//!
//! The core takes its inputs as already-constructed values; where those
//! values come from (files, environment, flags) is the embedding process's
//! concern. This module gives the externally supplied data a deserializable
//! shape and builds core objects from it.

use std::time::Duration;

use serde::Deserialize;

use crate::error::RoutingError;
use crate::fleet::FleetManager;
use crate::graph::RoadNetwork;
use crate::models::{Delivery, ParseTimeWindowError, TimeWindow, Vehicle, VehicleKind};
use crate::traffic::{HttpTrafficSource, DEFAULT_FETCH_TIMEOUT, DEFAULT_UPDATE_INTERVAL};

/// One weighted edge of the static topology.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeConfig {
    /// One endpoint.
    pub from: String,
    /// The other endpoint.
    pub to: String,
    /// Initial traversal weight.
    pub weight: f64,
}

/// The static road topology: a node list plus weighted edges.
///
/// Listing a node explicitly is only needed when it has no edges; edge
/// endpoints are created implicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct TopologyConfig {
    /// Locations without edges (optional).
    #[serde(default)]
    pub nodes: Vec<String>,
    /// Weighted edges.
    pub edges: Vec<EdgeConfig>,
}

impl TopologyConfig {
    /// Builds the road network described by this topology.
    pub fn build(&self) -> Result<RoadNetwork, RoutingError> {
        let mut network = RoadNetwork::new();
        for node in &self.nodes {
            network.add_node(node);
        }
        for edge in &self.edges {
            network.add_edge(&edge.from, &edge.to, edge.weight)?;
        }
        Ok(network)
    }
}

/// One vehicle of the roster.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleConfig {
    /// Vehicle ID.
    pub id: String,
    /// Vehicle kind; determines capacity and maximum distance.
    pub kind: VehicleKind,
}

/// One delivery request, with its window as 12-hour clock labels.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// Delivery ID.
    pub id: String,
    /// Destination location.
    pub location: String,
    /// Window start label, e.g. `"9am"`.
    pub window_start: String,
    /// Window end label, e.g. `"12pm"`.
    pub window_end: String,
    /// Urgency ranking; lower = more urgent.
    pub priority: u32,
    /// Weight consumed from vehicle capacity.
    pub weight: u32,
}

/// The vehicle roster and delivery list, with their shared depot.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
    /// Starting location for every vehicle.
    pub depot: String,
    /// Vehicle roster.
    pub vehicles: Vec<VehicleConfig>,
    /// Delivery list.
    pub deliveries: Vec<DeliveryConfig>,
}

impl FleetConfig {
    /// Builds a fleet manager holding the described roster and deliveries.
    pub fn build(&self) -> Result<FleetManager, ParseTimeWindowError> {
        let mut fleet = FleetManager::new();
        for vehicle in &self.vehicles {
            fleet.add_vehicle(Vehicle::new(
                vehicle.id.clone(),
                vehicle.kind,
                self.depot.clone(),
            ));
        }
        for delivery in &self.deliveries {
            let window = TimeWindow::parse(&delivery.window_start, &delivery.window_end)?;
            fleet.add_delivery(Delivery::new(
                delivery.id.clone(),
                delivery.location.clone(),
                window,
                delivery.priority,
                delivery.weight,
            ));
        }
        Ok(fleet)
    }
}

/// Traffic feed polling parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficConfig {
    /// Feed endpoint URL.
    pub endpoint: String,
    /// Delay between update cycles, in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_interval_secs() -> u64 {
    DEFAULT_UPDATE_INTERVAL.as_secs()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

impl TrafficConfig {
    /// Delay between update cycles.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the HTTP source this configuration describes.
    pub fn build_source(&self) -> HttpTrafficSource {
        HttpTrafficSource::new(self.endpoint.clone()).with_timeout(self.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_builds_network() {
        let config: TopologyConfig = serde_json::from_str(
            r#"{
                "nodes": ["Lone"],
                "edges": [
                    {"from": "A", "to": "B", "weight": 2.0},
                    {"from": "B", "to": "C", "weight": 4.0}
                ]
            }"#,
        )
        .expect("valid config");
        let network = config.build().expect("valid weights");
        assert_eq!(network.node_count(), 4);
        assert_eq!(network.edge_count(), 2);
        assert!(network.contains("Lone"));
        assert_eq!(network.edge_weight("A", "B"), Some(2.0));
    }

    #[test]
    fn test_topology_rejects_bad_weight() {
        let config: TopologyConfig = serde_json::from_str(
            r#"{"edges": [{"from": "A", "to": "B", "weight": -2.0}]}"#,
        )
        .expect("valid config");
        assert!(matches!(
            config.build(),
            Err(RoutingError::InvalidEdgeWeight { .. })
        ));
    }

    #[test]
    fn test_fleet_builds_roster_and_deliveries() {
        let config: FleetConfig = serde_json::from_str(
            r#"{
                "depot": "Presint 3",
                "vehicles": [
                    {"id": "Motorcycle_1", "kind": "motorcycle"},
                    {"id": "Van_1", "kind": "van"},
                    {"id": "Lorry_1", "kind": "lorry"}
                ],
                "deliveries": [
                    {
                        "id": "Delivery_1", "location": "Presint 1",
                        "window_start": "9am", "window_end": "12pm",
                        "priority": 1, "weight": 10
                    }
                ]
            }"#,
        )
        .expect("valid config");
        let fleet = config.build().expect("valid windows");
        assert_eq!(fleet.vehicles().len(), 3);
        assert_eq!(fleet.vehicles()[0].capacity(), 20);
        assert_eq!(fleet.vehicles()[2].capacity(), 300);
        assert_eq!(fleet.vehicles()[1].current_location(), "Presint 3");
        assert_eq!(fleet.deliveries().len(), 1);
        assert_eq!(fleet.deliveries()[0].location(), "Presint 1");
    }

    #[test]
    fn test_fleet_rejects_bad_window() {
        let config: FleetConfig = serde_json::from_str(
            r#"{
                "depot": "Depot",
                "vehicles": [],
                "deliveries": [
                    {
                        "id": "D1", "location": "A",
                        "window_start": "whenever", "window_end": "12pm",
                        "priority": 1, "weight": 10
                    }
                ]
            }"#,
        )
        .expect("valid config");
        assert!(matches!(
            config.build(),
            Err(ParseTimeWindowError::BadLabel(_))
        ));
    }

    #[test]
    fn test_traffic_defaults() {
        let config: TrafficConfig =
            serde_json::from_str(r#"{"endpoint": "http://traffic.local/weights"}"#)
                .expect("valid config");
        assert_eq!(config.interval(), DEFAULT_UPDATE_INTERVAL);
        assert_eq!(config.timeout(), DEFAULT_FETCH_TIMEOUT);
        let source = config.build_source();
        assert_eq!(source.endpoint(), "http://traffic.local/weights");
    }
}
