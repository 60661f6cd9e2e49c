//! Shared, lock-protected routing state.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::warn;

use crate::fleet::{AssignmentReport, FleetManager, OptimizeReport};
use crate::graph::{EdgeWeights, RoadNetwork};
use crate::models::RouteView;

/// Shared ownership of the road network and the fleet.
///
/// Constructed once at startup from the already-built setup inputs and
/// handed out as an `Arc` to the update loop and to request handlers; torn
/// down when the last handle drops.
///
/// Readers always observe a complete state: route reads take the fleet
/// lock, so a path is either the one before a traffic cycle or the fully
/// rewritten one after it, never a half-concatenated sequence. Likewise,
/// path computation inside a cycle runs against a single consistent
/// snapshot of the edge weights.
///
/// Lock order is network before fleet; every method that takes both
/// acquires them in that order.
#[derive(Debug)]
pub struct RoutingContext {
    network: RwLock<RoadNetwork>,
    fleet: RwLock<FleetManager>,
}

impl RoutingContext {
    /// Wraps the setup inputs into a shared context.
    pub fn new(network: RoadNetwork, fleet: FleetManager) -> Arc<Self> {
        Arc::new(Self {
            network: RwLock::new(network),
            fleet: RwLock::new(fleet),
        })
    }

    /// Snapshot of every vehicle's current route.
    pub async fn route_views(&self) -> Vec<RouteView> {
        self.fleet.read().await.route_views()
    }

    /// Read access to the network, for ad-hoc queries such as
    /// spanning-tree diagnostics.
    pub async fn network(&self) -> RwLockReadGuard<'_, RoadNetwork> {
        self.network.read().await
    }

    /// Runs the assignment stage under the fleet write lock.
    pub async fn assign_deliveries(&self) -> AssignmentReport {
        self.fleet.write().await.assign_deliveries()
    }

    /// Runs the optimization stage against the current edge weights.
    pub async fn optimize_routes(&self) -> OptimizeReport {
        let network = self.network.read().await;
        self.fleet.write().await.optimize_routes(&network)
    }

    /// Applies one traffic cycle: overwrite the edge weights, then rewrite
    /// the paths of every vehicle with pending assignments.
    ///
    /// An update set the network rejects degrades to the penalty-weight
    /// fallback, keeping stale-but-valid routes available rather than
    /// halting the cycle. Assignment is never re-run here; only paths are
    /// refreshed.
    pub async fn apply_traffic(&self, updates: &EdgeWeights) -> OptimizeReport {
        {
            let mut network = self.network.write().await;
            if let Err(error) = network.apply_weight_updates(updates) {
                warn!(%error, "rejected traffic update set, applying penalty weights");
                network.reset_weights();
            }
        }
        let network = self.network.read().await;
        self.fleet.write().await.optimize_routes(&network)
    }
}
