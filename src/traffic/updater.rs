//! Periodic traffic ingestion and re-optimization.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::fleet::{OptimizeReport, RoutingContext};
use crate::graph::EdgeWeights;
use crate::traffic::TrafficSource;

/// Default delay between traffic update cycles.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(300);

/// Periodically pulls the traffic feed into the shared context.
///
/// Each cycle fetches the feed, overwrites the network's edge weights, and
/// rewrites the paths of every vehicle with pending assignments. The loop
/// runs until its cancellation token fires, so the embedding process can
/// shut down cleanly.
///
/// # Examples
///
/// ```no_run
/// use fleet_routing::fleet::{FleetManager, RoutingContext};
/// use fleet_routing::graph::RoadNetwork;
/// use fleet_routing::traffic::{HttpTrafficSource, TrafficUpdater};
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() {
/// let ctx = RoutingContext::new(RoadNetwork::new(), FleetManager::new());
/// let source = Arc::new(HttpTrafficSource::new("http://traffic.local/weights"));
///
/// let cancel = CancellationToken::new();
/// let handle = TrafficUpdater::new(ctx, source).spawn(cancel.clone());
///
/// // ... on shutdown:
/// cancel.cancel();
/// handle.await.unwrap();
/// # }
/// ```
pub struct TrafficUpdater {
    ctx: Arc<RoutingContext>,
    source: Arc<dyn TrafficSource>,
    interval: Duration,
}

impl TrafficUpdater {
    /// Creates an updater polling at [`DEFAULT_UPDATE_INTERVAL`].
    pub fn new(ctx: Arc<RoutingContext>, source: Arc<dyn TrafficSource>) -> Self {
        Self {
            ctx,
            source,
            interval: DEFAULT_UPDATE_INTERVAL,
        }
    }

    /// Sets the delay between cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs one fetch → overwrite → re-optimize cycle.
    ///
    /// A failed or malformed fetch degrades to the empty update set, which
    /// resets every edge to the penalty weight; the failure is logged, not
    /// propagated, so stale-but-valid routes stay available. Assignment is
    /// never re-run; only paths are refreshed.
    pub async fn run_cycle(&self) -> OptimizeReport {
        let updates = match self.source.fetch().await {
            Ok(updates) => updates,
            Err(error) => {
                warn!(%error, "traffic fetch failed, falling back to penalty weights");
                EdgeWeights::new()
            }
        };
        let report = self.ctx.apply_traffic(&updates).await;
        if report.failed.is_empty() {
            info!(
                edges = updates.len(),
                vehicles = report.optimized.len(),
                "routes refreshed"
            );
        } else {
            warn!(
                refreshed = report.optimized.len(),
                stale = report.failed.len(),
                "some vehicles kept stale paths"
            );
        }
        report
    }

    /// Runs cycles on the configured interval until `cancel` fires.
    ///
    /// The first cycle runs immediately; if a cycle overruns the interval,
    /// the next one is delayed rather than bursted.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("traffic updater stopped");
                    return;
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }

    /// Spawns [`run`](TrafficUpdater::run) onto the current runtime.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrafficError;
    use crate::fleet::FleetManager;
    use crate::graph::{RoadNetwork, DEFAULT_PENALTY_WEIGHT};
    use crate::models::{Delivery, RouteStage, TimeWindow, Vehicle, VehicleKind};
    use crate::traffic::TrafficReading;
    use async_trait::async_trait;

    struct FixedSource(EdgeWeights);

    #[async_trait]
    impl TrafficSource for FixedSource {
        async fn fetch(&self) -> Result<EdgeWeights, TrafficError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TrafficSource for FailingSource {
        async fn fetch(&self) -> Result<EdgeWeights, TrafficError> {
            let err = serde_json::from_str::<Vec<TrafficReading>>("garbage")
                .expect_err("not a feed document");
            Err(TrafficError::from(err))
        }
    }

    fn diamond_context() -> Arc<RoutingContext> {
        let network = RoadNetwork::from_edges([
            ("Depot", "B", 1.0),
            ("B", "Goal", 1.0),
            ("Depot", "D", 5.0),
            ("D", "Goal", 5.0),
        ])
        .expect("valid edges");

        let mut fleet = FleetManager::new();
        fleet.add_vehicle(Vehicle::new("V1", VehicleKind::Van, "Depot"));
        let window = TimeWindow::parse("9am", "12pm").expect("valid labels");
        fleet.add_delivery(Delivery::new("D1", "Goal", window, 1, 10));

        RoutingContext::new(network, fleet)
    }

    #[tokio::test]
    async fn test_cycle_applies_updates_and_reroutes() {
        let ctx = diamond_context();
        ctx.assign_deliveries().await;
        ctx.optimize_routes().await;

        let mut updates = EdgeWeights::new();
        updates.insert(("Depot".to_string(), "D".to_string()), 1.0);
        updates.insert(("D".to_string(), "Goal".to_string()), 1.0);
        let updater = TrafficUpdater::new(Arc::clone(&ctx), Arc::new(FixedSource(updates)));

        let report = updater.run_cycle().await;
        assert_eq!(report.optimized, vec!["V1"]);

        let views = ctx.route_views().await;
        assert_eq!(
            views[0].route,
            RouteStage::Path(vec![
                "Depot".to_string(),
                "D".to_string(),
                "Goal".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_penalty() {
        let ctx = diamond_context();
        ctx.assign_deliveries().await;

        let updater = TrafficUpdater::new(Arc::clone(&ctx), Arc::new(FailingSource));
        let report = updater.run_cycle().await;
        // Recovery still refreshes paths against penalty weights.
        assert_eq!(report.optimized, vec!["V1"]);

        let network = ctx.network().await;
        for (u, v) in [("Depot", "B"), ("B", "Goal"), ("Depot", "D"), ("D", "Goal")] {
            assert_eq!(network.edge_weight(u, v), Some(DEFAULT_PENALTY_WEIGHT));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_first_cycle_is_immediate() {
        let ctx = diamond_context();
        ctx.assign_deliveries().await;

        let cancel = CancellationToken::new();
        let updater =
            TrafficUpdater::new(Arc::clone(&ctx), Arc::new(FixedSource(EdgeWeights::new())))
                .with_interval(Duration::from_secs(300));
        let handle = updater.spawn(cancel.clone());

        // Let the spawned task reach its first tick without advancing time.
        tokio::task::yield_now().await;
        let views = ctx.route_views().await;
        assert!(matches!(views[0].route, RouteStage::Path(_)));

        cancel.cancel();
        handle.await.expect("updater task panicked");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_cancellation() {
        let ctx = diamond_context();
        let cancel = CancellationToken::new();
        let updater =
            TrafficUpdater::new(Arc::clone(&ctx), Arc::new(FixedSource(EdgeWeights::new())));
        let handle = updater.spawn(cancel.clone());

        tokio::task::yield_now().await;
        cancel.cancel();
        handle.await.expect("updater task panicked");
    }
}
