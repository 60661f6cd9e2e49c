//! Externally visible route representation.

use serde::Serialize;

/// The two pipeline stages a vehicle's route can be in.
///
/// Assignment and optimization produce different sequences: assignment
/// yields an ordered list of delivery IDs, optimization rewrites it into an
/// ordered list of location IDs (the concrete path). The serialized form
/// tags which stage the stops belong to, so readers of the route surface
/// never have to guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "stops", rename_all = "snake_case")]
pub enum RouteStage {
    /// Ordered delivery IDs; assignment has run, optimization has not.
    Deliveries(Vec<String>),
    /// Ordered location IDs; the concrete shortest path after optimization.
    Path(Vec<String>),
}

/// One vehicle's route as exposed to external readers.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{RouteStage, RouteView};
///
/// let view = RouteView {
///     vehicle_id: "Van_1".to_string(),
///     route: RouteStage::Path(vec!["A".to_string(), "B".to_string()]),
/// };
/// let json = serde_json::to_string(&view).unwrap();
/// assert_eq!(
///     json,
///     r#"{"vehicle_id":"Van_1","stage":"path","stops":["A","B"]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteView {
    /// The vehicle this route belongs to.
    pub vehicle_id: String,
    /// The stops, tagged with their pipeline stage.
    #[serde(flatten)]
    pub route: RouteStage,
}
