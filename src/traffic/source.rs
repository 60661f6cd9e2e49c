//! Traffic feed wire format and sources.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::error::TrafficError;
use crate::graph::EdgeWeights;

/// Timeout applied to each feed request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// One edge reading of the external feed.
///
/// The feed document is a JSON array of readings:
///
/// ```json
/// [
///   {"from": "Presint 3", "to": "Presint 1", "weight": 2.5},
///   {"from": "Presint 1", "to": "Presint 5", "weight": 4.0}
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficReading {
    /// One endpoint of the edge.
    pub from: String,
    /// The other endpoint.
    pub to: String,
    /// Observed traversal weight.
    pub weight: f64,
}

/// Converts feed readings into an update set.
///
/// Readings with negative or non-finite weights are logged and skipped;
/// their edges simply fall back to the penalty weight downstream, the same
/// as edges the feed never mentioned.
pub fn readings_to_updates(readings: Vec<TrafficReading>) -> EdgeWeights {
    let mut updates = EdgeWeights::new();
    for reading in readings {
        if !reading.weight.is_finite() || reading.weight < 0.0 {
            warn!(
                from = %reading.from,
                to = %reading.to,
                weight = reading.weight,
                "dropping malformed traffic reading"
            );
            continue;
        }
        updates.insert((reading.from, reading.to), reading.weight);
    }
    updates
}

/// A pull-based provider of edge-weight updates.
///
/// The seam between the update loop and the external endpoint; tests and
/// alternative transports implement it directly.
#[async_trait]
pub trait TrafficSource: Send + Sync {
    /// Fetches the current update set.
    async fn fetch(&self) -> Result<EdgeWeights, TrafficError>;
}

/// HTTP feed returning a JSON array of [`TrafficReading`]s.
///
/// Each request carries an explicit timeout so a stalled endpoint degrades
/// to a failed fetch instead of wedging the update loop.
#[derive(Debug, Clone)]
pub struct HttpTrafficSource {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTrafficSource {
    /// Creates a source polling the given endpoint with
    /// [`DEFAULT_FETCH_TIMEOUT`].
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The polled endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TrafficSource for HttpTrafficSource {
    async fn fetch(&self) -> Result<EdgeWeights, TrafficError> {
        let body = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let readings: Vec<TrafficReading> = serde_json::from_str(&body)?;
        Ok(readings_to_updates(readings))
    }
}
