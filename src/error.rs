//! Error types for road-network queries and traffic ingestion.

use thiserror::Error;

/// Errors from road-network construction and shortest-path queries.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No route exists between two locations of the network.
    #[error("no path from {from} to {to}")]
    NoPath {
        /// Start location of the failed query.
        from: String,
        /// Goal location of the failed query.
        to: String,
    },

    /// A location name that is not a node of the network.
    #[error("unknown location {0}")]
    UnknownLocation(String),

    /// An edge weight outside `[0, +inf)`. The network is left unmodified.
    #[error("invalid weight {weight} for edge {from}-{to}")]
    InvalidEdgeWeight {
        /// One endpoint of the offending edge.
        from: String,
        /// The other endpoint.
        to: String,
        /// The rejected weight.
        weight: f64,
    },
}

/// Errors from fetching or decoding the external traffic feed.
///
/// These never escape the update cycle: the updater recovers by applying
/// the empty update set, which resets every edge to the penalty weight.
#[derive(Debug, Error)]
pub enum TrafficError {
    /// Transport-level failure: connect error, timeout, or non-2xx status.
    #[error("traffic request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not a valid feed document.
    #[error("malformed traffic feed: {0}")]
    Malformed(#[from] serde_json::Error),
}
