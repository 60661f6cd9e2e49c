//! External traffic feed ingestion and periodic re-optimization.
//!
//! [`TrafficSource`] abstracts the pull-based feed endpoint,
//! [`HttpTrafficSource`] implements it over HTTP, and [`TrafficUpdater`]
//! runs the fetch → overwrite → re-optimize cycle on a timer with
//! cancellation support.

mod source;
mod updater;

pub use source::{
    readings_to_updates, HttpTrafficSource, TrafficReading, TrafficSource, DEFAULT_FETCH_TIMEOUT,
};
pub use updater::{TrafficUpdater, DEFAULT_UPDATE_INTERVAL};
