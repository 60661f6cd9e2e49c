//! Delivery request and time window types.

use chrono::NaiveTime;
use thiserror::Error;

/// Error constructing a [`TimeWindow`] from 12-hour clock labels.
#[derive(Debug, Error)]
pub enum ParseTimeWindowError {
    /// The label did not parse as a 12-hour clock time.
    #[error("unparseable time label {0:?}")]
    BadLabel(String),
    /// The parsed window was inverted.
    #[error("window start {start} is after end {end}")]
    Inverted {
        /// Parsed start bound.
        start: NaiveTime,
        /// Parsed end bound.
        end: NaiveTime,
    },
}

/// The time-of-day interval during which a delivery should be made.
///
/// Windows order by `(start, end)`, which is the tie-break used when
/// deliveries share a priority.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::TimeWindow;
///
/// let morning = TimeWindow::parse("9am", "12pm").unwrap();
/// let afternoon = TimeWindow::parse("12pm", "3pm").unwrap();
/// assert!(morning < afternoon);
/// assert!(morning.start() <= morning.end());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Creates a window from raw bounds.
    ///
    /// Returns `None` if `start > end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Parses 12-hour clock labels such as `"9am"`, `"12pm"`, or `"4:30pm"`.
    pub fn parse(start: &str, end: &str) -> Result<Self, ParseTimeWindowError> {
        let start = parse_label(start)?;
        let end = parse_label(end)?;
        Self::new(start, end).ok_or(ParseTimeWindowError::Inverted { start, end })
    }

    /// Earliest delivery time.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Latest delivery time.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }
}

fn parse_label(label: &str) -> Result<NaiveTime, ParseTimeWindowError> {
    NaiveTime::parse_from_str(label, "%I%p")
        .or_else(|_| NaiveTime::parse_from_str(label, "%I:%M%p"))
        .map_err(|_| ParseTimeWindowError::BadLabel(label.to_string()))
}

/// An immutable delivery request.
///
/// Created once at setup and never mutated; assignment and optimization
/// reference deliveries by ID.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Delivery, TimeWindow};
///
/// let window = TimeWindow::parse("9am", "12pm").unwrap();
/// let delivery = Delivery::new("D1", "North Yard", window, 1, 10);
/// assert_eq!(delivery.id(), "D1");
/// assert_eq!(delivery.priority(), 1);
/// assert_eq!(delivery.weight(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Delivery {
    id: String,
    location: String,
    time_window: TimeWindow,
    priority: u32,
    weight: u32,
}

impl Delivery {
    /// Creates a delivery request.
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        time_window: TimeWindow,
        priority: u32,
        weight: u32,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            time_window,
            priority,
            weight,
        }
    }

    /// Delivery ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Destination location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Time window for the delivery.
    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Urgency ranking; lower value = served first.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Weight consumed from the carrying vehicle's capacity.
    pub fn weight(&self) -> u32 {
        self.weight
    }
}
