//! The result of a route computation.

use super::station::{Line, Stop};

/// Nearest station to a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct Snap {
    /// The station the point snapped to.
    pub stop: Stop,
    /// Straight-line distance from the query point, in meters.
    pub distance: f64,
}

/// One row of the itinerary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryStop {
    pub display_name: String,
    pub line: Line,
}

/// Time components of a route, in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeEstimate {
    /// Walking from the departure point to the first station.
    pub walk_to_start: f64,
    /// Riding, including the fixed delay of every transfer.
    pub transit: f64,
    /// Walking from the last station to the arrival point.
    pub walk_from_end: f64,
}

impl TimeEstimate {
    /// Sum of the three components.
    pub fn total(&self) -> f64 {
        self.walk_to_start + self.transit + self.walk_from_end
    }
}

/// A summarized route between two query points.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Station nearest to the departure point.
    pub origin: Snap,

    /// Station nearest to the arrival point.
    pub destination: Snap,

    /// Stations in travel order. Both records of a transfer appear.
    pub stops: Vec<ItineraryStop>,

    /// Number of line changes.
    pub transfers: usize,

    /// Distinct stations visited, not counting the first one.
    pub stations: usize,

    /// Physical distance covered between stations, in meters.
    pub transit_distance: f64,

    pub time: TimeEstimate,
}
