//! Plain-text itinerary report.

use askama::Template;

use crate::domain::{Itinerary, Snap};

/// The printed form of an [`Itinerary`].
#[derive(Template)]
#[template(path = "itinerary.txt")]
pub struct ItineraryReport {
    pub origin: SnapView,
    pub destination: SnapView,
    pub stops: Vec<StopView>,
    pub transfers: usize,
    pub stations: usize,
    pub transit_distance: String,
    pub walk_to_start: String,
    pub transit: String,
    pub walk_from_end: String,
    pub total: String,
}

/// Nearest station view model.
#[derive(Debug, Clone)]
pub struct SnapView {
    pub station: String,
    pub line: String,
    pub distance: String,
}

/// Itinerary row view model.
#[derive(Debug, Clone)]
pub struct StopView {
    pub station: String,
    pub line: String,
}

impl From<&Snap> for SnapView {
    fn from(snap: &Snap) -> Self {
        Self {
            station: snap.stop.display_name.clone(),
            line: snap.stop.line.to_string(),
            distance: two_decimals(snap.distance),
        }
    }
}

impl From<&Itinerary> for ItineraryReport {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            origin: SnapView::from(&itinerary.origin),
            destination: SnapView::from(&itinerary.destination),
            stops: itinerary
                .stops
                .iter()
                .map(|s| StopView {
                    station: s.display_name.clone(),
                    line: s.line.to_string(),
                })
                .collect(),
            transfers: itinerary.transfers,
            stations: itinerary.stations,
            transit_distance: two_decimals(itinerary.transit_distance),
            walk_to_start: two_decimals(itinerary.time.walk_to_start),
            transit: two_decimals(itinerary.time.transit),
            walk_from_end: two_decimals(itinerary.time.walk_from_end),
            total: two_decimals(itinerary.time.total()),
        }
    }
}

/// Render `itinerary` as text.
pub fn render(itinerary: &Itinerary) -> Result<String, askama::Error> {
    ItineraryReport::from(itinerary).render()
}

fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}
