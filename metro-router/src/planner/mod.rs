//! Route planning between two arbitrary points.
//!
//! Each query point is snapped to its nearest station, the graph store is
//! asked for the shortest path between the two stations, and the path is
//! summarized into an itinerary with a travel time estimate.
//!
//! The path search itself belongs to the graph store; this module only
//! orchestrates it and post-processes its result.

mod config;
mod error;
mod estimate;
mod route;
mod snap;
mod summary;

pub use config::{ConfigError, PlannerConfig};
pub use error::{PlanError, RouteStage};
pub use estimate::estimate_time;
pub use route::{RoutePlanner, RouteRequest};
pub use snap::nearest_station;
pub use summary::{RouteSummary, summarize, transit_distance};
