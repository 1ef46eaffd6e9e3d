//! Travel time estimation.

use crate::domain::TimeEstimate;

use super::config::PlannerConfig;

/// Estimate the three time components of a route, in minutes.
///
/// Each component is `distance / speed`, converted from hours; the transit
/// component also includes `transfers * transfer_delay`. Speeds are assumed
/// valid (see [`PlannerConfig::validate`]).
pub fn estimate_time(
    walk_to_start_m: f64,
    walk_from_end_m: f64,
    transit_m: f64,
    transfers: usize,
    config: &PlannerConfig,
) -> TimeEstimate {
    let walking = |meters: f64| meters / config.walking_speed_m_per_h * 60.0;

    TimeEstimate {
        walk_to_start: walking(walk_to_start_m),
        transit: transit_m / config.transit_speed_m_per_h * 60.0
            + transfers as f64 * config.transfer_delay_mins,
        walk_from_end: walking(walk_from_end_m),
    }
}
