//! Links derived from station positions and names.
//!
//! Transfer and walking links are not in the link table: they follow from
//! the station table alone.

use std::collections::BTreeMap;

use crate::domain::{Link, Station, StationName};

/// Default distance under which two stops are walkable, in meters.
pub const DEFAULT_WALK_THRESHOLD_M: f64 = 1000.0;

/// Transfer links between the records of each stop.
///
/// Every ordered pair of records sharing a normalized name but not a line
/// gets one link, so each transfer exists in both directions.
pub fn transfer_links(stations: &[Station]) -> Vec<Link> {
    let mut by_name: BTreeMap<&StationName, Vec<&Station>> = BTreeMap::new();
    for station in stations {
        by_name.entry(&station.key.name).or_default().push(station);
    }

    let mut links = Vec::new();
    for records in by_name.values() {
        for from in records {
            for to in records {
                if from.key.line != to.key.line {
                    links.push(Link::transfer(from.key.clone(), to.key.clone()));
                }
            }
        }
    }
    links
}

/// Walking links between distinct stops closer than `threshold_m`.
///
/// Compares every pair of records, so it is quadratic in the station count.
/// Fine for a metro network of a few hundred records.
pub fn walking_links(stations: &[Station], threshold_m: f64) -> Vec<Link> {
    let mut links = Vec::new();
    for from in stations {
        for to in stations {
            if from.key.name != to.key.name && from.location.distance(&to.location) < threshold_m {
                links.push(Link::walk(from.key.clone(), to.key.clone()));
            }
        }
    }
    links
}
