//! Path summarization.
//!
//! A path from the graph store lists every station record traversed. A
//! transfer shows up as two consecutive records with the same normalized
//! name on different lines, so transfers are counted from adjacent pairs
//! and stations from distinct names.

use std::collections::HashSet;

use crate::domain::{ItineraryStop, Stop};
use crate::graph::GraphStore;

use super::error::{PlanError, RouteStage};

/// Counts and presentation rows derived from a path.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Rows in path order, both records of a transfer included.
    pub stops: Vec<ItineraryStop>,

    /// Adjacent pairs sharing a normalized name.
    pub transfers: usize,

    /// Distinct normalized names, not counting the starting station.
    pub stations: usize,
}

/// Summarize a path. Never fails, including on empty input.
pub fn summarize(path: &[Stop]) -> RouteSummary {
    let transfers = path.windows(2).filter(|w| w[0].name == w[1].name).count();

    let distinct: HashSet<_> = path.iter().map(|stop| &stop.name).collect();
    let stations = distinct.len().saturating_sub(1);

    let stops = path
        .iter()
        .map(|stop| ItineraryStop {
            display_name: stop.display_name.clone(),
            line: stop.line.clone(),
        })
        .collect();

    RouteSummary {
        stops,
        transfers,
        stations,
    }
}

/// Total physical distance between consecutive stations of `path`.
///
/// Issues one distance query per consecutive pair. Transfer hops add zero;
/// a path of fewer than two stations sums to zero.
pub async fn transit_distance<S: GraphStore>(store: &S, path: &[Stop]) -> Result<f64, PlanError> {
    let mut total = 0.0;

    for pair in path.windows(2) {
        let (from, to) = (pair[0].key(), pair[1].key());
        let segment = store
            .distance(&from, &to)
            .await
            .map_err(|source| PlanError::Store {
                stage: RouteStage::ComputeDistances,
                source,
            })?
            .ok_or_else(|| PlanError::NotFound(format!("no distance between {from} and {to}")))?;
        total += segment;
    }

    Ok(total)
}
