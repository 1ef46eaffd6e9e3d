//! Route computation between two query points.
//!
//! A computation brackets all of its work between creating two temporary
//! endpoint nodes and deleting them:
//!
//! ```text
//! CreateEndpoints → SnapEndpoints → FetchPath → Summarize
//!   → ComputeDistances → EstimateTime → CleanupEndpoints → Done
//! ```
//!
//! `CleanupEndpoints` runs whatever happened before it, so a failed
//! computation never leaves endpoints behind in the store.

use tracing::{debug, info, warn};

use crate::domain::{Endpoint, Itinerary, Point, RequestToken, Snap, Stop};
use crate::graph::{GraphError, GraphStore};

use super::config::{ConfigError, PlannerConfig};
use super::error::{PlanError, RouteStage};
use super::estimate::estimate_time;
use super::summary::{summarize, transit_distance};

/// Departure and arrival points of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub departure: Point,
    pub arrival: Point,
}

impl RouteRequest {
    /// Create a request from validated points.
    pub fn new(departure: Point, arrival: Point) -> Self {
        Self { departure, arrival }
    }

    /// Create a request from raw projected coordinates, in meters.
    pub fn from_coordinates(
        x_departure: f64,
        y_departure: f64,
        x_arrival: f64,
        y_arrival: f64,
    ) -> Result<Self, PlanError> {
        Ok(Self {
            departure: Point::new(x_departure, y_departure)?,
            arrival: Point::new(x_arrival, y_arrival)?,
        })
    }
}

/// Plans routes against a graph store.
///
/// Computations on the same store may overlap: each one works on its own
/// endpoint nodes.
pub struct RoutePlanner<'a, S: GraphStore> {
    store: &'a S,
    config: &'a PlannerConfig,
}

impl<'a, S: GraphStore> RoutePlanner<'a, S> {
    /// Create a new planner. Fails if `config` is invalid.
    pub fn new(store: &'a S, config: &'a PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Compute the itinerary between the two points of `request`.
    pub async fn plan(&self, request: &RouteRequest) -> Result<Itinerary, PlanError> {
        let token = RequestToken::generate();
        let departure = Endpoint::departure(token, request.departure);
        let arrival = Endpoint::arrival(token, request.arrival);
        debug!(%token, from = %request.departure, to = %request.arrival, "planning route");

        let outcome = self.run_stages(&departure, &arrival).await;

        enter(RouteStage::CleanupEndpoints);
        let cleanup = self.cleanup(&[&departure, &arrival]).await;

        match (outcome, cleanup) {
            (Ok(itinerary), Ok(())) => {
                enter(RouteStage::Done);
                Ok(itinerary)
            }
            (Ok(_), Err(source)) => Err(PlanError::Store {
                stage: RouteStage::CleanupEndpoints,
                source,
            }),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(cleanup_err)) => {
                warn!(error = %cleanup_err, "endpoint cleanup also failed");
                Err(err)
            }
        }
    }

    async fn run_stages(
        &self,
        departure: &Endpoint,
        arrival: &Endpoint,
    ) -> Result<Itinerary, PlanError> {
        enter(RouteStage::CreateEndpoints);
        for endpoint in [departure, arrival] {
            self.store
                .upsert_endpoint(endpoint)
                .await
                .map_err(store_error(RouteStage::CreateEndpoints))?;
        }

        enter(RouteStage::SnapEndpoints);
        let origin = self.snap(departure).await?;
        let destination = self.snap(arrival).await?;

        enter(RouteStage::FetchPath);
        let path = self.fetch_path(&origin, &destination).await?;
        debug!(stops = path.len(), "path found");

        enter(RouteStage::Summarize);
        let summary = summarize(&path);

        enter(RouteStage::ComputeDistances);
        let transit = transit_distance(self.store, &path).await?;

        enter(RouteStage::EstimateTime);
        let time = estimate_time(
            origin.distance,
            destination.distance,
            transit,
            summary.transfers,
            self.config,
        );

        Ok(Itinerary {
            origin,
            destination,
            stops: summary.stops,
            transfers: summary.transfers,
            stations: summary.stations,
            transit_distance: transit,
            time,
        })
    }

    async fn snap(&self, endpoint: &Endpoint) -> Result<Snap, PlanError> {
        let snap = self
            .store
            .nearest_station(endpoint)
            .await
            .map_err(store_error(RouteStage::SnapEndpoints))?
            .ok_or_else(|| PlanError::NotFound("the graph has no stations".to_string()))?;

        info!(
            role = %endpoint.role,
            station = %snap.stop.display_name,
            line = %snap.stop.line,
            distance_m = snap.distance,
            "nearest station"
        );
        Ok(snap)
    }

    async fn fetch_path(&self, origin: &Snap, destination: &Snap) -> Result<Vec<Stop>, PlanError> {
        let (from, to) = (origin.stop.key(), destination.stop.key());

        if from == to {
            return Ok(vec![origin.stop.clone()]);
        }

        self.store
            .shortest_path(&from, &to, &self.config.link_kinds)
            .await
            .map_err(store_error(RouteStage::FetchPath))?
            .filter(|path| !path.is_empty())
            .ok_or_else(|| PlanError::NotFound(format!("no path from {from} to {to}")))
    }

    /// Delete every endpoint, attempting all of them even if one fails.
    async fn cleanup(&self, endpoints: &[&Endpoint]) -> Result<(), GraphError> {
        let mut first_error = None;

        for endpoint in endpoints {
            if let Err(e) = self.store.delete_endpoint(endpoint).await {
                warn!(key = %endpoint.key(), error = %e, "failed to delete endpoint");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn enter(stage: RouteStage) {
    debug!(%stage, "entering stage");
}

fn store_error(stage: RouteStage) -> impl Fn(GraphError) -> PlanError {
    move |source| PlanError::Store { stage, source }
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod scenario_tests;
