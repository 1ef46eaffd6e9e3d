//! Graph store access.
//!
//! The transit network lives in a graph store that is consumed, not
//! implemented, by the route planner. The planner depends on five query
//! shapes (upsert an endpoint, nearest station, shortest path over a set of
//! link kinds, pairwise distance, delete an endpoint); the dataset loader
//! adds bulk wipe and insert operations.
//!
//! Two stores are provided:
//! - [`Neo4jClient`] talks to a Neo4j server over its HTTP Cypher endpoint.
//! - [`InMemoryGraphStore`] keeps the network in memory, for offline runs
//!   and tests.

mod error;
mod memory;
mod neo4j;
mod queries;
mod types;

pub use error::GraphError;
pub use memory::InMemoryGraphStore;
pub use neo4j::{Neo4jClient, Neo4jConfig};

use crate::domain::{Endpoint, Link, LinkKind, Snap, Station, StationKey, Stop};

/// Operations a route computation and the dataset loader need from a
/// graph store.
///
/// Each call completes before the next is issued; implementations are not
/// required to be safe for concurrent computations beyond what the
/// per-request endpoint keys already guarantee.
pub trait GraphStore {
    /// Create the temporary node for `endpoint`, replacing its location if
    /// a node with the same key exists.
    async fn upsert_endpoint(&self, endpoint: &Endpoint) -> Result<(), GraphError>;

    /// Find the real station closest to `endpoint`.
    ///
    /// Temporary endpoint nodes are never returned. When several stations
    /// are exactly equidistant, which one is returned is unspecified.
    /// Returns `None` when the store has no stations.
    async fn nearest_station(&self, endpoint: &Endpoint) -> Result<Option<Snap>, GraphError>;

    /// Shortest path from `from` to `to` following only links of `kinds`.
    ///
    /// The path includes both ends. Returns `None` when `to` is unreachable
    /// or either station is unknown.
    async fn shortest_path(
        &self,
        from: &StationKey,
        to: &StationKey,
        kinds: &[LinkKind],
    ) -> Result<Option<Vec<Stop>>, GraphError>;

    /// Straight-line distance between two stations, in meters.
    ///
    /// Returns `None` when either station is unknown.
    async fn distance(&self, a: &StationKey, b: &StationKey) -> Result<Option<f64>, GraphError>;

    /// Delete the temporary node for `endpoint`, with its links.
    ///
    /// Deleting an endpoint that does not exist is not an error.
    async fn delete_endpoint(&self, endpoint: &Endpoint) -> Result<(), GraphError>;

    /// Delete every node and link.
    async fn clear(&self) -> Result<(), GraphError>;

    /// Insert station records. Returns the number inserted.
    async fn insert_stations(&self, stations: &[Station]) -> Result<usize, GraphError>;

    /// Insert links between existing stations. Returns the number inserted.
    async fn insert_links(&self, links: &[Link]) -> Result<usize, GraphError>;
}
