//! In-memory graph store.
//!
//! Holds the whole network in memory and answers the same queries as the
//! Neo4j store. Shortest paths are found by breadth-first search over the
//! links of the requested kinds, so like Cypher's `shortestPath` they
//! minimize the number of hops.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::trace;

use crate::domain::{Endpoint, Link, LinkKind, Point, Snap, Station, StationKey, Stop};
use crate::planner::nearest_station;

use super::GraphStore;
use super::error::GraphError;

#[derive(Debug, Default)]
struct Network {
    stations: Vec<Station>,
    index: HashMap<StationKey, usize>,
    /// Outgoing links per station index, in insertion order.
    adjacency: Vec<Vec<(usize, LinkKind)>>,
    /// Temporary endpoints by key.
    endpoints: HashMap<String, Point>,
}

/// Graph store kept in process memory.
///
/// Cloning shares the underlying network.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraphStore {
    inner: Arc<RwLock<Network>>,
}

impl InMemoryGraphStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of real stations.
    pub async fn station_count(&self) -> usize {
        self.inner.read().await.stations.len()
    }

    /// Number of links.
    pub async fn link_count(&self) -> usize {
        self.inner
            .read()
            .await
            .adjacency
            .iter()
            .map(Vec::len)
            .sum()
    }

    /// Number of links of one kind.
    pub async fn link_count_of(&self, kind: LinkKind) -> usize {
        self.inner
            .read()
            .await
            .adjacency
            .iter()
            .flatten()
            .filter(|(_, k)| *k == kind)
            .count()
    }

    /// Keys of the temporary endpoints currently stored.
    pub async fn endpoint_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.inner.read().await.endpoints.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl GraphStore for InMemoryGraphStore {
    async fn upsert_endpoint(&self, endpoint: &Endpoint) -> Result<(), GraphError> {
        let mut network = self.inner.write().await;
        network.endpoints.insert(endpoint.key(), endpoint.location);
        Ok(())
    }

    async fn nearest_station(&self, endpoint: &Endpoint) -> Result<Option<Snap>, GraphError> {
        let network = self.inner.read().await;

        let Some(location) = network.endpoints.get(&endpoint.key()) else {
            return Ok(None);
        };

        Ok(
            nearest_station(location, &network.stations).map(|(station, distance)| Snap {
                stop: station.to_stop(),
                distance,
            }),
        )
    }

    async fn shortest_path(
        &self,
        from: &StationKey,
        to: &StationKey,
        kinds: &[LinkKind],
    ) -> Result<Option<Vec<Stop>>, GraphError> {
        let network = self.inner.read().await;

        let (Some(&start), Some(&goal)) = (network.index.get(from), network.index.get(to)) else {
            return Ok(None);
        };

        Ok(bfs(&network.adjacency, start, goal, kinds).map(|path| {
            path.into_iter()
                .map(|idx| network.stations[idx].to_stop())
                .collect()
        }))
    }

    async fn distance(&self, a: &StationKey, b: &StationKey) -> Result<Option<f64>, GraphError> {
        let network = self.inner.read().await;
        let (Some(&ia), Some(&ib)) = (network.index.get(a), network.index.get(b)) else {
            return Ok(None);
        };
        Ok(Some(
            network.stations[ia]
                .location
                .distance(&network.stations[ib].location),
        ))
    }

    async fn delete_endpoint(&self, endpoint: &Endpoint) -> Result<(), GraphError> {
        let mut network = self.inner.write().await;
        network.endpoints.remove(&endpoint.key());
        Ok(())
    }

    async fn clear(&self) -> Result<(), GraphError> {
        let mut network = self.inner.write().await;
        *network = Network::default();
        Ok(())
    }

    async fn insert_stations(&self, stations: &[Station]) -> Result<usize, GraphError> {
        let mut network = self.inner.write().await;
        let mut inserted = 0;

        for station in stations {
            if network.index.contains_key(&station.key) {
                trace!(key = %station.key, "station already present, skipping");
                continue;
            }
            let idx = network.stations.len();
            network.index.insert(station.key.clone(), idx);
            network.stations.push(station.clone());
            network.adjacency.push(Vec::new());
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn insert_links(&self, links: &[Link]) -> Result<usize, GraphError> {
        let mut network = self.inner.write().await;
        let mut inserted = 0;

        for link in links {
            // Links to unknown stations are dropped, like an unmatched MATCH
            let (Some(&from), Some(&to)) = (network.index.get(&link.from), network.index.get(&link.to))
            else {
                trace!(from = %link.from, to = %link.to, "link endpoint unknown, skipping");
                continue;
            };
            network.adjacency[from].push((to, link.kind));
            inserted += 1;
        }

        Ok(inserted)
    }
}

/// Breadth-first search from `start` to `goal` over links of `kinds`.
///
/// Returns the station indices along the path, both ends included.
fn bfs(
    adjacency: &[Vec<(usize, LinkKind)>],
    start: usize,
    goal: usize,
    kinds: &[LinkKind],
) -> Option<Vec<usize>> {
    if start == goal {
        return Some(vec![start]);
    }

    let allowed: HashSet<LinkKind> = kinds.iter().copied().collect();
    let mut parent: HashMap<usize, usize> = HashMap::new();
    let mut visited: HashSet<usize> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for &(next, kind) in &adjacency[current] {
            if !allowed.contains(&kind) || !visited.insert(next) {
                continue;
            }
            parent.insert(next, current);

            if next == goal {
                let mut path = vec![goal];
                let mut node = goal;
                while let Some(&prev) = parent.get(&node) {
                    path.push(prev);
                    node = prev;
                }
                path.reverse();
                return Some(path);
            }

            queue.push_back(next);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Line, RequestToken, StationName};

    fn key(name: &str, line: &str) -> StationKey {
        StationKey::new(
            StationName::normalize(name).unwrap(),
            Line::parse(line).unwrap(),
        )
    }

    fn station(name: &str, line: &str, x: f64, y: f64) -> Station {
        Station::new(name, key(name, line), Point::new(x, y).unwrap())
    }

    fn point(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    /// Line 1: A - B - C, line 2: C - D, transfer at C, walk A -> D.
    async fn sample_store() -> InMemoryGraphStore {
        let store = InMemoryGraphStore::new();
        store
            .insert_stations(&[
                station("A", "1", 0.0, 0.0),
                station("B", "1", 1000.0, 0.0),
                station("C", "1", 2000.0, 0.0),
                station("C", "2", 2000.0, 0.0),
                station("D", "2", 2000.0, 1000.0),
            ])
            .await
            .unwrap();

        let l1 = Line::parse("1").unwrap();
        let l2 = Line::parse("2").unwrap();
        store
            .insert_links(&[
                Link::train(key("A", "1"), key("B", "1"), l1.clone()),
                Link::train(key("B", "1"), key("C", "1"), l1),
                Link::train(key("C", "2"), key("D", "2"), l2),
                Link::transfer(key("C", "1"), key("C", "2")),
                Link::transfer(key("C", "2"), key("C", "1")),
                Link::walk(key("A", "1"), key("D", "2")),
            ])
            .await
            .unwrap();
        store
    }

    fn names(path: &[Stop]) -> Vec<String> {
        path.iter()
            .map(|s| format!("{}/{}", s.name, s.line))
            .collect()
    }

    #[tokio::test]
    async fn path_follows_train_and_transfer_links() {
        let store = sample_store().await;

        let path = store
            .shortest_path(
                &key("A", "1"),
                &key("D", "2"),
                &[LinkKind::Train, LinkKind::Transfer],
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(names(&path), vec!["A/1", "B/1", "C/1", "C/2", "D/2"]);
    }

    #[tokio::test]
    async fn walking_links_shorten_the_path_when_allowed() {
        let store = sample_store().await;

        let path = store
            .shortest_path(&key("A", "1"), &key("D", "2"), &LinkKind::ALL)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(names(&path), vec!["A/1", "D/2"]);
    }

    #[tokio::test]
    async fn links_are_directed() {
        let store = sample_store().await;

        let path = store
            .shortest_path(&key("D", "2"), &key("A", "1"), &LinkKind::ALL)
            .await
            .unwrap();

        assert!(path.is_none());
    }

    #[tokio::test]
    async fn unknown_station_has_no_path() {
        let store = sample_store().await;

        let path = store
            .shortest_path(&key("Z", "9"), &key("A", "1"), &LinkKind::ALL)
            .await
            .unwrap();

        assert!(path.is_none());
    }

    #[tokio::test]
    async fn path_to_self_is_single_stop() {
        let store = sample_store().await;

        let path = store
            .shortest_path(&key("B", "1"), &key("B", "1"), &[LinkKind::Train])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(names(&path), vec!["B/1"]);
    }

    #[tokio::test]
    async fn nearest_ignores_endpoints() {
        let store = sample_store().await;
        let token = RequestToken::generate();

        // A second endpoint sits right next to the first one
        let dep = Endpoint::departure(token, point(1010.0, 0.0));
        let arr = Endpoint::arrival(token, point(1011.0, 0.0));
        store.upsert_endpoint(&dep).await.unwrap();
        store.upsert_endpoint(&arr).await.unwrap();

        let snap = store.nearest_station(&dep).await.unwrap().unwrap();
        assert_eq!(snap.stop.key(), key("B", "1"));
        assert_eq!(snap.distance, 10.0);
    }

    #[tokio::test]
    async fn nearest_on_empty_store_is_none() {
        let store = InMemoryGraphStore::new();
        let dep = Endpoint::departure(RequestToken::generate(), point(0.0, 0.0));
        store.upsert_endpoint(&dep).await.unwrap();

        assert!(store.nearest_station(&dep).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_location_and_delete_removes() {
        let store = sample_store().await;
        let dep = Endpoint::departure(RequestToken::generate(), point(0.0, 0.0));

        store.upsert_endpoint(&dep).await.unwrap();
        let moved = Endpoint {
            location: point(2000.0, 1000.0),
            ..dep.clone()
        };
        store.upsert_endpoint(&moved).await.unwrap();
        assert_eq!(store.endpoint_keys().await, vec![dep.key()]);

        let snap = store.nearest_station(&dep).await.unwrap().unwrap();
        assert_eq!(snap.stop.key(), key("D", "2"));

        store.delete_endpoint(&dep).await.unwrap();
        assert!(store.endpoint_keys().await.is_empty());

        // Deleting again is a no-op
        store.delete_endpoint(&dep).await.unwrap();
    }

    #[tokio::test]
    async fn distance_between_stations() {
        let store = sample_store().await;

        let d = store.distance(&key("A", "1"), &key("C", "1")).await.unwrap();
        assert_eq!(d, Some(2000.0));

        let transfer = store.distance(&key("C", "1"), &key("C", "2")).await.unwrap();
        assert_eq!(transfer, Some(0.0));

        let unknown = store.distance(&key("A", "1"), &key("Z", "1")).await.unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn duplicate_stations_and_dangling_links_are_skipped() {
        let store = sample_store().await;

        let inserted = store
            .insert_stations(&[station("A", "1", 5.0, 5.0)])
            .await
            .unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(store.station_count().await, 5);

        let inserted = store
            .insert_links(&[Link::walk(key("A", "1"), key("Z", "1"))])
            .await
            .unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(store.link_count().await, 6);
        assert_eq!(store.link_count_of(LinkKind::Transfer).await, 2);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = sample_store().await;
        store.clear().await.unwrap();

        assert_eq!(store.station_count().await, 0);
        assert_eq!(store.link_count().await, 0);
    }
}
