//! Cypher statements issued by the Neo4j store.
//!
//! Every value that comes from the caller is passed as a parameter.
//! Relationship type names are the only interpolated text and they come
//! from the closed [`LinkKind`] enum.
//!
//! Station nodes carry `display_name`, `name` (normalized), `line`,
//! `location` (a cartesian point), and optionally `ridership` and `city`.
//! Temporary endpoints are `:Station:Endpoint` nodes whose `name` is the
//! endpoint key and which have no `line`.

use crate::domain::LinkKind;

pub const CLEAR: &str = "MATCH (n) DETACH DELETE n";

pub const CREATE_STATION_INDEX: &str =
    "CREATE INDEX station_name_line IF NOT EXISTS FOR (s:Station) ON (s.name, s.line)";

pub const INSERT_STATIONS: &str = "\
UNWIND $rows AS row
CREATE (s:Station {
  display_name: row.display_name,
  name: row.name,
  line: row.line,
  location: point({x: row.x, y: row.y}),
  ridership: row.ridership,
  city: row.city
})
RETURN count(s)";

pub const UPSERT_ENDPOINT: &str = "\
MERGE (e:Station:Endpoint {name: $name})
SET e.display_name = $display_name,
    e.location = point({x: $x, y: $y})";

pub const NEAREST_STATION: &str = "\
MATCH (e:Endpoint {name: $name})
MATCH (s:Station)
  WHERE NOT s:Endpoint
RETURN s.name, s.display_name, s.line, point.distance(e.location, s.location) AS distance
ORDER BY distance
LIMIT 1";

pub const STATION_STOP: &str = "\
MATCH (s:Station {name: $name, line: $line})
  WHERE NOT s:Endpoint
RETURN s.name, s.display_name, s.line
LIMIT 1";

pub const DISTANCE: &str = "\
MATCH (a:Station {name: $a_name, line: $a_line})
MATCH (b:Station {name: $b_name, line: $b_line})
  WHERE NOT a:Endpoint AND NOT b:Endpoint
RETURN point.distance(a.location, b.location)
LIMIT 1";

pub const DELETE_ENDPOINT: &str = "\
MATCH (e:Endpoint {name: $name})
DETACH DELETE e";

/// Shortest path statement restricted to `kinds`.
///
/// Uses Cypher's unweighted `shortestPath`, so the path minimizes the
/// number of hops. `kinds` must not be empty.
pub fn shortest_path(kinds: &[LinkKind]) -> String {
    format!(
        "\
MATCH (start:Station {{name: $from_name, line: $from_line}})
MATCH (end:Station {{name: $to_name, line: $to_line}})
MATCH p = shortestPath((start)-[:{types}*]->(end))
UNWIND nodes(p) AS s
RETURN s.name, s.display_name, s.line",
        types = relationship_types(kinds)
    )
}

/// Bulk insert statement for links of one kind.
pub fn insert_links(kind: LinkKind) -> String {
    format!(
        "\
UNWIND $rows AS row
MATCH (a:Station {{name: row.from_name, line: row.from_line}})
MATCH (b:Station {{name: row.to_name, line: row.to_line}})
CREATE (a)-[r:{rel}]->(b)
SET r.line = row.line
RETURN count(r)",
        rel = kind.relationship_type()
    )
}

fn relationship_types(kinds: &[LinkKind]) -> String {
    kinds
        .iter()
        .map(LinkKind::relationship_type)
        .collect::<Vec<_>>()
        .join("|")
}
