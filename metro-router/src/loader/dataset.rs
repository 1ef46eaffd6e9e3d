//! Station and link tables.
//!
//! The dataset is two CSV tables:
//! - stations: `nom_gare, nom_clean, x, y, Trafic, Ville, ligne`
//! - links: `start, stop, ligne`, one row per pair of adjacent stations
//!   on a line, in travel direction.
//!
//! Each table is read from an HTTP(S) URL or a local path.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Line, Link, Point, Station, StationKey, StationName};

use super::error::LoadError;

/// Published Paris metro station table.
pub const DEFAULT_STATIONS_URL: &str =
    "https://raw.githubusercontent.com/aymericastellanet/Neo4j_Paris_metro/main/stations.csv";

/// Published Paris metro link table.
pub const DEFAULT_LINKS_URL: &str =
    "https://raw.githubusercontent.com/aymericastellanet/Neo4j_Paris_metro/main/liaisons.csv";

/// Timeout for fetching a table over HTTP.
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// A row of the station table.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRow {
    #[serde(rename = "nom_gare")]
    pub display_name: String,
    #[serde(rename = "nom_clean")]
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "Trafic", default, deserialize_with = "csv::invalid_option")]
    pub ridership: Option<u64>,
    #[serde(rename = "Ville", default)]
    pub city: Option<String>,
    #[serde(rename = "ligne")]
    pub line: String,
}

/// A row of the link table.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkRow {
    pub start: String,
    pub stop: String,
    #[serde(rename = "ligne")]
    pub line: String,
}

/// Where to read the two tables from.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    /// URL or path of the station table
    pub stations: String,
    /// URL or path of the link table
    pub links: String,
}

impl DatasetSource {
    pub fn new(stations: impl Into<String>, links: impl Into<String>) -> Self {
        Self {
            stations: stations.into(),
            links: links.into(),
        }
    }

    /// Read and validate both tables.
    pub async fn fetch(&self) -> Result<Dataset, LoadError> {
        let stations = parse_stations(&read_location(&self.stations).await?)?;
        let links = parse_links(&read_location(&self.links).await?)?;
        debug!(
            stations = stations.len(),
            links = links.len(),
            "dataset tables read"
        );
        Dataset::from_rows(stations, links)
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::new(DEFAULT_STATIONS_URL, DEFAULT_LINKS_URL)
    }
}

/// Validated stations and train links.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub stations: Vec<Station>,

    /// Links between adjacent stations of a line.
    pub train_links: Vec<Link>,

    /// Link rows dropped because a station they name is not in the
    /// station table.
    pub skipped_links: usize,
}

impl Dataset {
    /// Validate table rows.
    ///
    /// A station row repeating an earlier (name, line) pair is skipped.
    pub fn from_rows(stations: Vec<StationRow>, links: Vec<LinkRow>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        let mut valid = Vec::with_capacity(stations.len());

        for (idx, row) in stations.into_iter().enumerate() {
            let station = station_from_row(row).map_err(|reason| LoadError::InvalidRow {
                table: "station",
                row: idx + 1,
                reason,
            })?;

            if !seen.insert(station.key.clone()) {
                warn!(key = %station.key, row = idx + 1, "duplicate station, keeping the first");
                continue;
            }
            valid.push(station);
        }

        let mut train_links = Vec::with_capacity(links.len());
        let mut skipped_links = 0;

        for (idx, row) in links.into_iter().enumerate() {
            let link = link_from_row(&row).map_err(|reason| LoadError::InvalidRow {
                table: "link",
                row: idx + 1,
                reason,
            })?;

            if !seen.contains(&link.from) || !seen.contains(&link.to) {
                warn!(from = %link.from, to = %link.to, "link names an unknown station, skipping");
                skipped_links += 1;
                continue;
            }
            train_links.push(link);
        }

        Ok(Self {
            stations: valid,
            train_links,
            skipped_links,
        })
    }
}

fn station_from_row(row: StationRow) -> Result<Station, String> {
    let name = StationName::normalize(&row.name).map_err(|e| e.to_string())?;
    let line = Line::parse(&row.line).map_err(|e| e.to_string())?;
    let location = Point::new(row.x, row.y).map_err(|e| e.to_string())?;

    Ok(Station {
        display_name: row.display_name.trim().to_string(),
        key: StationKey::new(name, line),
        location,
        ridership: row.ridership,
        city: row.city.filter(|c| !c.trim().is_empty()),
    })
}

fn link_from_row(row: &LinkRow) -> Result<Link, String> {
    let line = Line::parse(&row.line).map_err(|e| e.to_string())?;
    let from = StationName::normalize(&row.start).map_err(|e| e.to_string())?;
    let to = StationName::normalize(&row.stop).map_err(|e| e.to_string())?;

    Ok(Link::train(
        StationKey::new(from, line.clone()),
        StationKey::new(to, line.clone()),
        line,
    ))
}

/// Parse the station table.
pub fn parse_stations(text: &str) -> Result<Vec<StationRow>, LoadError> {
    parse_table(text, "station")
}

/// Parse the link table.
pub fn parse_links(text: &str) -> Result<Vec<LinkRow>, LoadError> {
    parse_table(text, "link")
}

fn parse_table<T: serde::de::DeserializeOwned>(
    text: &str,
    table: &'static str,
) -> Result<Vec<T>, LoadError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes())
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| LoadError::Csv { table, source })
}

/// Read a table from an HTTP(S) URL or a local path.
async fn read_location(location: &str) -> Result<String, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        debug!(%location, "fetching table");
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        let response = http.get(location).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LoadError::Fetch {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }
        return Ok(response.text().await?);
    }

    debug!(%location, "reading table from disk");
    tokio::fs::read_to_string(location)
        .await
        .map_err(|source| LoadError::Io {
            location: location.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const STATIONS: &str = "\
nom_gare,nom_clean,x,y,Trafic,Ville,ligne
Nation,NATION,655208.5,6861570.1,9000000,Paris,1
Nation,NATION,655208.5,6861570.1,9000000,Paris,2
Avron,AVRON,654809.9,6861873.4,n/a,,2
Nation,NATION,655208.5,6861570.1,9000000,Paris,1
";

    const LINKS: &str = "\
start,stop,ligne
NATION,AVRON,2
AVRON,NATION,2
NATION,AVRON,1
";

    #[test]
    fn parse_station_table() {
        let rows = parse_stations(STATIONS).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].display_name, "Nation");
        assert_eq!(rows[0].ridership, Some(9_000_000));
        assert_eq!(rows[0].city.as_deref(), Some("Paris"));
        // Unparsable ridership and empty city become None
        assert_eq!(rows[2].ridership, None);
        assert_eq!(rows[2].city, None);
    }

    #[test]
    fn parse_rejects_bad_coordinates() {
        let text = "nom_gare,nom_clean,x,y,Trafic,Ville,ligne\nA,A,east,1,0,Paris,1\n";
        assert!(matches!(
            parse_stations(text),
            Err(LoadError::Csv { table: "station", .. })
        ));
    }

    #[test]
    fn dataset_dedupes_and_skips_unknown_links() {
        let dataset =
            Dataset::from_rows(parse_stations(STATIONS).unwrap(), parse_links(LINKS).unwrap())
                .unwrap();

        assert_eq!(dataset.stations.len(), 3);
        assert_eq!(dataset.train_links.len(), 2);
        // AVRON is not on line 1
        assert_eq!(dataset.skipped_links, 1);
        assert!(
            dataset
                .train_links
                .iter()
                .all(|l| l.line.as_ref().map(Line::as_str) == Some("2"))
        );
    }

    #[test]
    fn blank_station_name_is_invalid() {
        let text = "nom_gare,nom_clean,x,y,Trafic,Ville,ligne\nX,X,0,0,0,Paris,1\n ,  ,1,1,0,Paris,1\n";
        let err = Dataset::from_rows(parse_stations(text).unwrap(), Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidRow {
                table: "station",
                row: 2,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn fetch_from_local_files() {
        let dir = tempdir().unwrap();
        let stations_path = dir.path().join("stations.csv");
        let links_path = dir.path().join("liaisons.csv");
        std::fs::write(&stations_path, STATIONS).unwrap();
        std::fs::write(&links_path, LINKS).unwrap();

        let source = DatasetSource::new(
            stations_path.to_string_lossy(),
            links_path.to_string_lossy(),
        );
        let dataset = source.fetch().await.unwrap();

        assert_eq!(dataset.stations.len(), 3);
        assert_eq!(dataset.train_links.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = DatasetSource::new("/nonexistent/stations.csv", "/nonexistent/liaisons.csv");
        assert!(matches!(source.fetch().await, Err(LoadError::Io { .. })));
    }

    #[test]
    fn default_source_points_at_published_tables() {
        let source = DatasetSource::default();
        assert_eq!(source.stations, DEFAULT_STATIONS_URL);
        assert_eq!(source.links, DEFAULT_LINKS_URL);
    }
}
