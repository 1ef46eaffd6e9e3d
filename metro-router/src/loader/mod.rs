//! Network dataset loading.
//!
//! Reads the station and link tables, derives transfer and walking links,
//! and writes the whole network into a graph store.

mod dataset;
mod derive;
mod error;
mod load;

pub use dataset::{
    DEFAULT_LINKS_URL, DEFAULT_STATIONS_URL, Dataset, DatasetSource, LinkRow, StationRow,
    parse_links, parse_stations,
};
pub use derive::{DEFAULT_WALK_THRESHOLD_M, transfer_links, walking_links};
pub use error::LoadError;
pub use load::{LoadSummary, LoaderConfig, load_dataset};
