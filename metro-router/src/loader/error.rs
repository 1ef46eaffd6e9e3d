//! Dataset loader error types.

use crate::graph::GraphError;

/// Errors that can occur while reading or loading the dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status for a table
    #[error("failed to fetch {location}: status {status}")]
    Fetch { location: String, status: u16 },

    /// Local file could not be read
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// Table is not valid CSV for its schema
    #[error("invalid CSV in {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A row holds values the domain rejects
    #[error("invalid row {row} in {table} table: {reason}")]
    InvalidRow {
        table: &'static str,
        row: usize,
        reason: String,
    },

    /// Writing to the graph store failed
    #[error("graph store error: {0}")]
    Store(#[from] GraphError),
}
