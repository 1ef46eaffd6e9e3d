//! Graph store error types.

/// Errors from a graph store.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Server returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid credentials
    #[error("unauthorized: check NEO4J_USER and NEO4J_PASSWORD")]
    Unauthorized,

    /// The database rejected a statement
    #[error("query failed ({code}): {message}")]
    Query { code: String, message: String },

    /// A returned row does not have the expected shape
    #[error("unexpected row: {0}")]
    UnexpectedRow(String),
}
