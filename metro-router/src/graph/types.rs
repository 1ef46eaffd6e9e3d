//! Neo4j HTTP API wire types.
//!
//! These types match the JSON of the transactional Cypher endpoint
//! (`/db/{database}/tx/commit`). Rows come back as positional arrays in
//! the order of the `RETURN` clause.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body: a batch of statements run in one transaction.
#[derive(Debug, Serialize)]
pub struct TxRequest<'a> {
    pub statements: Vec<Statement<'a>>,
}

/// A single parameterized Cypher statement.
#[derive(Debug, Serialize)]
pub struct Statement<'a> {
    pub statement: &'a str,
    pub parameters: Value,
}

/// Response body of a transaction commit.
#[derive(Debug, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub results: Vec<StatementResult>,
    #[serde(default)]
    pub errors: Vec<TxError>,
}

/// Result of one statement.
#[derive(Debug, Deserialize)]
pub struct StatementResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<RowData>,
}

/// One result row.
#[derive(Debug, Deserialize)]
pub struct RowData {
    pub row: Vec<Value>,
}

/// An error reported by the database for a statement.
#[derive(Debug, Deserialize)]
pub struct TxError {
    pub code: String,
    pub message: String,
}
