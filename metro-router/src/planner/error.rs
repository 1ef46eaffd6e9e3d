//! Route planning errors and stages.

use std::fmt;

use crate::domain::DomainError;
use crate::graph::GraphError;

/// Stages of a route computation, in execution order.
///
/// `CleanupEndpoints` runs after every other stage, whether or not they
/// succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStage {
    CreateEndpoints,
    SnapEndpoints,
    FetchPath,
    Summarize,
    ComputeDistances,
    EstimateTime,
    CleanupEndpoints,
    Done,
}

impl fmt::Display for RouteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteStage::CreateEndpoints => "create endpoints",
            RouteStage::SnapEndpoints => "snap endpoints",
            RouteStage::FetchPath => "fetch path",
            RouteStage::Summarize => "summarize",
            RouteStage::ComputeDistances => "compute distances",
            RouteStage::EstimateTime => "estimate time",
            RouteStage::CleanupEndpoints => "cleanup endpoints",
            RouteStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Error from a route computation.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Coordinates are not usable
    #[error("malformed input: {0}")]
    MalformedInput(#[from] DomainError),

    /// No station, path or distance where one was required
    #[error("not found: {0}")]
    NotFound(String),

    /// The graph store failed
    #[error("graph store error during {stage}: {source}")]
    Store {
        stage: RouteStage,
        #[source]
        source: GraphError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlanError::NotFound("no station in the graph".into());
        assert_eq!(err.to_string(), "not found: no station in the graph");

        let err = PlanError::Store {
            stage: RouteStage::FetchPath,
            source: GraphError::Unauthorized,
        };
        assert_eq!(
            err.to_string(),
            "graph store error during fetch path: unauthorized: check NEO4J_USER and NEO4J_PASSWORD"
        );

        let err = PlanError::from(DomainError::EmptyName);
        assert!(err.to_string().starts_with("malformed input:"));
    }
}
