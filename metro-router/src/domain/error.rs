//! Domain error types.
//!
//! These errors represent validation failures on values entering the
//! domain layer. They are distinct from graph store and IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinate component is NaN or infinite
    #[error("coordinates must be finite, got ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    /// Station name is empty after trimming
    #[error("station name must not be empty")]
    EmptyName,

    /// Line identifier is empty after trimming
    #[error("line identifier must not be empty")]
    EmptyLine,
}
