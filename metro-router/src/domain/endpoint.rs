//! Temporary endpoint nodes for a single route computation.
//!
//! A query point is materialized in the graph store as a Station-like node
//! for the duration of one computation and deleted at its end. Every
//! computation gets its own [`RequestToken`], embedded in the sentinel key,
//! so two computations against the same store never touch each other's
//! endpoints.

use std::fmt;

use uuid::Uuid;

use super::point::Point;

/// Per-computation token embedded in endpoint keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(Uuid);

impl RequestToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Which end of the route an endpoint stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointRole {
    Departure,
    Arrival,
}

impl EndpointRole {
    /// Sentinel prefix of the endpoint key.
    pub fn sentinel(&self) -> &'static str {
        match self {
            EndpointRole::Departure => "DEPARTURE",
            EndpointRole::Arrival => "ARRIVAL",
        }
    }
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::Departure => f.write_str("departure"),
            EndpointRole::Arrival => f.write_str("arrival"),
        }
    }
}

/// A query point stored as a temporary node.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub role: EndpointRole,
    pub token: RequestToken,
    pub location: Point,
}

impl Endpoint {
    pub fn departure(token: RequestToken, location: Point) -> Self {
        Self {
            role: EndpointRole::Departure,
            token,
            location,
        }
    }

    pub fn arrival(token: RequestToken, location: Point) -> Self {
        Self {
            role: EndpointRole::Arrival,
            token,
            location,
        }
    }

    /// Unique key of the temporary node, e.g. `DEPARTURE-3f2a...`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.role.sentinel(), self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_embed_role_and_token() {
        let token = RequestToken::generate();
        let origin = Point::new(1.0, 2.0).unwrap();

        let dep = Endpoint::departure(token, origin);
        let arr = Endpoint::arrival(token, origin);

        assert!(dep.key().starts_with("DEPARTURE-"));
        assert!(arr.key().starts_with("ARRIVAL-"));
        assert!(dep.key().ends_with(&token.to_string()));
        assert_ne!(dep.key(), arr.key());
    }

    #[test]
    fn tokens_differ_between_computations() {
        let origin = Point::new(0.0, 0.0).unwrap();
        let a = Endpoint::departure(RequestToken::generate(), origin);
        let b = Endpoint::departure(RequestToken::generate(), origin);
        assert_ne!(a.key(), b.key());
    }
}
