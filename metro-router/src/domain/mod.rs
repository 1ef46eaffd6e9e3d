//! Domain types for the metro route planner.
//!
//! This module contains the validated model of the transit network:
//! stations, the links between them, the temporary endpoints of a route
//! computation and the itinerary it produces. Types enforce their
//! invariants at construction time.

mod endpoint;
mod error;
mod itinerary;
mod link;
mod point;
mod station;

pub use endpoint::{Endpoint, EndpointRole, RequestToken};
pub use error::DomainError;
pub use itinerary::{Itinerary, ItineraryStop, Snap, TimeEstimate};
pub use link::{Link, LinkKind};
pub use point::Point;
pub use station::{Line, Station, StationKey, StationName, Stop};
