//! Metro route planner.
//!
//! Answers: "how do I get from this point to that one by metro?" Both
//! points are snapped to their nearest station, the network graph is
//! searched for the shortest path between the two, and the result is
//! summarized into an itinerary with a travel time estimate.

pub mod domain;
pub mod graph;
pub mod loader;
pub mod planner;
pub mod report;
