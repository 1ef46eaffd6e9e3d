//! Route planner configuration.

use crate::domain::LinkKind;

/// Errors from validating a [`PlannerConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A speed is zero, negative or not finite
    #[error("{name} must be a positive number of meters per hour, got {value}")]
    InvalidSpeed { name: &'static str, value: f64 },

    /// Transfer delay is negative or not finite
    #[error("transfer delay must be a non-negative number of minutes, got {0}")]
    InvalidTransferDelay(f64),

    /// No link kind to route over
    #[error("at least one link kind is required for routing")]
    NoLinkKinds,
}

/// Parameters of a route computation.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Average transit speed including stops (meters per hour).
    pub transit_speed_m_per_h: f64,

    /// Walking speed (meters per hour).
    pub walking_speed_m_per_h: f64,

    /// Fixed time added for each line change (minutes).
    pub transfer_delay_mins: f64,

    /// Link kinds the shortest path may follow.
    pub link_kinds: Vec<LinkKind>,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        transit_speed_m_per_h: f64,
        walking_speed_m_per_h: f64,
        transfer_delay_mins: f64,
        link_kinds: Vec<LinkKind>,
    ) -> Self {
        Self {
            transit_speed_m_per_h,
            walking_speed_m_per_h,
            transfer_delay_mins,
            link_kinds,
        }
    }

    /// Also allow walking links between stations in the path.
    pub fn with_walking_links(mut self) -> Self {
        if !self.link_kinds.contains(&LinkKind::Walk) {
            self.link_kinds.push(LinkKind::Walk);
        }
        self
    }

    /// Check that the configuration can produce meaningful estimates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("transit speed", self.transit_speed_m_per_h),
            ("walking speed", self.walking_speed_m_per_h),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
        }

        if !self.transfer_delay_mins.is_finite() || self.transfer_delay_mins < 0.0 {
            return Err(ConfigError::InvalidTransferDelay(self.transfer_delay_mins));
        }

        if self.link_kinds.is_empty() {
            return Err(ConfigError::NoLinkKinds);
        }

        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transit_speed_m_per_h: 25_000.0, // 25 km/h, stops included
            walking_speed_m_per_h: 4_500.0,
            transfer_delay_mins: 4.0,
            link_kinds: vec![LinkKind::Train, LinkKind::Transfer],
        }
    }
}
