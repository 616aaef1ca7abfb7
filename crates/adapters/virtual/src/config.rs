//! Simulation configuration.

use std::time::Duration;

use geowatch_domain::coordinate::Coordinate;
use serde::Deserialize;

/// Configuration for the simulated location provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Answer to the foreground permission prompt.
    pub permission_granted: bool,
    /// Fixes returned in order; once exhausted the provider reports the
    /// end of the stream.
    pub positions: Vec<Coordinate>,
    /// Artificial latency before each fix, in milliseconds.
    pub fix_delay_ms: u64,
}

impl SimulationConfig {
    #[must_use]
    pub fn fix_delay(&self) -> Duration {
        Duration::from_millis(self.fix_delay_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            permission_granted: true,
            positions: vec![Coordinate::new(37.78825, -122.4324)],
            fix_delay_ms: 0,
        }
    }
}
