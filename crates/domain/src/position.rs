//! Position sample — the device's last known location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// UTC timestamp attached to position fixes and events.
pub type Timestamp = DateTime<Utc>;

/// A single position fix.
///
/// Samples are replaced wholesale on each fix; no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub coordinate: Coordinate,
    pub timestamp: Timestamp,
}

impl PositionSample {
    /// Sample taken now.
    #[must_use]
    pub fn now(coordinate: Coordinate) -> Self {
        Self::at(coordinate, Utc::now())
    }

    #[must_use]
    pub fn at(coordinate: Coordinate, timestamp: Timestamp) -> Self {
        Self {
            coordinate,
            timestamp,
        }
    }
}
