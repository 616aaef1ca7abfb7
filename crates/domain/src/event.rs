//! Event — an immutable record of a geofence evaluation outcome.
//!
//! Events are published on the event bus after every evaluation that found
//! the device inside a zone, or that saw it leave one.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::id::{EventId, GeofenceId};
use crate::position::Timestamp;
use crate::presence::Transition;

/// The kind of event that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    GeofenceEntered,
    GeofenceInside,
    GeofenceExited,
}

impl From<Transition> for EventType {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Entered => Self::GeofenceEntered,
            Transition::StillInside => Self::GeofenceInside,
            Transition::Exited => Self::GeofenceExited,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GeofenceEntered => f.write_str("geofence_entered"),
            Self::GeofenceInside => f.write_str("geofence_inside"),
            Self::GeofenceExited => f.write_str("geofence_exited"),
        }
    }
}

/// Something that happened to the device relative to one geofence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceEvent {
    pub id: EventId,
    pub event_type: EventType,
    pub geofence_id: GeofenceId,
    pub position: Coordinate,
    /// Distance from the geofence center at evaluation time, in meters.
    pub distance_meters: f64,
    pub timestamp: Timestamp,
}

impl GeofenceEvent {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(
        event_type: EventType,
        geofence_id: GeofenceId,
        position: Coordinate,
        distance_meters: f64,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            geofence_id,
            position,
            distance_meters,
            timestamp: Utc::now(),
        }
    }
}
