//! Map view — the region and markers handed to a map display.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::geofence::GeofenceSet;

/// Span, in degrees, shown around the current position.
pub const DEFAULT_REGION_DELTA: f64 = 0.01;

/// Visible map area: a center plus latitude/longitude spans in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Region centered on `center` with the default spans.
    #[must_use]
    pub fn around(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: DEFAULT_REGION_DELTA,
            longitude_delta: DEFAULT_REGION_DELTA,
        }
    }
}

/// A labelled pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
}

/// Everything a map display needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub region: MapRegion,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// View centered on the device with a "You are here" marker followed by
    /// one marker per geofence center.
    #[must_use]
    pub fn for_position(position: Coordinate, geofences: &GeofenceSet) -> Self {
        let mut markers = Vec::with_capacity(geofences.len() + 1);
        markers.push(Marker {
            coordinate: position,
            title: "You are here".to_string(),
        });
        markers.extend(geofences.iter().map(|g| Marker {
            coordinate: g.center,
            title: g.label(),
        }));
        Self {
            region: MapRegion::around(position),
            markers,
        }
    }
}
