//! Geofence — a circular zone around a center coordinate, and the ordered set of them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{GeowatchError, ValidationError};
use crate::id::GeofenceId;

/// A circular zone used to trigger location-based alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub id: GeofenceId,
    pub name: Option<String>,
    pub center: Coordinate,
    pub radius_meters: f64,
}

impl Geofence {
    /// Create a builder for constructing a [`Geofence`].
    #[must_use]
    pub fn builder() -> GeofenceBuilder {
        GeofenceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeowatchError::Validation`] when the center is not a valid
    /// coordinate or the radius is not a positive finite number.
    pub fn validate(&self) -> Result<(), GeowatchError> {
        self.center.validate()?;
        if !self.radius_meters.is_finite() || self.radius_meters <= 0.0 {
            return Err(ValidationError::InvalidRadius(self.radius_meters).into());
        }
        Ok(())
    }

    /// Distance from the center to `position`, in meters.
    #[must_use]
    pub fn distance_from_center(&self, position: &Coordinate) -> f64 {
        self.center.distance_to(position)
    }

    /// Whether `position` lies strictly inside the zone.
    ///
    /// A point exactly `radius_meters` away is outside.
    #[must_use]
    pub fn contains(&self, position: &Coordinate) -> bool {
        self.distance_from_center(position) < self.radius_meters
    }

    /// Label shown on the map marker for this zone.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Geofence {}", self.id),
        }
    }
}

/// Step-by-step builder for [`Geofence`].
#[derive(Debug, Default)]
pub struct GeofenceBuilder {
    id: Option<GeofenceId>,
    name: Option<String>,
    center: Option<Coordinate>,
    radius_meters: Option<f64>,
}

impl GeofenceBuilder {
    #[must_use]
    pub fn id(mut self, id: GeofenceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn center(mut self, center: Coordinate) -> Self {
        self.center = Some(center);
        self
    }

    #[must_use]
    pub fn radius_meters(mut self, radius: f64) -> Self {
        self.radius_meters = Some(radius);
        self
    }

    /// Consume the builder, validate, and return a [`Geofence`].
    ///
    /// The id defaults to `0` when not set.
    ///
    /// # Errors
    ///
    /// Returns [`GeowatchError::Validation`] if the center is missing or
    /// invalid, or the radius is missing or not strictly positive.
    pub fn build(self) -> Result<Geofence, GeowatchError> {
        let center = self.center.ok_or(ValidationError::MissingCenter)?;
        let geofence = Geofence {
            id: self.id.unwrap_or(GeofenceId::new(0)),
            name: self.name,
            center,
            radius_meters: self.radius_meters.unwrap_or(0.0),
        };
        geofence.validate()?;
        Ok(geofence)
    }
}

/// The static, ordered collection of geofences evaluated on every update.
///
/// Iteration order is insertion order; ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeofenceSet {
    geofences: Vec<Geofence>,
}

impl GeofenceSet {
    /// Build a set, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateGeofenceId`] for the first id seen twice.
    pub fn new(geofences: Vec<Geofence>) -> Result<Self, GeowatchError> {
        let mut seen = HashSet::with_capacity(geofences.len());
        for geofence in &geofences {
            if !seen.insert(geofence.id) {
                return Err(ValidationError::DuplicateGeofenceId(geofence.id).into());
            }
        }
        Ok(Self { geofences })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geofences.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.geofences.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geofence> {
        self.geofences.iter()
    }

    #[must_use]
    pub fn get(&self, id: GeofenceId) -> Option<&Geofence> {
        self.geofences.iter().find(|g| g.id == id)
    }

    /// Whether at least one geofence contains `position`.
    ///
    /// Stops at the first match. Always `false` for an empty set.
    #[must_use]
    pub fn contains_any(&self, position: &Coordinate) -> bool {
        self.geofences.iter().any(|g| g.contains(position))
    }

    /// Ids of every geofence containing `position`, in set order.
    #[must_use]
    pub fn containing(&self, position: &Coordinate) -> Vec<GeofenceId> {
        self.geofences
            .iter()
            .filter(|g| g.contains(position))
            .map(|g| g.id)
            .collect()
    }
}

impl<'a> IntoIterator for &'a GeofenceSet {
    type Item = &'a Geofence;
    type IntoIter = std::slice::Iter<'a, Geofence>;

    fn into_iter(self) -> Self::IntoIter {
        self.geofences.iter()
    }
}
