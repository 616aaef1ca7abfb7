//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GeowatchError`] via `#[from]` (no `String` variants).

use std::time::Duration;

use crate::id::GeofenceId;

/// Top-level error for every port and use-case in geowatch.
#[derive(Debug, thiserror::Error)]
pub enum GeowatchError {
    /// The user declined foreground location access.
    #[error("location permission denied")]
    PermissionDenied,

    /// No position fix could be obtained.
    #[error("location unavailable")]
    LocationUnavailable(#[from] LocationError),

    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An adapter failed while presenting something to the user
    /// (alert, map) or publishing an event.
    #[error("adapter error")]
    Adapter(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a position fix could not be obtained.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LocationError {
    /// The provider has no fix to give (hardware off, indoors, …).
    #[error("no position fix available")]
    NoFix,

    /// The fix did not arrive before the configured deadline.
    #[error("position fix timed out after {after:?}")]
    Timeout {
        /// Deadline that elapsed.
        after: Duration,
    },

    /// The provider will never produce another fix.
    #[error("position stream ended")]
    StreamEnded,
}

/// Domain validation failures.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// A coordinate component is NaN or infinite.
    #[error("coordinate is not finite")]
    NonFiniteCoordinate,

    /// Latitude outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// Radius is zero, negative, or not finite.
    #[error("radius {0} must be a positive number of meters")]
    InvalidRadius(f64),

    /// Continuous tracking was configured with a zero sampling interval.
    #[error("tracking interval must be non-zero")]
    InvalidInterval,

    /// A geofence was built without a center.
    #[error("geofence center is required")]
    MissingCenter,

    /// Two geofences share the same identifier.
    #[error("duplicate geofence id {0}")]
    DuplicateGeofenceId(GeofenceId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_with_from() {
        let err: GeowatchError = ValidationError::InvalidRadius(0.0).into();
        assert!(matches!(
            err,
            GeowatchError::Validation(ValidationError::InvalidRadius(_))
        ));
    }

    #[test]
    fn should_convert_location_error_with_from() {
        let err: GeowatchError = LocationError::NoFix.into();
        assert!(matches!(
            err,
            GeowatchError::LocationUnavailable(LocationError::NoFix)
        ));
    }

    #[test]
    fn should_display_timeout_with_seconds() {
        let err = LocationError::Timeout {
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "position fix timed out after 30s");
    }

    #[test]
    fn should_keep_sub_second_timeout_precision() {
        let err = LocationError::Timeout {
            after: Duration::from_millis(5),
        };
        assert_eq!(err.to_string(), "position fix timed out after 5ms");
    }

    #[test]
    fn should_display_duplicate_id() {
        let err = ValidationError::DuplicateGeofenceId(GeofenceId::new(7));
        assert_eq!(err.to_string(), "duplicate geofence id 7");
    }

    #[test]
    fn should_expose_source_of_adapter_error() {
        use std::error::Error;

        let io = std::io::Error::other("dialog closed");
        let err = GeowatchError::Adapter(Box::new(io));
        assert!(err.source().is_some());
    }
}
