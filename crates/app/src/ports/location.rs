//! Location port — foreground permission and position fixes.
//!
//! A provider bridges the platform's location service (GPS, network, a
//! simulator, …) into geowatch.

use std::future::Future;

use geowatch_domain::error::GeowatchError;
use geowatch_domain::position::PositionSample;

/// Outcome of a foreground location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Source of position fixes.
pub trait LocationProvider {
    /// Ask the user for foreground location access.
    ///
    /// Suspends until the user answers the prompt.
    fn request_foreground_permission(
        &self,
    ) -> impl Future<Output = Result<PermissionStatus, GeowatchError>> + Send;

    /// Obtain a single position fix.
    ///
    /// Fails with [`GeowatchError::LocationUnavailable`] when no fix can be
    /// produced; [`LocationError::StreamEnded`](geowatch_domain::error::LocationError::StreamEnded)
    /// signals that no further fix will ever arrive.
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<PositionSample, GeowatchError>> + Send;
}

impl<T: LocationProvider + Send + Sync> LocationProvider for std::sync::Arc<T> {
    fn request_foreground_permission(
        &self,
    ) -> impl Future<Output = Result<PermissionStatus, GeowatchError>> + Send {
        (**self).request_foreground_permission()
    }

    fn current_position(
        &self,
    ) -> impl Future<Output = Result<PositionSample, GeowatchError>> + Send {
        (**self).current_position()
    }
}
