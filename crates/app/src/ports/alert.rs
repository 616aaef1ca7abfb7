//! Alert port — modal user notifications.

use std::future::Future;

use geowatch_domain::alert::Alert;
use geowatch_domain::error::GeowatchError;

/// Presents alerts to the user.
pub trait AlertSurface {
    /// Show `alert`. Resolves once the alert has been handed to the surface,
    /// not when the user dismisses it.
    fn present(&self, alert: Alert) -> impl Future<Output = Result<(), GeowatchError>> + Send;
}

impl<T: AlertSurface + Send + Sync> AlertSurface for std::sync::Arc<T> {
    fn present(&self, alert: Alert) -> impl Future<Output = Result<(), GeowatchError>> + Send {
        (**self).present(alert)
    }
}
