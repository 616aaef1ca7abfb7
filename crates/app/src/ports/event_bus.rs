//! Event bus port — publish/subscribe for geofence events.

use std::future::Future;

use geowatch_domain::error::GeowatchError;
use geowatch_domain::event::GeofenceEvent;

/// Publishes geofence events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(
        &self,
        event: GeofenceEvent,
    ) -> impl Future<Output = Result<(), GeowatchError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: GeofenceEvent,
    ) -> impl Future<Output = Result<(), GeowatchError>> + Send {
        (**self).publish(event)
    }
}
