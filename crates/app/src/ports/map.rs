//! Map display port — renders the current region and markers.

use std::future::Future;

use geowatch_domain::error::GeowatchError;
use geowatch_domain::map::{MapRegion, MapView};

/// A map widget the tracker draws on.
pub trait MapDisplay {
    /// Shown until the first position fix arrives.
    fn show_loading(&self) -> impl Future<Output = Result<(), GeowatchError>> + Send;

    /// Render `view`.
    ///
    /// Returns the region the display settled on once rendering completed,
    /// which may differ from the requested one (zoom clamping, user pan).
    fn show(&self, view: &MapView) -> impl Future<Output = Result<MapRegion, GeowatchError>> + Send;
}

impl<T: MapDisplay + Send + Sync> MapDisplay for std::sync::Arc<T> {
    fn show_loading(&self) -> impl Future<Output = Result<(), GeowatchError>> + Send {
        (**self).show_loading()
    }

    fn show(&self, view: &MapView) -> impl Future<Output = Result<MapRegion, GeowatchError>> + Send {
        (**self).show(view)
    }
}
