//! Tracing-backed map display and alert surface.
//!
//! Stand-ins for the platform map widget and modal dialog: everything they
//! would show is written to the log instead.

use std::future::Future;
use std::sync::Mutex;

use geowatch_app::ports::{AlertSurface, MapDisplay};
use geowatch_domain::alert::Alert;
use geowatch_domain::error::GeowatchError;
use geowatch_domain::map::{MapRegion, MapView};

/// Map display that logs what it would render.
#[derive(Debug, Default)]
pub struct LogMapDisplay;

impl MapDisplay for LogMapDisplay {
    fn show_loading(&self) -> impl Future<Output = Result<(), GeowatchError>> + Send {
        tracing::info!("Loading location...");
        async { Ok(()) }
    }

    fn show(&self, view: &MapView) -> impl Future<Output = Result<MapRegion, GeowatchError>> + Send {
        tracing::info!(
            center = %view.region.center,
            latitude_delta = view.region.latitude_delta,
            longitude_delta = view.region.longitude_delta,
            "map region shown"
        );
        for marker in &view.markers {
            tracing::info!(title = %marker.title, position = %marker.coordinate, "marker");
        }
        let region = view.region;
        async move { Ok(region) }
    }
}

/// Alert surface that logs each alert and remembers it.
#[derive(Debug, Default)]
pub struct LogAlertSurface {
    history: Mutex<Vec<Alert>>,
}

impl LogAlertSurface {
    /// Every alert presented so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Alert> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl AlertSurface for LogAlertSurface {
    fn present(&self, alert: Alert) -> impl Future<Output = Result<(), GeowatchError>> + Send {
        tracing::warn!(title = %alert.title, message = %alert.message, "ALERT");
        if let Ok(mut history) = self.history.lock() {
            history.push(alert);
        }
        async { Ok(()) }
    }
}
