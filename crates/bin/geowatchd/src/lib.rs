//! # geowatchd — geowatch daemon
//!
//! Composition root that wires the adapters together and runs a tracking
//! session.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the adapters (virtual location provider, log surfaces)
//! - Construct the evaluator and tracker, injecting adapters via port traits
//! - Log geofence events (as JSON) and position fixes
//! - Run until the session ends or Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;

use std::sync::Arc;

use geowatch_adapter_virtual::{LogAlertSurface, LogMapDisplay, SimulatedLocationProvider};
use geowatch_app::event_bus::InProcessEventBus;
use geowatch_app::geofence_evaluator::GeofenceEvaluator;
use geowatch_app::position_state::PositionState;
use geowatch_app::services::tracker_service::LocationTracker;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

use crate::config::{Config, ConfigError};

/// Tracker wired to the virtual adapters.
pub type VirtualTracker = LocationTracker<
    Arc<SimulatedLocationProvider>,
    LogMapDisplay,
    Arc<LogAlertSurface>,
    Arc<InProcessEventBus>,
>;

/// Everything `main` needs after wiring.
pub struct Daemon {
    pub tracker: VirtualTracker,
    pub provider: Arc<SimulatedLocationProvider>,
    pub alerts: Arc<LogAlertSurface>,
    pub events: Arc<InProcessEventBus>,
}

/// Build the full object graph from `config`.
///
/// # Errors
///
/// Returns [`ConfigError::Geofence`] when the configured geofences are invalid.
pub fn build(config: &Config) -> Result<Daemon, ConfigError> {
    let geofences = config.geofence_set()?;
    tracing::info!(count = geofences.len(), "geofences loaded");

    let provider = Arc::new(SimulatedLocationProvider::new(&config.simulation));
    let alerts = Arc::new(LogAlertSurface::default());
    let events = Arc::new(InProcessEventBus::new(256));

    let evaluator = GeofenceEvaluator::new(geofences, config.alert_policy());
    let tracker = LocationTracker::new(
        Arc::clone(&provider),
        LogMapDisplay,
        Arc::clone(&alerts),
        Arc::clone(&events),
        evaluator,
        config.tracker_options(),
    );

    Ok(Daemon {
        tracker,
        provider,
        alerts,
        events,
    })
}

/// Log every event published on `bus` as JSON.
///
/// The task ends once every sender of the bus is dropped and the buffered
/// events are drained. It yields the number of events logged.
#[must_use]
pub fn spawn_event_logger(bus: &InProcessEventBus) -> JoinHandle<usize> {
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        let mut logged = 0;
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        tracing::info!(event = %json, "geofence event");
                        logged += 1;
                    }
                    Err(err) => tracing::warn!(error = %err, "failed to encode event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event logger lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
        logged
    })
}

/// Log position fixes stored in `state` from now on.
///
/// Fixes that arrive faster than the task runs are coalesced to the latest.
/// The task ends when the state is dropped and yields the number of fixes
/// logged.
#[must_use]
pub fn spawn_position_logger(state: &PositionState) -> JoinHandle<usize> {
    let mut changes = Box::pin(state.changes());
    tokio::spawn(async move {
        let mut logged = 0;
        while let Some(sample) = changes.next().await {
            tracing::info!(
                latitude = sample.coordinate.latitude,
                longitude = sample.coordinate.longitude,
                at = %sample.timestamp,
                "position fix"
            );
            logged += 1;
        }
        logged
    })
}
