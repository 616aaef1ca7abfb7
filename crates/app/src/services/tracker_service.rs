//! Tracker service — the location screen's flow as a use-case.
//!
//! 1. ask for foreground permission (denial alerts and ends the session)
//! 2. take a position fix
//! 3. publish it to [`PositionState`], draw the map, evaluate geofences,
//!    publish events and present alerts
//! 4. in continuous mode, repeat step 2–3 on every tick

use std::sync::Arc;
use std::time::Duration;

use geowatch_domain::alert::Alert;
use geowatch_domain::error::{GeowatchError, LocationError, ValidationError};
use geowatch_domain::map::{MapRegion, MapView};
use geowatch_domain::position::PositionSample;

use crate::geofence_evaluator::{Evaluation, GeofenceEvaluator};
use crate::ports::{AlertSurface, EventPublisher, LocationProvider, MapDisplay};
use crate::position_state::PositionState;

/// How often the tracker samples the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    /// Take one fix after permission is granted, then stop.
    #[default]
    SingleFix,
    /// Take a fix every `interval` until the provider runs dry.
    Continuous { interval: Duration },
}

/// Knobs for [`LocationTracker`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerOptions {
    pub mode: TrackingMode,
    /// Give up on a fix after this long. `None` waits forever.
    pub fix_timeout: Option<Duration>,
}

impl TrackerOptions {
    /// Check the options before a session starts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidInterval`] when continuous mode is
    /// configured with a zero interval.
    pub fn validate(&self) -> Result<(), GeowatchError> {
        if matches!(self.mode, TrackingMode::Continuous { interval } if interval.is_zero()) {
            return Err(ValidationError::InvalidInterval.into());
        }
        Ok(())
    }
}

/// Drives a [`LocationProvider`] through the geofence pipeline.
pub struct LocationTracker<L, M, A, P> {
    provider: L,
    map: M,
    alerts: A,
    publisher: P,
    evaluator: GeofenceEvaluator,
    state: Arc<PositionState>,
    options: TrackerOptions,
}

impl<L, M, A, P> LocationTracker<L, M, A, P>
where
    L: LocationProvider,
    M: MapDisplay,
    A: AlertSurface,
    P: EventPublisher,
{
    /// Create a new tracker.
    pub fn new(
        provider: L,
        map: M,
        alerts: A,
        publisher: P,
        evaluator: GeofenceEvaluator,
        options: TrackerOptions,
    ) -> Self {
        Self {
            provider,
            map,
            alerts,
            publisher,
            evaluator,
            state: Arc::new(PositionState::new()),
            options,
        }
    }

    /// Shared handle to the current position, for observers.
    #[must_use]
    pub fn position_state(&self) -> Arc<PositionState> {
        Arc::clone(&self.state)
    }

    #[must_use]
    pub fn evaluator(&self) -> &GeofenceEvaluator {
        &self.evaluator
    }

    /// Run the tracking session to completion.
    ///
    /// # Errors
    ///
    /// Returns [`GeowatchError::Validation`] for a zero continuous interval,
    /// [`GeowatchError::PermissionDenied`] when the user declines,
    /// [`GeowatchError::LocationUnavailable`] when a single fix fails, or any
    /// error raised by the map display or alert surface.
    pub async fn run(&mut self) -> Result<(), GeowatchError> {
        self.options.validate()?;
        self.ensure_permission().await?;
        self.map.show_loading().await?;

        match self.options.mode {
            TrackingMode::SingleFix => {
                let sample = self.acquire_fix().await.inspect_err(|err| {
                    tracing::warn!(error = %err, "position fix failed, location stays unknown");
                })?;
                self.handle_fix(sample).await?;
                Ok(())
            }
            TrackingMode::Continuous { interval } => self.track(interval).await,
        }
    }

    async fn ensure_permission(&self) -> Result<(), GeowatchError> {
        let status = self.provider.request_foreground_permission().await?;
        if status.is_granted() {
            tracing::info!("foreground location permission granted");
            return Ok(());
        }
        tracing::warn!("foreground location permission denied");
        self.alerts.present(Alert::permission_denied()).await?;
        Err(GeowatchError::PermissionDenied)
    }

    async fn track(&mut self, interval: Duration) -> Result<(), GeowatchError> {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.acquire_fix().await {
                Ok(sample) => {
                    self.handle_fix(sample).await?;
                }
                Err(GeowatchError::LocationUnavailable(LocationError::StreamEnded)) => {
                    tracing::info!("position stream ended, tracking stopped");
                    return Ok(());
                }
                Err(GeowatchError::LocationUnavailable(err)) => {
                    tracing::warn!(error = %err, "position fix failed, waiting for next tick");
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn acquire_fix(&self) -> Result<PositionSample, GeowatchError> {
        let Some(limit) = self.options.fix_timeout else {
            return self.provider.current_position().await;
        };
        tokio::time::timeout(limit, self.provider.current_position())
            .await
            .map_err(|_| LocationError::Timeout { after: limit })?
    }

    /// Process one position fix: update state, redraw, evaluate, notify.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the map display or alert surface.
    /// Event publishing failures are logged and swallowed.
    pub async fn handle_fix(&mut self, sample: PositionSample) -> Result<Evaluation, GeowatchError> {
        tracing::info!(position = %sample.coordinate, "position fix received");
        self.state.update(sample);

        let view = MapView::for_position(sample.coordinate, self.evaluator.geofences());
        let settled = self.map.show(&view).await?;
        self.on_region_changed(&settled);

        let evaluation = self.evaluator.evaluate(&sample.coordinate);
        for event in &evaluation.events {
            if let Err(err) = self.publisher.publish(event.clone()).await {
                tracing::warn!(error = %err, event_type = %event.event_type, "failed to publish event");
            }
        }
        for alert in &evaluation.alerts {
            tracing::info!(title = %alert.title, "presenting alert");
            self.alerts.present(alert.clone()).await?;
        }
        Ok(evaluation)
    }

    /// Diagnostic hook for region-change notifications from the map display.
    pub fn on_region_changed(&self, region: &MapRegion) {
        tracing::debug!(
            center = %region.center,
            latitude_delta = region.latitude_delta,
            longitude_delta = region.longitude_delta,
            "region changed"
        );
    }
}
