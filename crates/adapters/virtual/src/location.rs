//! Scripted location provider.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use geowatch_app::ports::{LocationProvider, PermissionStatus};
use geowatch_domain::coordinate::Coordinate;
use geowatch_domain::error::{GeowatchError, LocationError};
use geowatch_domain::position::PositionSample;

use crate::config::SimulationConfig;

/// Location provider that replays a fixed route.
///
/// Each call to `current_position` pops the next coordinate. When the route
/// is exhausted it fails with [`LocationError::StreamEnded`].
pub struct SimulatedLocationProvider {
    permission: PermissionStatus,
    route: Mutex<VecDeque<Coordinate>>,
    fix_delay: Duration,
}

impl SimulatedLocationProvider {
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        let permission = if config.permission_granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        Self {
            permission,
            route: Mutex::new(config.positions.iter().copied().collect()),
            fix_delay: config.fix_delay(),
        }
    }

    /// Number of fixes left on the route.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.route.lock().map_or(0, |route| route.len())
    }
}

impl LocationProvider for SimulatedLocationProvider {
    fn request_foreground_permission(
        &self,
    ) -> impl Future<Output = Result<PermissionStatus, GeowatchError>> + Send {
        let status = self.permission;
        tracing::debug!(?status, "simulated permission prompt answered");
        async move { Ok(status) }
    }

    fn current_position(
        &self,
    ) -> impl Future<Output = Result<PositionSample, GeowatchError>> + Send {
        // a poisoned lock means a previous caller panicked mid-pop; treat the
        // route as gone
        let next = self.route.lock().ok().and_then(|mut route| route.pop_front());
        let delay = self.fix_delay;
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match next {
                Some(coordinate) => {
                    tracing::debug!(position = %coordinate, "simulated fix");
                    Ok(PositionSample::now(coordinate))
                }
                None => Err(GeowatchError::LocationUnavailable(
                    LocationError::StreamEnded,
                )),
            }
        }
    }
}
