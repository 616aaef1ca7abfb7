//! End-to-end tests for the full geowatchd wiring.
//!
//! Each test builds the complete application from a TOML snippet (virtual
//! location provider, log surfaces, real evaluator and tracker) and runs a
//! tracking session to completion.

use geowatch_domain::alert::Alert;
use geowatch_domain::error::{GeowatchError, LocationError};
use geowatch_domain::event::EventType;
use geowatch_domain::id::GeofenceId;
use geowatchd::config::Config;

fn config(toml: &str) -> Config {
    let config: Config = toml::from_str(toml).expect("test config should parse");
    config.validate().expect("test config should be valid");
    config
}

// ---------------------------------------------------------------------------
// Single fix (default behaviour)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_alert_with_default_config() {
    let mut daemon = geowatchd::build(&Config::default()).unwrap();
    let mut events = daemon.events.subscribe();

    daemon.tracker.run().await.unwrap();

    assert_eq!(daemon.alerts.history(), vec![Alert::geofence_entered()]);
    let event = events.recv().await.unwrap();
    assert_eq!(event.event_type, EventType::GeofenceEntered);
    assert_eq!(event.geofence_id, GeofenceId::new(1));
}

#[tokio::test]
async fn should_not_alert_when_first_fix_is_outside() {
    // 0.002 degrees of latitude is roughly 222 m
    let mut daemon = geowatchd::build(&config(
        "
        [simulation]
        positions = [{ latitude = 37.79025, longitude = -122.4324 }]
        ",
    ))
    .unwrap();

    daemon.tracker.run().await.unwrap();

    assert!(daemon.alerts.history().is_empty());
    assert!(daemon.tracker.position_state().current().is_some());
}

#[tokio::test]
async fn should_ignore_later_fixes_in_single_fix_mode() {
    let mut daemon = geowatchd::build(&config(
        "
        [simulation]
        positions = [
            { latitude = 0.0, longitude = 0.0 },
            { latitude = 37.78825, longitude = -122.4324 },
        ]
        ",
    ))
    .unwrap();

    daemon.tracker.run().await.unwrap();

    assert!(daemon.alerts.history().is_empty());
    assert_eq!(daemon.provider.remaining(), 1);
}

#[tokio::test]
async fn should_show_permission_alert_when_denied() {
    let mut daemon = geowatchd::build(&config(
        "
        [simulation]
        permission_granted = false
        ",
    ))
    .unwrap();

    let result = daemon.tracker.run().await;

    assert!(matches!(result, Err(GeowatchError::PermissionDenied)));
    assert_eq!(daemon.alerts.history(), vec![Alert::permission_denied()]);
    assert_eq!(daemon.provider.remaining(), 1);
}

#[tokio::test]
async fn should_fail_when_no_fix_is_available() {
    let mut daemon = geowatchd::build(&config(
        "
        [simulation]
        positions = []
        ",
    ))
    .unwrap();

    let result = daemon.tracker.run().await;

    assert!(matches!(
        result,
        Err(GeowatchError::LocationUnavailable(LocationError::StreamEnded))
    ));
    assert!(daemon.tracker.position_state().current().is_none());
}

#[tokio::test]
async fn should_never_alert_without_geofences() {
    let mut daemon = geowatchd::build(&config("geofences = []")).unwrap();

    daemon.tracker.run().await.unwrap();

    assert!(daemon.alerts.history().is_empty());
}

// ---------------------------------------------------------------------------
// Continuous tracking
// ---------------------------------------------------------------------------

const ROUTE: &str = "
    [simulation]
    positions = [
        { latitude = 37.78825, longitude = -122.4324 },
        { latitude = 37.78825, longitude = -122.4324 },
        { latitude = 37.79025, longitude = -122.4324 },
        { latitude = 37.78825, longitude = -122.4324 },
    ]
";

#[tokio::test(start_paused = true)]
async fn should_repeat_alerts_with_every_update_policy() {
    let mut daemon = geowatchd::build(&config(&format!(
        "
        [tracking]
        mode = 'continuous'
        interval_secs = 1
        {ROUTE}
        "
    )))
    .unwrap();

    daemon.tracker.run().await.unwrap();

    assert_eq!(daemon.alerts.history().len(), 3);
    assert_eq!(daemon.provider.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn should_alert_on_entry_and_exit_with_edge_policy() {
    let mut daemon = geowatchd::build(&config(&format!(
        "
        [tracking]
        mode = 'continuous'
        interval_secs = 1

        [alerts]
        policy = 'on_entry'
        alert_on_exit = true
        {ROUTE}
        "
    )))
    .unwrap();

    daemon.tracker.run().await.unwrap();

    assert_eq!(
        daemon.alerts.history(),
        vec![
            Alert::geofence_entered(),
            Alert::geofence_exited(),
            Alert::geofence_entered(),
        ]
    );
}

// ---------------------------------------------------------------------------
// Loggers
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_drain_every_event_once_daemon_is_dropped() {
    let mut daemon = geowatchd::build(&config(&format!(
        "
        [tracking]
        mode = 'continuous'
        interval_secs = 1
        {ROUTE}
        "
    )))
    .unwrap();
    let logger = geowatchd::spawn_event_logger(&daemon.events);

    daemon.tracker.run().await.unwrap();
    drop(daemon);

    // entered, inside, exited, entered
    assert_eq!(logger.await.unwrap(), 4);
}

#[tokio::test]
async fn should_log_position_fix_from_session() {
    let mut daemon = geowatchd::build(&Config::default()).unwrap();
    let logger = geowatchd::spawn_position_logger(&daemon.tracker.position_state());

    daemon.tracker.run().await.unwrap();
    drop(daemon);

    assert_eq!(logger.await.unwrap(), 1);
}

#[tokio::test]
async fn should_stop_position_logger_without_fixes() {
    let mut daemon = geowatchd::build(&config(
        "
        [simulation]
        permission_granted = false
        ",
    ))
    .unwrap();
    let logger = geowatchd::spawn_position_logger(&daemon.tracker.position_state());

    let _ = daemon.tracker.run().await;
    drop(daemon);

    assert_eq!(logger.await.unwrap(), 0);
}

#[tokio::test]
async fn should_reject_invalid_geofence_at_build() {
    let config: Config = toml::from_str(
        "
        [[geofences]]
        id = 1
        latitude = 37.78825
        longitude = -122.4324
        radius_meters = -1.0
        ",
    )
    .unwrap();

    assert!(geowatchd::build(&config).is_err());
}
