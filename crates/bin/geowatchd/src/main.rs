use geowatch_domain::error::GeowatchError;
use geowatchd::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let mut daemon = geowatchd::build(&config)?;

    let event_logger = geowatchd::spawn_event_logger(&daemon.events);
    let position_logger = geowatchd::spawn_position_logger(&daemon.tracker.position_state());

    let outcome = tokio::select! {
        result = daemon.tracker.run() => match result {
            Ok(()) => {
                tracing::info!(
                    alerts = daemon.alerts.history().len(),
                    remaining_fixes = daemon.provider.remaining(),
                    "tracking session finished"
                );
                Ok(())
            }
            Err(GeowatchError::PermissionDenied) => {
                tracing::warn!("location feature disabled for this session");
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "tracking session failed");
                Err(err)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    };

    // closes the event bus and position state so both loggers drain and stop
    drop(daemon);
    let (events, fixes) = tokio::join!(event_logger, position_logger);
    let (events, fixes) = (events?, fixes?);
    tracing::debug!(events, fixes, "loggers drained");

    outcome.map_err(Into::into)
}
