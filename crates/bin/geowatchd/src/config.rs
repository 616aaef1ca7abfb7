//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `geowatch.toml` in the working directory (or the path in
//! `GEOWATCH_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::str::FromStr;
use std::time::Duration;

use geowatch_adapter_virtual::SimulationConfig;
use geowatch_app::geofence_evaluator::AlertPolicy;
use geowatch_app::services::tracker_service::{TrackerOptions, TrackingMode};
use geowatch_domain::coordinate::Coordinate;
use geowatch_domain::error::GeowatchError;
use geowatch_domain::geofence::{Geofence, GeofenceSet};
use geowatch_domain::id::GeofenceId;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sampling behaviour.
    pub tracking: TrackingConfig,
    /// When alerts fire.
    pub alerts: AlertsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Static geofence definitions, evaluated in this order.
    pub geofences: Vec<GeofenceConfig>,
    /// Scripted behaviour of the virtual location provider.
    pub simulation: SimulationConfig,
}

/// Tracking configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub mode: TrackingModeKind,
    /// Seconds between fixes in continuous mode.
    pub interval_secs: u64,
    /// Abandon a fix after this many seconds. Absent means wait forever.
    pub fix_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingModeKind {
    #[default]
    SingleFix,
    Continuous,
}

impl FromStr for TrackingModeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_fix" => Ok(Self::SingleFix),
            "continuous" => Ok(Self::Continuous),
            other => Err(ConfigError::Validation(format!(
                "unknown tracking mode {other:?}"
            ))),
        }
    }
}

/// Alert configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub policy: AlertPolicyKind,
    /// Also alert when leaving a zone (`on_entry` policy only).
    pub alert_on_exit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPolicyKind {
    #[default]
    EveryUpdate,
    OnEntry,
}

impl FromStr for AlertPolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "every_update" => Ok(Self::EveryUpdate),
            "on_entry" => Ok(Self::OnEntry),
            other => Err(ConfigError::Validation(format!(
                "unknown alert policy {other:?}"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One `[[geofences]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct GeofenceConfig {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

impl GeofenceConfig {
    fn build(&self) -> Result<Geofence, GeowatchError> {
        let mut builder = Geofence::builder()
            .id(GeofenceId::new(self.id))
            .center(Coordinate::new(self.latitude, self.longitude))
            .radius_meters(self.radius_meters);
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        builder.build()
    }
}

impl Config {
    /// Load configuration from `geowatch.toml` (or `GEOWATCH_CONFIG`, if set)
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, an
    /// override is not recognised, or the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("GEOWATCH_CONFIG").unwrap_or_else(|_| "geowatch.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("GEOWATCH_TRACKING_MODE") {
            self.tracking.mode = val.parse()?;
        }
        if let Ok(val) = std::env::var("GEOWATCH_ALERT_POLICY") {
            self.alerts.policy = val.parse()?;
        }
        if let Ok(val) = std::env::var("GEOWATCH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    /// Check semantic constraints the TOML schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a zero interval or timeout and
    /// [`ConfigError::Geofence`] for an invalid or duplicated geofence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tracking.mode == TrackingModeKind::Continuous && self.tracking.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "interval_secs must be non-zero in continuous mode".to_string(),
            ));
        }
        if self.tracking.fix_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "fix_timeout_secs must be non-zero".to_string(),
            ));
        }
        self.geofence_set()?;
        Ok(())
    }

    /// Build the validated geofence set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geofence`] when a geofence is invalid or two
    /// share an id.
    pub fn geofence_set(&self) -> Result<GeofenceSet, ConfigError> {
        let geofences = self
            .geofences
            .iter()
            .map(GeofenceConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GeofenceSet::new(geofences)?)
    }

    #[must_use]
    pub fn alert_policy(&self) -> AlertPolicy {
        match self.alerts.policy {
            AlertPolicyKind::EveryUpdate => AlertPolicy::EveryUpdate,
            AlertPolicyKind::OnEntry => AlertPolicy::OnEntry {
                alert_on_exit: self.alerts.alert_on_exit,
            },
        }
    }

    #[must_use]
    pub fn tracker_options(&self) -> TrackerOptions {
        let mode = match self.tracking.mode {
            TrackingModeKind::SingleFix => TrackingMode::SingleFix,
            TrackingModeKind::Continuous => TrackingMode::Continuous {
                interval: Duration::from_secs(self.tracking.interval_secs),
            },
        };
        TrackerOptions {
            mode,
            fix_timeout: self.tracking.fix_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            alerts: AlertsConfig::default(),
            logging: LoggingConfig::default(),
            geofences: vec![GeofenceConfig {
                id: 1,
                name: None,
                latitude: 37.78825,
                longitude: -122.4324,
                radius_meters: 100.0,
            }],
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            mode: TrackingModeKind::SingleFix,
            interval_secs: 5,
            fix_timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "geowatchd=info,geowatch_app=info,geowatch_adapter_virtual=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A geofence definition is invalid.
    #[error("invalid geofence")]
    Geofence(#[from] GeowatchError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
