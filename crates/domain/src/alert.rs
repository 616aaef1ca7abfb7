//! Alert — a title and message presented modally to the user.

use serde::{Deserialize, Serialize};

/// A user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Raised when the user declines location access.
    #[must_use]
    pub fn permission_denied() -> Self {
        Self::new("Permission Denied", "Location access is required.")
    }

    /// Raised when the device is inside a geofence.
    #[must_use]
    pub fn geofence_entered() -> Self {
        Self::new("Geofence Alert", "You entered a geofence area!")
    }

    /// Raised when the device leaves a geofence (edge-triggered policy only).
    #[must_use]
    pub fn geofence_exited() -> Self {
        Self::new("Geofence Alert", "You left a geofence area.")
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
