//! # geowatch-adapter-virtual
//!
//! Virtual/demo adapters for running geowatch without a device.
//!
//! ## Provided adapters
//!
//! | Adapter | Port | Behaviour |
//! |---------|------|-----------|
//! | [`SimulatedLocationProvider`] | `LocationProvider` | Answers the permission prompt from config and replays a scripted route |
//! | [`LogMapDisplay`] | `MapDisplay` | Logs the region and markers, settles on the requested region |
//! | [`LogAlertSurface`] | `AlertSurface` | Logs alerts and keeps a history |
//!
//! ## Dependency rule
//!
//! Depends on `geowatch-app` (port traits) and `geowatch-domain` only.

mod config;
mod display;
mod location;

pub use config::SimulationConfig;
pub use display::{LogAlertSurface, LogMapDisplay};
pub use location::SimulatedLocationProvider;
