//! # geowatch-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LocationProvider` — permission prompt and position fixes
//!   - `MapDisplay` — render the region and markers
//!   - `AlertSurface` — present modal alerts
//!   - `EventPublisher` — broadcast geofence events
//! - Define **driving/inbound ports** as use-case structs:
//!   - `LocationTracker` — permission → fix → evaluate → alert
//!   - `GeofenceEvaluator` — containment and presence tracking
//! - Provide **in-process infrastructure** (event bus, position state) that
//!   doesn't need IO
//!
//! ## Dependency rule
//! Depends on `geowatch-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod geofence_evaluator;
pub mod ports;
pub mod position_state;
pub mod services;
