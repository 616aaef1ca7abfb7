//! # geowatch-domain
//!
//! Pure domain model for the geowatch location tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Coordinates** and the haversine great-circle distance
//! - Define **Geofences** (circular zones) and the containment test
//! - Define **Presence** (per-geofence outside/inside state machine)
//! - Define **Position samples**, **map views** and **alerts**
//! - Define **Events** (enter/inside/exit records)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod alert;
pub mod coordinate;
pub mod event;
pub mod geofence;
pub mod map;
pub mod position;
pub mod presence;
