//! Domain types for the bus booking service.
//!
//! This module contains the core domain model types. Identifiers are
//! validated at construction ([`LocationId::parse`]); the snapshot
//! types (`Trip`, `Route`, `Waypoint`) deliberately tolerate partial or
//! malformed data, and every consumer handles the absent branch
//! explicitly.

mod location;
mod route;
mod trip;
mod waypoint;

pub use location::{InvalidLocationId, Location, LocationId};
pub use route::Route;
pub use trip::{Trip, TripId, TripStatus};
pub use waypoint::{Waypoint, WaypointId};
