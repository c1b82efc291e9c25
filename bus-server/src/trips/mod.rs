//! Trips backend collaborator.
//!
//! The trips backend owns trip state: it serves paginated, filtered trip
//! listings (each response carrying a realtime session id), and accepts
//! booking submissions. This module holds the HTTP client, the wire
//! record types it decodes, and a mock client for development and tests.

mod client;
mod error;
mod mock;
mod types;

pub use client::{BookingAck, BookingSubmission, TripClient, TripClientConfig, TripFilter};
pub use error::TripError;
pub use mock::MockTripClient;
pub use types::{
    LocationRecord, PaginatedTripsRecord, RouteRecord, TripPage, TripRecord, TripStatusRecord,
    VehicleRecord, WaypointRecord,
};
