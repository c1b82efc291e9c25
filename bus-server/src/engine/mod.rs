//! Availability and fare engine.
//!
//! Pure queries over a single [`Trip`](crate::domain::Trip) snapshot:
//! which stops a passenger may board from, which stops they may alight
//! at, what a (board, alight) segment costs, and whether a requested
//! pair is currently bookable.
//!
//! Behaviour branches on two independent axes, route mode (city vs
//! provincial) and trip status, with no state machine: every query
//! re-derives its answer from the snapshot it is handed. Nothing here
//! performs I/O, caches, or returns errors; missing data degrades to
//! empty sets, unresolvable fares and denied bookings, never a panic.

mod availability;
mod booking;
mod fare;

pub use availability::{allowed_soon, available_destinations, available_origins, upcoming_stops};
pub use booking::{BookingDecision, booking_decision, reasons};
pub use fare::{Fare, segment_fare};
