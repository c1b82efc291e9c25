//! Trip stream event types.
//!
//! Wire frames are `{"event": "<name>", "data": {...}}`. Trip-carrying
//! events hold a full trip record: patches replace the cached snapshot
//! wholesale, there are no field-level deltas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::trips::TripRecord;

/// Stream connection acknowledgement payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub client_id: String,
    pub session_uuid: String,
    pub trip_count: u64,
}

/// Stream heartbeat payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    pub timestamp: DateTime<Utc>,
}

/// A named event on the trip stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum TripEvent {
    /// Stream established
    Connected(ConnectionInfo),
    /// Periodic liveness signal
    Heartbeat(Heartbeat),
    /// A new trip appeared
    Created(TripRecord),
    /// Trip fields changed
    Updated(TripRecord),
    /// Trip departed
    Started(TripRecord),
    /// Trip reached its destination
    Completed(TripRecord),
    /// Seats were booked
    SeatsReduced(TripRecord),
    /// A booking was cancelled
    SeatsRestored(TripRecord),
    /// The vehicle passed a waypoint
    WaypointPassed(TripRecord),
}

impl TripEvent {
    /// The wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            TripEvent::Connected(_) => "connected",
            TripEvent::Heartbeat(_) => "heartbeat",
            TripEvent::Created(_) => "created",
            TripEvent::Updated(_) => "updated",
            TripEvent::Started(_) => "started",
            TripEvent::Completed(_) => "completed",
            TripEvent::SeatsReduced(_) => "seats_reduced",
            TripEvent::SeatsRestored(_) => "seats_restored",
            TripEvent::WaypointPassed(_) => "waypoint_passed",
        }
    }

    /// The carried trip record, for trip-patching events.
    pub fn trip(&self) -> Option<&TripRecord> {
        match self {
            TripEvent::Connected(_) | TripEvent::Heartbeat(_) => None,
            TripEvent::Created(t)
            | TripEvent::Updated(t)
            | TripEvent::Started(t)
            | TripEvent::Completed(t)
            | TripEvent::SeatsReduced(t)
            | TripEvent::SeatsRestored(t)
            | TripEvent::WaypointPassed(t) => Some(t),
        }
    }
}
