//! Trip snapshot types.
//!
//! A `Trip` is the mutable runtime instance of a `Route`. Snapshots are
//! produced by the trips backend and replaced (or patched wholesale) by
//! the realtime stream; everything downstream re-derives its answers from
//! whichever snapshot it is handed.

use chrono::{DateTime, Utc};

use super::{Route, Waypoint};

/// Backend trip identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(pub i64);

impl std::fmt::Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripStatus {
    /// Parked at the origin, not yet departed
    Scheduled,
    /// Underway
    InProgress,
    /// Reached the destination
    Completed,
    /// Abandoned without reaching the destination
    NotCompleted,
}

impl TripStatus {
    /// Returns true for terminal states (no further booking possible).
    pub fn is_finished(self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::NotCompleted)
    }
}

/// A snapshot of one trip.
///
/// Every field beyond `id` and `status` may be missing or partially
/// populated: snapshots can arrive mid-mutation from the realtime stream,
/// so consumers handle the absent branch of each field explicitly rather
/// than assuming presence was guaranteed upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Trip id
    pub id: TripId,
    /// Lifecycle state
    pub status: TripStatus,
    /// The route template, when known
    pub route: Option<Route>,
    /// Ordered stop sequence. May be empty, and may omit the route's
    /// origin and destination boundary entries.
    pub waypoints: Vec<Waypoint>,
    /// Total seat capacity
    pub seats: Option<u32>,
    /// Seats still available (decremented externally on booking)
    pub remaining_seats: Option<u32>,
    /// Scheduled departure
    pub departure_time: Option<DateTime<Utc>>,
}

impl Trip {
    /// Seats still bookable: `remaining_seats` if present, else the total
    /// capacity, else zero.
    pub fn effective_seats(&self) -> u32 {
        self.remaining_seats.or(self.seats).unwrap_or(0)
    }

    /// Iterator over waypoints the vehicle has not yet passed.
    pub fn unpassed(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter().filter(|w| !w.is_passed)
    }

    /// The stop the vehicle is currently approaching.
    ///
    /// Prefers an unpassed waypoint flagged `is_next`; when no waypoint
    /// carries the flag (or several do, in a malformed snapshot), falls
    /// back to the unpassed waypoint with the lowest `order`.
    pub fn next_waypoint(&self) -> Option<&Waypoint> {
        self.unpassed()
            .filter(|w| w.is_next)
            .min_by_key(|w| w.order)
            .or_else(|| self.unpassed().min_by_key(|w| w.order))
    }

    /// Lowest `order` among unpassed waypoints.
    pub fn min_unpassed_order(&self) -> Option<i64> {
        self.unpassed().map(|w| w.order).min()
    }

    /// An `order` value sorting before every real waypoint.
    ///
    /// Used for synthetic origin entries. Orders are not guaranteed
    /// zero-based, so this is derived from the actual minimum.
    pub fn order_before_all(&self) -> i64 {
        self.waypoints
            .iter()
            .map(|w| w.order)
            .min()
            .map_or(0, |min| min.saturating_sub(1).min(0))
    }

    /// An `order` value sorting after every real waypoint.
    ///
    /// Used for synthetic destination entries.
    pub fn order_after_all(&self) -> i64 {
        self.waypoints
            .iter()
            .map(|w| w.order)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }
}
