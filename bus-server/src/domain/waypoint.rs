//! Waypoint types for bus trips.
//!
//! A `Waypoint` binds a `Location` into a trip's stop sequence, carrying
//! the sequence position, the cumulative fare from the trip origin, and
//! the vehicle's passage state.

use super::{Location, LocationId};

/// Identifier of a waypoint within a trip.
///
/// Real waypoints carry backend-issued ids; synthetic boundary waypoints
/// (see [`Waypoint::boundary`]) carry a derived id so they remain
/// distinguishable in logs and comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaypointId(pub String);

impl std::fmt::Display for WaypointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stop on a specific trip.
///
/// `order` defines the stop's position in the sequence. It is comparable
/// but not guaranteed contiguous or zero-based, so position logic must
/// use `<`/`<=`/min-by, never indices.
///
/// `price` is the cumulative fare from the trip's origin to this stop,
/// not a per-segment price. Segment fares are derived by subtraction.
///
/// # Passage flags
///
/// - `is_passed`: the vehicle has physically passed this stop. One-way
///   within a trip's lifetime, except for external correcting events.
/// - `is_next`: the vehicle is currently approaching this stop. At most
///   one unpassed waypoint should carry it, but malformed snapshots with
///   zero or several are tolerated by all consumers.
/// - `is_custom`: an operator-added midpoint, as opposed to a structural
///   stop of the route template.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Waypoint id
    pub id: WaypointId,
    /// The location this waypoint stops at
    pub location_id: LocationId,
    /// Sequence position (total order, not an index)
    pub order: i64,
    /// Cumulative fare from the trip origin, in minor currency units
    pub price: i64,
    /// Whether the vehicle has passed this stop
    pub is_passed: bool,
    /// Whether the vehicle is currently approaching this stop
    pub is_next: bool,
    /// Whether this is an operator-added midpoint
    pub is_custom: bool,
    /// Embedded location details, when the backend supplied them
    pub location: Option<Location>,
}

impl Waypoint {
    /// Creates a synthetic boundary waypoint for a route origin or
    /// destination that is missing from the real waypoint list.
    ///
    /// All availability queries fabricate boundary entries through this
    /// one constructor so the synthesized shape cannot drift between
    /// call sites.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::domain::{Location, LocationId, Waypoint};
    ///
    /// let origin = Location::new(
    ///     LocationId::parse("loc-origin").unwrap(),
    ///     "Downtown",
    ///     -1.95,
    ///     30.06,
    /// );
    /// let wp = Waypoint::boundary(&origin, 0, 0);
    /// assert_eq!(wp.order, 0);
    /// assert_eq!(wp.price, 0);
    /// assert!(!wp.is_passed);
    /// assert_eq!(wp.location_id, origin.id);
    /// ```
    pub fn boundary(location: &Location, order: i64, price: i64) -> Self {
        Self {
            id: WaypointId(format!("boundary-{}", location.id)),
            location_id: location.id.clone(),
            order,
            price,
            is_passed: false,
            is_next: false,
            is_custom: false,
            location: Some(location.clone()),
        }
    }

    /// Returns true if this waypoint stops at the given location.
    pub fn stops_at(&self, location: &LocationId) -> bool {
        &self.location_id == location
    }
}
