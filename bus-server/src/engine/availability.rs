//! Stop availability queries.
//!
//! Determines, for a trip snapshot, where a passenger may currently
//! board and alight. City routes allow boarding and alighting at any
//! unpassed stop; provincial routes restrict boarding to the origin
//! (while scheduled) or the single next stop (once underway).
//!
//! When the real waypoint list omits the route's boundary stops, the
//! queries synthesize them through [`Waypoint::boundary`] so the origin
//! and destination stay selectable on partial data.

use crate::domain::{Trip, TripStatus, Waypoint};

/// Stops a passenger may currently board from.
///
/// Returns an empty list when the trip has no route or is finished.
/// Never panics on malformed snapshots.
pub fn available_origins(trip: &Trip) -> Vec<Waypoint> {
    let Some(route) = trip.route.as_ref() else {
        return Vec::new();
    };

    match (route.is_city_route, trip.status) {
        (_, TripStatus::Completed | TripStatus::NotCompleted) => Vec::new(),

        // Parked at the origin: boarding is open anywhere along the
        // still-ahead path, with the origin itself synthesized if the
        // waypoint list omits it.
        (true, TripStatus::Scheduled) => {
            let mut stops: Vec<Waypoint> = trip
                .unpassed()
                .filter(|w| !route.is_destination(&w.location_id))
                .cloned()
                .collect();

            if !stops.iter().any(|w| route.is_origin(&w.location_id)) {
                stops.insert(
                    0,
                    Waypoint::boundary(&route.origin, trip.order_before_all(), 0),
                );
            }

            stops
        }

        // Once the vehicle departs, origin boarding closes.
        (true, TripStatus::InProgress) => trip
            .unpassed()
            .filter(|w| {
                !route.is_destination(&w.location_id) && !route.is_origin(&w.location_id)
            })
            .cloned()
            .collect(),

        // Provincial scheduled trips board at the origin only.
        (false, TripStatus::Scheduled) => {
            let matches: Vec<Waypoint> = trip
                .waypoints
                .iter()
                .filter(|w| route.is_origin(&w.location_id))
                .cloned()
                .collect();

            if matches.is_empty() {
                let mut origin = Waypoint::boundary(&route.origin, trip.order_before_all(), 0);
                origin.is_next = true;
                vec![origin]
            } else {
                matches
            }
        }

        // Provincial trips underway board at exactly the next stop.
        (false, TripStatus::InProgress) => {
            trip.next_waypoint().cloned().map_or_else(Vec::new, |w| vec![w])
        }
    }
}

/// Stops a passenger may alight at, sorted ascending by `order`.
///
/// While the trip is not finished the route's destination is always
/// present in the result: if the computed set omits it, a synthetic
/// destination entry is appended as the fallback alighting point.
pub fn available_destinations(trip: &Trip) -> Vec<Waypoint> {
    let Some(route) = trip.route.as_ref() else {
        return Vec::new();
    };

    if trip.status.is_finished() {
        return Vec::new();
    }

    let mut stops: Vec<Waypoint> = match (route.is_city_route, trip.status) {
        // City routes: alight at any unpassed stop except the origin.
        (true, _) => trip
            .unpassed()
            .filter(|w| !route.is_origin(&w.location_id))
            .cloned()
            .collect(),

        // Provincial scheduled: any stop except the origin.
        (false, TripStatus::Scheduled) => trip
            .waypoints
            .iter()
            .filter(|w| !route.is_origin(&w.location_id))
            .cloned()
            .collect(),

        // Provincial underway: only the immediately-reachable next stop
        // counts as a committed drop-off until the vehicle passes it.
        (false, _) => match trip.min_unpassed_order() {
            Some(bound) => trip
                .unpassed()
                .filter(|w| w.order <= bound)
                .cloned()
                .collect(),
            None => Vec::new(),
        },
    };

    if !stops.iter().any(|w| route.is_destination(&w.location_id)) {
        stops.push(Waypoint::boundary(
            &route.destination,
            trip.order_after_all(),
            route.route_price,
        ));
    }

    stops.sort_by_key(|w| w.order);
    stops
}

/// All stops still ahead of the vehicle, sorted ascending by `order`.
///
/// The raw "what is left of this trip" view for progress displays:
/// unlike the booking queries it ignores route mode and boundary
/// membership. Empty unless the trip is underway.
pub fn upcoming_stops(trip: &Trip) -> Vec<Waypoint> {
    if trip.status != TripStatus::InProgress {
        return Vec::new();
    }

    let mut stops: Vec<Waypoint> = trip.unpassed().cloned().collect();
    stops.sort_by_key(|w| w.order);
    stops
}

/// Stops that will become bookable shortly but are not yet.
///
/// Used for UI hinting only, never for booking validation. City routes
/// only; provincial routes return empty.
pub fn allowed_soon(trip: &Trip) -> Vec<Waypoint> {
    let Some(route) = trip.route.as_ref() else {
        return Vec::new();
    };

    if !route.is_city_route {
        return Vec::new();
    }

    match trip.status {
        // Underway: everything still ahead except the immediate next
        // stop and the final destination.
        TripStatus::InProgress => {
            let next_id = trip.next_waypoint().map(|w| w.id.clone());

            trip.unpassed()
                .filter(|w| next_id.as_ref() != Some(&w.id))
                .filter(|w| !route.is_destination(&w.location_id))
                .cloned()
                .collect()
        }

        // Scheduled: operator-added midpoints that are not boundaries.
        TripStatus::Scheduled => trip
            .waypoints
            .iter()
            .filter(|w| {
                w.is_custom
                    && !route.is_origin(&w.location_id)
                    && !route.is_destination(&w.location_id)
            })
            .cloned()
            .collect(),

        TripStatus::Completed | TripStatus::NotCompleted => Vec::new(),
    }
}
