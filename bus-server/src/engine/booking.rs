//! The composite booking guard.
//!
//! Invoked immediately before submitting a booking to the backend:
//! checks stop availability first and seat capacity last, so a message
//! about seat exhaustion can never mask a more fundamental stop-selection
//! error.

use serde::Serialize;

use crate::domain::{LocationId, Trip};

use super::availability::{available_destinations, available_origins};

/// Stable rejection reason strings.
///
/// These are matched on by the calling UI and by tests, so they must not
/// change spelling.
pub mod reasons {
    /// Neither boarding nor alighting is possible at all.
    pub const NO_STOPS: &str = "no available origins or destinations";
    /// The requested boarding stop is not currently boardable.
    pub const INVALID_ORIGIN: &str = "invalid origin";
    /// The requested alighting stop is not currently alightable.
    pub const INVALID_DESTINATION: &str = "invalid destination";
    /// No seat capacity remains.
    pub const NO_SEATS: &str = "no seats available";
}

/// Outcome of the booking guard.
///
/// A denial always carries one of the [`reasons`] strings; an allowance
/// carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDecision {
    /// Whether the booking may be submitted
    pub allowed: bool,
    /// Rejection reason, present iff `allowed` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl BookingDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn deny(reason: &'static str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Returns true if the booking may proceed.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

/// Decides whether a booking for the given (board, alight) pair may be
/// submitted against this trip snapshot.
///
/// The checks run in a fixed order and short-circuit: empty availability,
/// then origin membership, then destination membership, then seats.
/// Never panics; missing data denies rather than erroring.
pub fn booking_decision(trip: &Trip, from: &LocationId, to: &LocationId) -> BookingDecision {
    let origins = available_origins(trip);
    let destinations = available_destinations(trip);

    if origins.is_empty() || destinations.is_empty() {
        return BookingDecision::deny(reasons::NO_STOPS);
    }

    if !origins.iter().any(|w| w.stops_at(from)) {
        return BookingDecision::deny(reasons::INVALID_ORIGIN);
    }

    if !destinations.iter().any(|w| w.stops_at(to)) {
        return BookingDecision::deny(reasons::INVALID_DESTINATION);
    }

    if trip.effective_seats() == 0 {
        return BookingDecision::deny(reasons::NO_SEATS);
    }

    BookingDecision::allow()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Location, Route, TripId, TripStatus, Waypoint, WaypointId};
    use proptest::prelude::*;

    fn id(s: &str) -> LocationId {
        LocationId::parse(s).unwrap()
    }

    fn arb_status() -> impl Strategy<Value = TripStatus> {
        prop_oneof![
            Just(TripStatus::Scheduled),
            Just(TripStatus::InProgress),
            Just(TripStatus::Completed),
            Just(TripStatus::NotCompleted),
        ]
    }

    fn arb_trip() -> impl Strategy<Value = Trip> {
        (
            arb_status(),
            any::<bool>(),
            proptest::collection::vec((0i64..10, 0i64..5000, any::<bool>()), 0..6),
            proptest::option::of(0u32..5),
        )
            .prop_map(|(status, city, stops, remaining)| Trip {
                id: TripId(1),
                status,
                route: Some(Route {
                    origin: Location::new(id("origin"), "Origin", 0.0, 0.0),
                    destination: Location::new(id("dest"), "Dest", 1.0, 1.0),
                    route_price: 2500,
                    is_city_route: city,
                }),
                waypoints: stops
                    .into_iter()
                    .enumerate()
                    .map(|(i, (order, price, passed))| Waypoint {
                        id: WaypointId(format!("wp-{i}")),
                        location_id: id(&format!("mid-{i}")),
                        order,
                        price,
                        is_passed: passed,
                        is_next: false,
                        is_custom: false,
                        location: None,
                    })
                    .collect(),
                seats: Some(30),
                remaining_seats: remaining,
                departure_time: None,
            })
    }

    proptest! {
        /// Zero remaining seats always denies with the seat reason, or
        /// with an earlier stop-selection reason; never an allowance
        #[test]
        fn no_seats_never_allowed(trip in arb_trip(), from_idx in 0usize..8, to_idx in 0usize..8) {
            let mut trip = trip;
            trip.remaining_seats = Some(0);

            let points: Vec<LocationId> = {
                let mut p = vec![id("origin"), id("dest")];
                p.extend(trip.waypoints.iter().map(|w| w.location_id.clone()));
                p
            };
            let from = &points[from_idx % points.len()];
            let to = &points[to_idx % points.len()];

            let decision = booking_decision(&trip, from, to);
            prop_assert!(!decision.is_allowed());
            prop_assert!(decision.reason.is_some());
        }

        /// A denial always carries exactly one of the stable reasons
        #[test]
        fn denials_carry_stable_reasons(trip in arb_trip(), from_idx in 0usize..8, to_idx in 0usize..8) {
            let points: Vec<LocationId> = {
                let mut p = vec![id("origin"), id("dest")];
                p.extend(trip.waypoints.iter().map(|w| w.location_id.clone()));
                p
            };
            let from = &points[from_idx % points.len()];
            let to = &points[to_idx % points.len()];

            let decision = booking_decision(&trip, from, to);
            match decision.reason {
                None => prop_assert!(decision.is_allowed()),
                Some(reason) => {
                    prop_assert!(!decision.is_allowed());
                    prop_assert!([
                        reasons::NO_STOPS,
                        reasons::INVALID_ORIGIN,
                        reasons::INVALID_DESTINATION,
                        reasons::NO_SEATS,
                    ]
                    .contains(&reason));
                }
            }
        }

        /// An origin outside the available set is always rejected as an
        /// invalid origin (or earlier as NO_STOPS), whatever the
        /// destination looks like
        #[test]
        fn foreign_origin_never_allowed(trip in arb_trip(), to_idx in 0usize..8) {
            let points: Vec<LocationId> = {
                let mut p = vec![id("origin"), id("dest")];
                p.extend(trip.waypoints.iter().map(|w| w.location_id.clone()));
                p
            };
            let to = &points[to_idx % points.len()];

            let decision = booking_decision(&trip, &id("not-on-this-trip"), to);
            prop_assert!(!decision.is_allowed());
            prop_assert!(matches!(
                decision.reason,
                Some(reasons::NO_STOPS) | Some(reasons::INVALID_ORIGIN)
            ));
        }
    }
}
