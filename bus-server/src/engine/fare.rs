//! Segment fare computation.
//!
//! Waypoint prices are cumulative from the trip origin, so the fare for
//! any (board, alight) pair is a difference of two cumulative prices,
//! never a lookup in a per-segment table. This keeps fares consistent
//! regardless of where custom midpoints were inserted.

use serde::Serialize;

use crate::domain::{LocationId, Trip};

/// Result of a segment fare computation.
///
/// The legacy behaviour returned a numeric 0 both for a genuinely free
/// segment and for a pair that could not be resolved against the trip,
/// leaving callers unable to tell them apart. The two cases are distinct
/// here; [`Fare::amount_or_zero`] recovers the old numeric shape where a
/// wire format still wants it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fare {
    /// Fare in minor currency units. May legitimately be zero for a
    /// zero-length segment, and may be negative on malformed snapshots
    /// whose cumulative prices are not monotone.
    Amount {
        /// Minor currency units
        amount: i64,
    },
    /// One or both endpoints could not be resolved against the trip's
    /// origin, destination, or waypoints.
    Unresolvable,
}

impl Fare {
    /// The fare amount, if the pair resolved.
    pub fn amount(self) -> Option<i64> {
        match self {
            Fare::Amount { amount } => Some(amount),
            Fare::Unresolvable => None,
        }
    }

    /// The fare amount, collapsing `Unresolvable` to 0 (legacy shape).
    pub fn amount_or_zero(self) -> i64 {
        self.amount().unwrap_or(0)
    }

    /// Returns true if the pair resolved to an amount.
    pub fn is_resolvable(self) -> bool {
        matches!(self, Fare::Amount { .. })
    }
}

/// Fare for travelling from `from` to `to` on this trip.
///
/// Each endpoint resolves to a cumulative price: the route origin is 0,
/// the route destination is the full `route_price`, and any other
/// location resolves through the waypoint list. The fare is the
/// difference of the two.
///
/// # Examples
///
/// ```
/// use bus_server::domain::{Location, LocationId, Route, Trip, TripId, TripStatus};
/// use bus_server::engine::{Fare, segment_fare};
///
/// let origin_id = LocationId::parse("loc-o").unwrap();
/// let dest_id = LocationId::parse("loc-d").unwrap();
/// let trip = Trip {
///     id: TripId(1),
///     status: TripStatus::Scheduled,
///     route: Some(Route {
///         origin: Location::new(origin_id.clone(), "Origin", 0.0, 0.0),
///         destination: Location::new(dest_id.clone(), "Dest", 1.0, 1.0),
///         route_price: 2500,
///         is_city_route: false,
///     }),
///     waypoints: vec![],
///     seats: None,
///     remaining_seats: None,
///     departure_time: None,
/// };
///
/// assert_eq!(segment_fare(&trip, &origin_id, &dest_id), Fare::Amount { amount: 2500 });
///
/// let unknown = LocationId::parse("loc-x").unwrap();
/// assert_eq!(segment_fare(&trip, &origin_id, &unknown), Fare::Unresolvable);
/// ```
pub fn segment_fare(trip: &Trip, from: &LocationId, to: &LocationId) -> Fare {
    let Some(route) = trip.route.as_ref() else {
        return Fare::Unresolvable;
    };

    let resolve = |location: &LocationId| -> Option<i64> {
        if route.is_origin(location) {
            Some(0)
        } else if route.is_destination(location) {
            Some(route.route_price)
        } else {
            trip.waypoints
                .iter()
                .find(|w| w.stops_at(location))
                .map(|w| w.price)
        }
    };

    match (resolve(from), resolve(to)) {
        (Some(from_price), Some(to_price)) => Fare::Amount {
            amount: to_price - from_price,
        },
        _ => Fare::Unresolvable,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Location, Route, TripId, TripStatus, Waypoint, WaypointId};
    use proptest::prelude::*;

    fn id(s: &str) -> LocationId {
        LocationId::parse(s).unwrap()
    }

    /// Builds a trip with `prices.len()` midpoint waypoints at orders
    /// 1..=n carrying the given cumulative prices.
    fn trip_with_prices(route_price: i64, prices: &[i64]) -> Trip {
        let waypoints = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Waypoint {
                id: WaypointId(format!("wp-{i}")),
                location_id: id(&format!("mid-{i}")),
                order: (i + 1) as i64,
                price,
                is_passed: false,
                is_next: false,
                is_custom: false,
                location: None,
            })
            .collect();

        Trip {
            id: TripId(1),
            status: TripStatus::Scheduled,
            route: Some(Route {
                origin: Location::new(id("origin"), "Origin", 0.0, 0.0),
                destination: Location::new(id("dest"), "Dest", 1.0, 1.0),
                route_price,
                is_city_route: false,
            }),
            waypoints,
            seats: None,
            remaining_seats: None,
            departure_time: None,
        }
    }

    proptest! {
        /// Full-route fare is always the route price, whatever the
        /// waypoint data looks like
        #[test]
        fn full_route_fare_is_route_price(
            route_price in 0i64..1_000_000,
            prices in proptest::collection::vec(0i64..1_000_000, 0..8),
        ) {
            let trip = trip_with_prices(route_price, &prices);
            prop_assert_eq!(
                segment_fare(&trip, &id("origin"), &id("dest")),
                Fare::Amount { amount: route_price }
            );
        }

        /// Additivity: fare(A, B) + fare(B, C) == fare(A, C) for any
        /// three resolvable points
        #[test]
        fn fares_are_additive(
            route_price in 0i64..1_000_000,
            prices in proptest::collection::vec(0i64..1_000_000, 3..8),
            idx in proptest::collection::vec(0usize..8, 3),
        ) {
            let trip = trip_with_prices(route_price, &prices);
            let points: Vec<LocationId> = {
                let mut p = vec![id("origin")];
                p.extend((0..prices.len()).map(|i| id(&format!("mid-{i}"))));
                p.push(id("dest"));
                p
            };

            let a = &points[idx[0] % points.len()];
            let b = &points[idx[1] % points.len()];
            let c = &points[idx[2] % points.len()];

            let ab = segment_fare(&trip, a, b).amount().unwrap();
            let bc = segment_fare(&trip, b, c).amount().unwrap();
            let ac = segment_fare(&trip, a, c).amount().unwrap();

            prop_assert_eq!(ab + bc, ac);
        }

        /// An endpoint outside the trip is always unresolvable
        #[test]
        fn unknown_endpoints_unresolvable(
            route_price in 0i64..1_000_000,
            prices in proptest::collection::vec(0i64..1_000_000, 0..4),
        ) {
            let trip = trip_with_prices(route_price, &prices);
            let unknown = id("somewhere-else");

            prop_assert_eq!(segment_fare(&trip, &unknown, &id("dest")), Fare::Unresolvable);
            prop_assert_eq!(segment_fare(&trip, &id("origin"), &unknown), Fare::Unresolvable);
        }
    }
}
