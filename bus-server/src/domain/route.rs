//! Route template types.

use super::{Location, LocationId};

/// A static trip template: the endpoints, the full-route fare and the
/// route mode.
///
/// `is_city_route` is the mode switch for availability rules: city routes
/// allow flexible boarding and alighting at any unpassed stop, while
/// provincial routes restrict boarding to the origin (scheduled) or the
/// single next stop (in progress).
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Origin terminal
    pub origin: Location,
    /// Destination terminal
    pub destination: Location,
    /// Fare for the full origin-to-destination run, in minor units
    pub route_price: i64,
    /// Whether this is a city route (flexible stop rules)
    pub is_city_route: bool,
}

impl Route {
    /// Id of the origin location.
    pub fn origin_id(&self) -> &LocationId {
        &self.origin.id
    }

    /// Id of the destination location.
    pub fn destination_id(&self) -> &LocationId {
        &self.destination.id
    }

    /// Returns true if the given location is this route's origin.
    pub fn is_origin(&self, location: &LocationId) -> bool {
        self.origin_id() == location
    }

    /// Returns true if the given location is this route's destination.
    pub fn is_destination(&self, location: &LocationId) -> bool {
        self.destination_id() == location
    }
}
