//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Location, Trip, TripStatus, Waypoint};
use crate::engine::Fare;
use crate::trips::{TripFilter, TripPage};

/// Request to list trips.
#[derive(Debug, Default, Deserialize)]
pub struct TripListRequest {
    /// Origin name text to match
    pub origin: Option<String>,

    /// Destination name text to match
    pub destination: Option<String>,

    /// Operating company name text to match
    pub company: Option<String>,

    /// Narrow to city or provincial routes
    pub city_route: Option<bool>,

    /// Page size (defaults to 20, capped at 100)
    pub limit: Option<u32>,

    /// Page offset
    pub offset: Option<u32>,
}

impl TripListRequest {
    /// Build the backend listing filter for this request.
    pub fn to_filter(&self) -> TripFilter {
        TripFilter {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            company: self.company.clone(),
            city_route: self.city_route,
            limit: self.limit.map(|l| l.clamp(1, 100)),
            offset: self.offset.unwrap_or(0),
            session_uuid: None,
        }
    }
}

/// A location in responses.
#[derive(Debug, Serialize)]
pub struct LocationView {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationView {
    pub fn from_location(location: &Location) -> Self {
        Self {
            id: location.id.as_str().to_string(),
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// A boardable or alightable stop in responses.
#[derive(Debug, Serialize)]
pub struct StopView {
    /// Location id to use in fare and booking requests
    pub location_id: String,

    /// Display name, when location details are known
    pub name: Option<String>,

    /// Sequence position along the route
    pub order: i64,

    /// Cumulative fare from the trip origin
    pub price: i64,

    /// Whether this is an operator-added midpoint
    pub is_custom: bool,
}

impl StopView {
    pub fn from_waypoint(waypoint: &Waypoint) -> Self {
        Self {
            location_id: waypoint.location_id.as_str().to_string(),
            name: waypoint.location.as_ref().map(|l| l.name.clone()),
            order: waypoint.order,
            price: waypoint.price,
            is_custom: waypoint.is_custom,
        }
    }
}

/// The wire name of a trip status.
pub fn status_name(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Scheduled => "SCHEDULED",
        TripStatus::InProgress => "IN_PROGRESS",
        TripStatus::Completed => "COMPLETED",
        TripStatus::NotCompleted => "NOT_COMPLETED",
    }
}

/// A trip in listing responses.
#[derive(Debug, Serialize)]
pub struct TripView {
    pub id: i64,
    pub status: &'static str,
    pub origin: Option<LocationView>,
    pub destination: Option<LocationView>,
    pub route_price: Option<i64>,
    pub is_city_route: Option<bool>,
    pub waypoints: Vec<StopView>,
    pub seats_available: u32,
    pub departure_time: Option<DateTime<Utc>>,
}

impl TripView {
    pub fn from_trip(trip: &Trip) -> Self {
        let route = trip.route.as_ref();
        Self {
            id: trip.id.0,
            status: status_name(trip.status),
            origin: route.map(|r| LocationView::from_location(&r.origin)),
            destination: route.map(|r| LocationView::from_location(&r.destination)),
            route_price: route.map(|r| r.route_price),
            is_city_route: route.map(|r| r.is_city_route),
            waypoints: trip.waypoints.iter().map(StopView::from_waypoint).collect(),
            seats_available: trip.effective_seats(),
            departure_time: trip.departure_time,
        }
    }
}

/// Response for trip listings.
#[derive(Debug, Serialize)]
pub struct TripListResponse {
    pub trips: Vec<TripView>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,

    /// Realtime session id for `/events/{session}`
    pub session_uuid: Option<String>,
}

impl TripListResponse {
    pub fn from_page(page: &TripPage) -> Self {
        Self {
            trips: page.trips.iter().map(TripView::from_trip).collect(),
            total: page.total,
            limit: page.limit,
            offset: page.offset,
            session_uuid: page.session.clone(),
        }
    }
}

/// Response for a trip's stop availability.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub trip_id: i64,

    /// Stops a passenger may board from right now
    pub origins: Vec<StopView>,

    /// Stops a passenger may alight at right now
    pub destinations: Vec<StopView>,

    /// Stops that will become boardable shortly (UI hint only)
    pub allowed_soon: Vec<StopView>,

    /// All stops still ahead of the vehicle, for progress displays
    pub upcoming_stops: Vec<StopView>,
}

/// Query for a segment fare.
#[derive(Debug, Deserialize)]
pub struct FareQuery {
    /// Boarding location id
    pub from: String,

    /// Alighting location id
    pub to: String,
}

/// Response for a segment fare.
#[derive(Debug, Serialize)]
pub struct FareResponse {
    pub trip_id: i64,
    pub from: String,
    pub to: String,
    pub fare: Fare,
}

/// Request to book a segment on a trip.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub trip_id: i64,

    /// Boarding location id
    pub from: String,

    /// Alighting location id
    pub to: String,

    /// Number of tickets
    pub seats: u32,
}

/// Response for an accepted booking.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub message: String,
    pub payment_reference: Option<String>,

    /// Total charged, fare times tickets
    pub total_amount: i64,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
