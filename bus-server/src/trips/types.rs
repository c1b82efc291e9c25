//! Wire record types for the trips backend JSON API.
//!
//! The backend's records carry more than the domain needs (place ids,
//! audit timestamps, vehicle telemetry); unknown fields are ignored on
//! decode. Conversion into domain types validates identifiers and
//! degrades structurally: a trip with a malformed route converts to a
//! routeless trip rather than failing the whole page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::TripError;
use crate::domain::{Location, LocationId, Route, Trip, TripId, TripStatus, Waypoint, WaypointId};

/// A physical stop as the backend serializes it.
///
/// The backend stores up to three candidate names per location; display
/// resolution prefers the operator's custom name, then the geocoded
/// place name, then the short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub google_place_name: Option<String>,
    #[serde(default)]
    pub custom_name: Option<String>,
}

impl LocationRecord {
    /// The name shown to passengers.
    pub fn display_name(&self) -> &str {
        self.custom_name
            .as_deref()
            .or(self.google_place_name.as_deref())
            .or(self.code.as_deref())
            .unwrap_or(&self.id)
    }

    /// Convert to a domain location.
    pub fn to_domain(&self) -> Result<Location, TripError> {
        let id = LocationId::parse(&self.id)
            .map_err(|e| TripError::InvalidRecord(format!("location id {:?}: {e}", self.id)))?;

        Ok(Location::new(
            id,
            self.display_name(),
            self.latitude,
            self.longitude,
        ))
    }
}

/// A trip waypoint as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub id: String,
    pub location_id: String,
    pub order: i64,
    pub price: i64,
    #[serde(default)]
    pub is_passed: bool,
    #[serde(default)]
    pub is_next: bool,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub location: Option<LocationRecord>,
}

impl WaypointRecord {
    /// Convert to a domain waypoint.
    pub fn to_domain(&self) -> Result<Waypoint, TripError> {
        let location_id = LocationId::parse(&self.location_id).map_err(|e| {
            TripError::InvalidRecord(format!("waypoint location id {:?}: {e}", self.location_id))
        })?;

        let location = match &self.location {
            Some(record) => Some(record.to_domain()?),
            None => None,
        };

        Ok(Waypoint {
            id: WaypointId(self.id.clone()),
            location_id,
            order: self.order,
            price: self.price,
            is_passed: self.is_passed,
            is_next: self.is_next,
            is_custom: self.is_custom,
            location,
        })
    }
}

/// A route template as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub origin_id: String,
    pub destination_id: String,
    pub route_price: i64,
    #[serde(default)]
    pub city_route: bool,
    #[serde(default)]
    pub origin: Option<LocationRecord>,
    #[serde(default)]
    pub destination: Option<LocationRecord>,
}

impl RouteRecord {
    /// Convert to a domain route.
    ///
    /// Returns `None` when the backend omitted either embedded endpoint
    /// location; a trip without a usable route still converts, it just
    /// answers every availability query with the empty set.
    pub fn to_domain(&self) -> Result<Option<Route>, TripError> {
        let (Some(origin), Some(destination)) = (&self.origin, &self.destination) else {
            return Ok(None);
        };

        Ok(Some(Route {
            origin: origin.to_domain()?,
            destination: destination.to_domain()?,
            route_price: self.route_price,
            is_city_route: self.city_route,
        }))
    }
}

/// Vehicle summary attached to a trip record.
///
/// Only the operating company matters here (it is a listing filter);
/// capacity and plate data stay on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Trip lifecycle state on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatusRecord {
    Scheduled,
    InProgress,
    Completed,
    NotCompleted,
}

impl From<TripStatusRecord> for TripStatus {
    fn from(value: TripStatusRecord) -> Self {
        match value {
            TripStatusRecord::Scheduled => TripStatus::Scheduled,
            TripStatusRecord::InProgress => TripStatus::InProgress,
            TripStatusRecord::Completed => TripStatus::Completed,
            TripStatusRecord::NotCompleted => TripStatus::NotCompleted,
        }
    }
}

/// A trip as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: i64,
    pub status: TripStatusRecord,
    #[serde(default)]
    pub route: Option<RouteRecord>,
    /// The backend sends `null` for trips without waypoints
    #[serde(default)]
    pub waypoints: Option<Vec<WaypointRecord>>,
    #[serde(default)]
    pub seats: Option<u32>,
    #[serde(default)]
    pub remaining_seats: Option<u32>,
    /// Unix seconds
    #[serde(default)]
    pub departure_time: Option<i64>,
    #[serde(default)]
    pub vehicle: Option<VehicleRecord>,
}

impl TripRecord {
    /// Convert to a domain trip snapshot.
    pub fn to_domain(&self) -> Result<Trip, TripError> {
        let route = match &self.route {
            Some(record) => record.to_domain()?,
            None => None,
        };

        let waypoints = self
            .waypoints
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(WaypointRecord::to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        let departure_time: Option<DateTime<Utc>> = self
            .departure_time
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Ok(Trip {
            id: TripId(self.id),
            status: self.status.into(),
            route,
            waypoints,
            seats: self.seats,
            remaining_seats: self.remaining_seats,
            departure_time,
        })
    }

    /// Company name of the operating vehicle, if known.
    pub fn company_name(&self) -> Option<&str> {
        self.vehicle.as_ref().and_then(|v| v.company_name.as_deref())
    }
}

/// The paginated listing envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedTripsRecord {
    pub trips: Vec<TripRecord>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    /// Realtime session id, refreshed by the backend on each response
    #[serde(default)]
    pub sse_uuid: Option<String>,
}

/// One page of domain trips plus paging metadata.
#[derive(Debug, Clone)]
pub struct TripPage {
    pub trips: Vec<Trip>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub session: Option<String>,
}

impl PaginatedTripsRecord {
    /// Convert the whole page to domain trips.
    pub fn to_domain(&self) -> Result<TripPage, TripError> {
        let trips = self
            .trips
            .iter()
            .map(TripRecord::to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TripPage {
            trips,
            total: self.total,
            limit: self.limit,
            offset: self.offset,
            session: self.sse_uuid.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location_record(id: &str) -> LocationRecord {
        LocationRecord {
            id: id.to_string(),
            latitude: -1.95,
            longitude: 30.06,
            code: Some("NYB".to_string()),
            google_place_name: Some("Nyabugogo Bus Terminal".to_string()),
            custom_name: None,
        }
    }

    #[test]
    fn display_name_preference_order() {
        let mut record = location_record("loc-1");
        assert_eq!(record.display_name(), "Nyabugogo Bus Terminal");

        record.custom_name = Some("Nyabugogo".to_string());
        assert_eq!(record.display_name(), "Nyabugogo");

        record.custom_name = None;
        record.google_place_name = None;
        assert_eq!(record.display_name(), "NYB");

        record.code = None;
        assert_eq!(record.display_name(), "loc-1");
    }

    #[test]
    fn location_invalid_id_fails_conversion() {
        let record = LocationRecord {
            id: "".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            code: None,
            google_place_name: None,
            custom_name: None,
        };
        assert!(matches!(record.to_domain(), Err(TripError::InvalidRecord(_))));
    }

    #[test]
    fn route_without_embedded_endpoints_converts_to_none() {
        let record = RouteRecord {
            origin_id: "loc-o".to_string(),
            destination_id: "loc-d".to_string(),
            route_price: 2500,
            city_route: false,
            origin: None,
            destination: Some(location_record("loc-d")),
        };
        assert_eq!(record.to_domain().unwrap(), None);
    }

    #[test]
    fn trip_record_decodes_backend_json() {
        let json = r#"{
            "id": 17,
            "route_id": 3,
            "status": "IN_PROGRESS",
            "departure_time": 1714989600,
            "seats": 30,
            "connection_mode": "ONLINE",
            "route": {
                "id": 3,
                "origin_id": "loc-o",
                "destination_id": "loc-d",
                "route_price": 2500,
                "city_route": true,
                "origin": {"id": "loc-o", "latitude": -1.95, "longitude": 30.06, "custom_name": "Downtown"},
                "destination": {"id": "loc-d", "latitude": -1.97, "longitude": 30.10, "custom_name": "Airport"}
            },
            "waypoints": [
                {"id": "wp-1", "trip_id": 17, "location_id": "loc-o", "order": 0, "price": 0, "is_passed": true, "is_next": false, "is_custom": false},
                {"id": "wp-2", "trip_id": 17, "location_id": "loc-m", "order": 1, "price": 900, "is_passed": false, "is_next": true, "is_custom": true}
            ]
        }"#;

        let record: TripRecord = serde_json::from_str(json).unwrap();
        let trip = record.to_domain().unwrap();

        assert_eq!(trip.id, TripId(17));
        assert_eq!(trip.status, TripStatus::InProgress);
        assert!(trip.departure_time.is_some());
        assert_eq!(trip.seats, Some(30));
        assert_eq!(trip.remaining_seats, None);

        let route = trip.route.as_ref().unwrap();
        assert!(route.is_city_route);
        assert_eq!(route.origin.name, "Downtown");
        assert_eq!(route.route_price, 2500);

        assert_eq!(trip.waypoints.len(), 2);
        assert!(trip.waypoints[0].is_passed);
        assert!(trip.waypoints[1].is_next);
        assert!(trip.waypoints[1].is_custom);
    }

    #[test]
    fn trip_record_null_waypoints() {
        let json = r#"{"id": 1, "status": "SCHEDULED", "waypoints": null}"#;
        let record: TripRecord = serde_json::from_str(json).unwrap();
        let trip = record.to_domain().unwrap();

        assert!(trip.waypoints.is_empty());
        assert!(trip.route.is_none());
    }

    #[test]
    fn unknown_status_rejected() {
        let json = r#"{"id": 1, "status": "TELEPORTING"}"#;
        assert!(serde_json::from_str::<TripRecord>(json).is_err());
    }

    #[test]
    fn paginated_envelope_roundtrip() {
        let json = r#"{
            "trips": [{"id": 1, "status": "SCHEDULED"}],
            "total": 41,
            "limit": 20,
            "offset": 20,
            "sse_uuid": "abc-123"
        }"#;

        let record: PaginatedTripsRecord = serde_json::from_str(json).unwrap();
        let page = record.to_domain().unwrap();

        assert_eq!(page.trips.len(), 1);
        assert_eq!(page.total, 41);
        assert_eq!(page.offset, 20);
        assert_eq!(page.session.as_deref(), Some("abc-123"));
    }

    #[test]
    fn envelope_without_session() {
        let json = r#"{"trips": [], "total": 0, "limit": 20, "offset": 0}"#;
        let record: PaginatedTripsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.to_domain().unwrap().session, None);
    }

    #[test]
    fn company_name_accessor() {
        let mut record: TripRecord =
            serde_json::from_str(r#"{"id": 1, "status": "SCHEDULED"}"#).unwrap();
        assert_eq!(record.company_name(), None);

        record.vehicle = Some(VehicleRecord {
            company_name: Some("Volcano Express".to_string()),
        });
        assert_eq!(record.company_name(), Some("Volcano Express"));
    }
}
