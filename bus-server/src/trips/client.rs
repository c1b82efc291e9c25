//! Trips backend HTTP client.
//!
//! Async client for the paginated trip listing and booking submission
//! endpoints. Listing responses carry an `sse_uuid` correlating the
//! query with the realtime stream; follow-up pages echo it back via
//! `session_uuid` so the backend can extend the same session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{LocationId, TripId};

use super::error::TripError;
use super::types::{PaginatedTripsRecord, TripPage};

/// Default base URL for the trips backend.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default page size.
const DEFAULT_LIMIT: u32 = 20;

/// Configuration for the trips client.
#[derive(Debug, Clone)]
pub struct TripClientConfig {
    /// Base URL for the backend API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TripClientConfig {
    /// Create a config with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TripClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Listing filter for the paginated trips endpoint.
///
/// Text filters match against location and company names on the backend;
/// `city_route` narrows to one route mode. The filter identity (that is,
/// everything except paging and session state) is what a realtime
/// session is correlated with; see [`TripFilter::fingerprint`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilter {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub company: Option<String>,
    pub city_route: Option<bool>,
    pub limit: Option<u32>,
    pub offset: u32,
    /// Session to extend, echoed from an earlier page's `sse_uuid`
    pub session_uuid: Option<String>,
}

impl TripFilter {
    /// Filter by origin name text.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Filter by destination name text.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Filter by operating company name text.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Filter by route mode.
    pub fn with_city_route(mut self, city_route: bool) -> Self {
        self.city_route = Some(city_route);
        self
    }

    /// Set the page offset.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Attach a session to extend.
    pub fn with_session(mut self, session_uuid: impl Into<String>) -> Self {
        self.session_uuid = Some(session_uuid.into());
        self
    }

    /// Effective page size.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Stable identity of this filter, ignoring paging and session
    /// state. Two filters with the same fingerprint share one realtime
    /// session.
    pub fn fingerprint(&self) -> String {
        format!(
            "origin={};destination={};company={};city_route={};limit={}",
            self.origin.as_deref().unwrap_or(""),
            self.destination.as_deref().unwrap_or(""),
            self.company.as_deref().unwrap_or(""),
            self.city_route.map_or(String::new(), |b| b.to_string()),
            self.limit(),
        )
    }

    /// Render as query parameters for the listing endpoint.
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(origin) = &self.origin {
            params.push(("origin", origin.clone()));
        }
        if let Some(destination) = &self.destination {
            params.push(("destination", destination.clone()));
        }
        if let Some(company) = &self.company {
            params.push(("company", company.clone()));
        }
        if let Some(city_route) = self.city_route {
            params.push(("city_route", city_route.to_string()));
        }
        params.push(("limit", self.limit().to_string()));
        params.push(("offset", self.offset.to_string()));

        // The backend only honours a session on follow-up pages
        if let Some(session) = &self.session_uuid {
            if self.offset > 0 {
                params.push(("session_uuid", session.clone()));
            }
        }

        params
    }
}

/// A booking ready for submission.
///
/// Only constructed after the booking guard allowed the pair; `fare`
/// comes from the engine's segment fare for the same pair.
#[derive(Debug, Clone, Serialize)]
pub struct BookingSubmission {
    pub trip_id: i64,
    pub pickup_location_id: String,
    pub dropoff_location_id: String,
    pub number_of_tickets: u32,
    pub total_amount: i64,
}

impl BookingSubmission {
    /// Assemble a submission from domain values.
    pub fn new(
        trip_id: TripId,
        from: &LocationId,
        to: &LocationId,
        seats: u32,
        fare: i64,
    ) -> Self {
        Self {
            trip_id: trip_id.0,
            pickup_location_id: from.as_str().to_string(),
            dropoff_location_id: to.as_str().to_string(),
            number_of_tickets: seats,
            total_amount: fare,
        }
    }
}

/// Backend acknowledgement of a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingAck {
    pub message: String,
    #[serde(default)]
    pub payment_reference: Option<String>,
}

/// Trips backend API client.
#[derive(Debug, Clone)]
pub struct TripClient {
    http: reqwest::Client,
    base_url: String,
}

impl TripClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TripClientConfig) -> Result<Self, TripError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch one page of trips matching the filter.
    pub async fn fetch_trips(&self, filter: &TripFilter) -> Result<TripPage, TripError> {
        let url = format!("{}/navig/trips", self.base_url);

        debug!(url = %url, offset = filter.offset, "fetching trips");

        let response = self.http.get(&url).query(&filter.query_params()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TripError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let page: PaginatedTripsRecord =
            serde_json::from_str(&body).map_err(|e| TripError::Json {
                message: e.to_string(),
                body: Some(truncate_body(&body)),
            })?;

        page.to_domain()
    }

    /// Submit a booking for an already-validated (board, alight) pair.
    pub async fn submit_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<BookingAck, TripError> {
        let url = format!("{}/book/bookings", self.base_url);

        debug!(url = %url, trip_id = submission.trip_id, "submitting booking");

        let response = self.http.post(&url).json(submission).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TripError::TripNotFound(TripId(submission.trip_id)));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TripError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TripError::Json {
            message: e.to_string(),
            body: Some(truncate_body(&body)),
        })
    }
}

/// Cap error-context bodies so log lines stay readable.
///
/// The cut lands on a char boundary, never inside a multi-byte
/// character.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 512;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
