//! Mock trips client for development and tests.
//!
//! Serves trip records from a JSON file (or in-memory records) as if
//! they were live backend responses, applying the same text filters and
//! paging the real listing endpoint would.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use super::client::TripFilter;
use super::error::TripError;
use super::types::{TripPage, TripRecord};

/// Mock trips client backed by static records.
#[derive(Clone)]
pub struct MockTripClient {
    records: Arc<RwLock<Vec<TripRecord>>>,
    /// Counter for fabricated session ids
    session_counter: Arc<AtomicU64>,
}

impl MockTripClient {
    /// Create a mock client from in-memory records.
    pub fn from_records(records: Vec<TripRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            session_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a mock client from a JSON file holding an array of trip
    /// records.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TripError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| TripError::Api {
            status: 0,
            message: format!("failed to read {path:?}: {e}"),
        })?;

        let records: Vec<TripRecord> = serde_json::from_str(&json).map_err(|e| TripError::Json {
            message: format!("failed to parse {path:?}: {e}"),
            body: None,
        })?;

        Ok(Self::from_records(records))
    }

    /// Fetch one page of trips matching the filter.
    ///
    /// Mimics the real `TripClient::fetch_trips` interface. Every
    /// response carries a freshly fabricated session id, matching the
    /// backend's refresh-on-each-response behaviour.
    pub async fn fetch_trips(&self, filter: &TripFilter) -> Result<TripPage, TripError> {
        let records = self.records.read().await;

        let matching: Vec<&TripRecord> = records
            .iter()
            .filter(|r| record_matches(r, filter))
            .collect();

        let total = matching.len() as u64;
        let offset = filter.offset;
        let limit = filter.limit();

        let trips = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|r| r.to_domain())
            .collect::<Result<Vec<_>, _>>()?;

        let session = self.session_counter.fetch_add(1, Ordering::Relaxed);

        Ok(TripPage {
            trips,
            total,
            limit,
            offset,
            session: Some(format!("mock-session-{session}")),
        })
    }

    /// Replace the served records (useful for tests simulating refresh).
    pub async fn set_records(&self, records: Vec<TripRecord>) {
        *self.records.write().await = records;
    }
}

/// Whether a record matches the listing filter.
///
/// Text filters are case-insensitive substring matches, like the
/// backend's.
fn record_matches(record: &TripRecord, filter: &TripFilter) -> bool {
    let route = record.route.as_ref();

    if let Some(origin) = &filter.origin {
        let name = route.and_then(|r| r.origin.as_ref()).map(|l| l.display_name());
        if !name.is_some_and(|n| contains_ignore_case(n, origin)) {
            return false;
        }
    }

    if let Some(destination) = &filter.destination {
        let name = route
            .and_then(|r| r.destination.as_ref())
            .map(|l| l.display_name());
        if !name.is_some_and(|n| contains_ignore_case(n, destination)) {
            return false;
        }
    }

    if let Some(company) = &filter.company {
        if !record
            .company_name()
            .is_some_and(|n| contains_ignore_case(n, company))
        {
            return false;
        }
    }

    if let Some(city_route) = filter.city_route {
        if route.is_none_or(|r| r.city_route != city_route) {
            return false;
        }
    }

    true
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
