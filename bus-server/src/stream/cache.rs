//! Caller-side trip snapshot cache.
//!
//! Holds the latest known snapshot of every trip this process has seen,
//! keyed by id. Listing responses seed it; stream events patch it.
//! Applied events are re-broadcast to any connected stream consumers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tracing::warn;

use crate::domain::{Trip, TripId};

use super::events::TripEvent;

/// Broadcast channel depth for re-emitted events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Shared cache of trip snapshots, patched wholesale by stream events.
#[derive(Clone)]
pub struct TripCache {
    trips: Arc<RwLock<HashMap<TripId, Trip>>>,
    events: broadcast::Sender<TripEvent>,
}

impl TripCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            trips: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
    }

    /// Seed the cache with trips from a listing page.
    pub async fn insert_page(&self, trips: &[Trip]) {
        let mut guard = self.trips.write().await;
        for trip in trips {
            guard.insert(trip.id, trip.clone());
        }
    }

    /// The latest snapshot of one trip, if known.
    pub async fn get(&self, id: TripId) -> Option<Trip> {
        self.trips.read().await.get(&id).cloned()
    }

    /// Number of trips currently cached.
    pub async fn len(&self) -> usize {
        self.trips.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.trips.read().await.is_empty()
    }

    /// Apply a stream event to the cache and re-broadcast it.
    ///
    /// Trip-carrying events replace the stored snapshot wholesale. A
    /// record that fails domain conversion is logged and skipped; the
    /// event is still re-broadcast so consumers see the raw stream.
    pub async fn apply(&self, event: TripEvent) {
        if let Some(record) = event.trip() {
            match record.to_domain() {
                Ok(trip) => {
                    self.trips.write().await.insert(trip.id, trip);
                }
                Err(e) => {
                    warn!(trip_id = record.id, error = %e, "skipping unconvertible trip event");
                }
            }
        }

        // Errors only mean no subscriber is currently listening
        let _ = self.events.send(event);
    }

    /// Subscribe to events applied after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<TripEvent> {
        self.events.subscribe()
    }
}

impl Default for TripCache {
    fn default() -> Self {
        Self::new()
    }
}
