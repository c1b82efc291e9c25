//! Application state for the web layer.

use std::sync::Arc;

use crate::stream::{SessionStore, TripCache};
use crate::trips::TripClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Trips backend client
    pub trips: Arc<TripClient>,

    /// Trip snapshot cache, patched by stream events
    pub cache: Arc<TripCache>,

    /// Realtime session store
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(trips: TripClient, cache: TripCache, sessions: SessionStore) -> Self {
        Self {
            trips: Arc::new(trips),
            cache: Arc::new(cache),
            sessions: Arc::new(sessions),
        }
    }
}
