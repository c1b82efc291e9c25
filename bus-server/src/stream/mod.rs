//! Realtime trip stream collaborator.
//!
//! The backend pushes named events that patch one trip by id. This
//! module holds the event types, the caller-side snapshot cache those
//! events patch, and the TTL store correlating listing filters with
//! stream sessions. The availability engine stays event-unaware: it is
//! simply re-invoked against whatever snapshot the cache holds.

mod cache;
mod events;
mod session;

pub use cache::TripCache;
pub use events::{ConnectionInfo, Heartbeat, TripEvent};
pub use session::{SessionConfig, SessionStore};
