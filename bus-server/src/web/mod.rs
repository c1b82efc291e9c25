//! Web layer for the bus booking server.
//!
//! JSON endpoints for listing trips, querying availability and fares,
//! submitting bookings, and following the realtime trip stream.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
