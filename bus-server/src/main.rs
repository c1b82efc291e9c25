use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bus_server::stream::{SessionConfig, SessionStore, TripCache};
use bus_server::trips::{TripClient, TripClientConfig};
use bus_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Trips backend location from environment
    let config = match std::env::var("BUS_BACKEND_URL") {
        Ok(url) => TripClientConfig::new(url),
        Err(_) => {
            eprintln!("Warning: BUS_BACKEND_URL not set, using the default backend URL.");
            TripClientConfig::default()
        }
    };

    let trips = TripClient::new(config).expect("Failed to create trips client");
    let cache = TripCache::new();
    let sessions = SessionStore::new(SessionConfig::default());

    let state = AppState::new(trips, cache, sessions);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Bus booking server listening on http://{addr}");
    info!("  GET  /health                   - Health check");
    info!("  GET  /trips                    - List trips");
    info!("  GET  /trips/:id/availability   - Boardable and alightable stops");
    info!("  GET  /trips/:id/fare           - Segment fare");
    info!("  POST /bookings                 - Book a segment");
    info!("  GET  /events/:session          - Realtime trip stream");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
