//! HTTP route handlers.

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, Sse},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, error};

use crate::domain::{LocationId, TripId};
use crate::engine::{
    allowed_soon, available_destinations, available_origins, booking_decision, segment_fare,
    upcoming_stops,
};
use crate::stream::{ConnectionInfo, Heartbeat, TripEvent};
use crate::trips::{BookingSubmission, TripError};

use super::dto::*;
use super::state::AppState;

/// How often the event stream emits a heartbeat.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trips", get(list_trips))
        .route("/trips/:id/availability", get(trip_availability))
        .route("/trips/:id/fare", get(trip_fare))
        .route("/bookings", post(create_booking))
        .route("/events/:session", get(trip_events))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List trips matching the query, one page at a time.
///
/// Each response carries a realtime session id. Follow-up pages for the
/// same filter echo the stored session back to the backend so it keeps
/// streaming against one session instead of opening a new one per page.
async fn list_trips(
    State(state): State<AppState>,
    Query(req): Query<TripListRequest>,
) -> Result<Json<TripListResponse>, AppError> {
    let mut filter = req.to_filter();
    let fingerprint = filter.fingerprint();

    if filter.offset > 0 {
        if let Some(session) = state.sessions.get(&fingerprint).await {
            filter = filter.with_session(session.as_str());
        }
    }

    let page = state.trips.fetch_trips(&filter).await?;

    if let Some(session) = &page.session {
        state.sessions.insert(&fingerprint, session).await;
    }
    state.cache.insert_page(&page.trips).await;

    debug!(
        total = page.total,
        offset = page.offset,
        "listed trips"
    );

    Ok(Json(TripListResponse::from_page(&page)))
}

/// Boardable and alightable stops for one trip, as of its latest
/// known snapshot.
async fn trip_availability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let trip = state
        .cache
        .get(TripId(id))
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Trip {id} not known; list trips first"),
        })?;

    let origins = available_origins(&trip);
    let destinations = available_destinations(&trip);
    let soon = allowed_soon(&trip);
    let upcoming = upcoming_stops(&trip);

    Ok(Json(AvailabilityResponse {
        trip_id: id,
        origins: origins.iter().map(StopView::from_waypoint).collect(),
        destinations: destinations.iter().map(StopView::from_waypoint).collect(),
        allowed_soon: soon.iter().map(StopView::from_waypoint).collect(),
        upcoming_stops: upcoming.iter().map(StopView::from_waypoint).collect(),
    }))
}

/// Fare for a (board, alight) pair on one trip.
async fn trip_fare(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<FareQuery>,
) -> Result<Json<FareResponse>, AppError> {
    let from = LocationId::parse(&query.from).map_err(|e| AppError::BadRequest {
        message: format!("Invalid from location: {e}"),
    })?;
    let to = LocationId::parse(&query.to).map_err(|e| AppError::BadRequest {
        message: format!("Invalid to location: {e}"),
    })?;

    let trip = state
        .cache
        .get(TripId(id))
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Trip {id} not known; list trips first"),
        })?;

    let fare = segment_fare(&trip, &from, &to);

    Ok(Json(FareResponse {
        trip_id: id,
        from: query.from,
        to: query.to,
        fare,
    }))
}

/// Book a segment on a trip.
///
/// The pair is validated against the latest snapshot before anything is
/// sent upstream; a denied pair returns 422 with the stable denial
/// reason rather than an error.
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Response, AppError> {
    if req.seats == 0 {
        return Err(AppError::BadRequest {
            message: "At least one seat must be booked".to_string(),
        });
    }

    let from = LocationId::parse(&req.from).map_err(|e| AppError::BadRequest {
        message: format!("Invalid from location: {e}"),
    })?;
    let to = LocationId::parse(&req.to).map_err(|e| AppError::BadRequest {
        message: format!("Invalid to location: {e}"),
    })?;

    let trip = state
        .cache
        .get(TripId(req.trip_id))
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Trip {} not known; list trips first", req.trip_id),
        })?;

    let decision = booking_decision(&trip, &from, &to);
    if !decision.is_allowed() {
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(decision)).into_response());
    }

    let fare = segment_fare(&trip, &from, &to);
    let Some(amount) = fare.amount() else {
        return Err(AppError::BadRequest {
            message: "Fare is unresolvable for the requested pair".to_string(),
        });
    };
    let total_amount = amount.saturating_mul(i64::from(req.seats));

    let submission = BookingSubmission::new(trip.id, &from, &to, req.seats, total_amount);
    let ack = state.trips.submit_booking(&submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: ack.message,
            payment_reference: ack.payment_reference,
            total_amount,
        }),
    )
        .into_response())
}

/// Follow the realtime trip stream for a live session.
///
/// Emits a `connected` frame, then re-broadcasts every trip event this
/// process applies, with heartbeats in between. An unknown or expired
/// session gets 404; the consumer must re-list to obtain a fresh one.
async fn trip_events(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    if !state.sessions.is_live(&session) {
        return Err(AppError::NotFound {
            message: format!("Unknown or expired session {session}"),
        });
    }

    let connected = TripEvent::Connected(ConnectionInfo {
        client_id: format!("client-{}", Utc::now().timestamp_millis()),
        session_uuid: session,
        trip_count: state.cache.len().await as u64,
    });

    let rx = state.cache.subscribe();
    let heartbeat = tokio::time::interval_at(
        tokio::time::Instant::now() + HEARTBEAT_INTERVAL,
        HEARTBEAT_INTERVAL,
    );

    let live = stream::unfold((rx, heartbeat), |(mut rx, mut heartbeat)| async move {
        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    let event = TripEvent::Heartbeat(Heartbeat { timestamp: Utc::now() });
                    return Some((event, (rx, heartbeat)));
                }
                received = rx.recv() => match received {
                    Ok(event) => return Some((event, (rx, heartbeat))),
                    // Fell behind; skip the dropped events and continue
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return None,
                },
            }
        }
    });

    let frames = stream::once(async move { connected })
        .chain(live)
        .map(|event| Event::default().event(event.name()).json_data(&event));

    Ok(Sse::new(frames))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        match e {
            TripError::TripNotFound(id) => AppError::NotFound {
                message: format!("Trip {id} not found"),
            },
            other => AppError::Upstream {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        error!(status = %status, message = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
