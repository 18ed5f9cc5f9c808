//! # Booking Handlers
//!
//! The booking workflow validates the form, re-reads the chosen time slot
//! from inventory, claims it, stores the booking, and finally texts the
//! customer a confirmation.
//!
//! The time slot is checked against a fresh read at submission time rather
//! than trusting what the client saw when it rendered the slot list, and the
//! claim itself is a conditional update, so two customers racing for the
//! same hour cannot both succeed.
//!
//! Message delivery happens after the booking is stored and is bounded by
//! the state's notification timeout. A failed, rejected, or slow SMS is
//! reported as a warning alongside the confirmed booking instead of failing
//! the request.
//!
//! Bookings are only visible to, and changeable by, the session whose phone
//! made them.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use parkeasy_core::{
    booking::{
        build_booking, check_transition, confirmation_message, generate_booking_id,
        select_time_slot, validate_booking_input,
    },
    errors::{ParkError, ParkResult, ValidationError},
    models::booking::{
        Booking, BookingStatus, CreateBookingRequest, CreateBookingResponse, NotificationStatus,
        UpdateBookingStatusRequest,
    },
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::{
    middleware::{
        auth::{CurrentSession, MaybeSession},
        error_handling::AppError,
    },
    ApiState,
};

/// Runs the booking workflow against the state's collaborators.
///
/// # Errors
///
/// * `ParkError::Validation` - Bad form input, unknown time slot, or the
///   time slot is no longer available
/// * `ParkError::NotFound` - The parking slot does not exist
/// * `ParkError::Database` - Inventory or booking storage failed
pub async fn submit_booking<R>(
    state: &ApiState,
    request: CreateBookingRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ParkResult<CreateBookingResponse>
where
    R: Rng + Send + ?Sized,
{
    let input = validate_booking_input(&request.customer_name, &request.phone, request.time_slot_id)?;

    let slot = state
        .inventory
        .get_slot(request.slot_id)
        .await?
        .ok_or_else(|| ParkError::NotFound(format!("Parking slot {} not found", request.slot_id)))?;

    let time_slots = state.inventory.get_time_slots(slot.id).await?;
    let time_slot = select_time_slot(&time_slots, input.time_slot_id)?.clone();

    if !state.inventory.claim_time_slot(slot.id, time_slot.id).await? {
        warn!("Time slot {} was taken before it could be claimed", time_slot.id);
        return Err(ValidationError::TimeSlotUnavailable(time_slot.id.to_string()).into());
    }

    let id = generate_booking_id(now, rng);
    let booking = build_booking(id, &slot, &time_slot, input, now);

    let booking = match state.bookings.create_booking(&booking).await {
        Ok(stored) => stored,
        Err(err) => {
            if let Err(release_err) = state.inventory.release_time_slot(slot.id, time_slot.id).await {
                error!(
                    "Failed to release time slot {} after booking insert failed: {}",
                    time_slot.id, release_err
                );
            }
            return Err(err);
        }
    };
    info!(
        "Booking {} confirmed for slot {} at {}",
        booking.id, booking.slot_number, booking.location_name
    );

    let message = confirmation_message(&booking);
    let delivery = timeout(
        state.notification_timeout,
        state.messaging.send_message(&booking.customer_phone, &message),
    )
    .await;
    let notification = match delivery {
        Ok(Ok(true)) => NotificationStatus::Sent,
        Ok(Ok(false)) => {
            warn!("Confirmation SMS for booking {} was not delivered", booking.id);
            NotificationStatus::NotDelivered
        }
        Ok(Err(err)) => {
            warn!("Confirmation SMS for booking {} failed: {}", booking.id, err);
            NotificationStatus::Failed(err.to_string())
        }
        Err(_) => {
            warn!(
                "Confirmation SMS for booking {} timed out after {:?}",
                booking.id, state.notification_timeout
            );
            NotificationStatus::Failed("SMS provider did not answer in time".to_string())
        }
    };

    let warning = notification.warning();
    Ok(CreateBookingResponse {
        booking,
        notification,
        warning,
    })
}

/// Loads a booking on behalf of `owner_phone`. Someone else's booking reads
/// as missing.
pub async fn owned_booking(state: &ApiState, id: &str, owner_phone: &str) -> ParkResult<Booking> {
    state
        .bookings
        .get_booking(id)
        .await?
        .filter(|booking| booking.customer_phone == owner_phone)
        .ok_or_else(|| ParkError::NotFound(format!("Booking {} not found", id)))
}

/// Applies a status transition; cancelling frees the time slot again.
///
/// The write is conditional on the status that was read, so of two racing
/// transitions only one lands and only the winner releases the time slot.
pub async fn change_booking_status(
    state: &ApiState,
    id: &str,
    status: BookingStatus,
    owner_phone: &str,
) -> ParkResult<Booking> {
    let booking = owned_booking(state, id, owner_phone).await?;

    check_transition(booking.status, status)?;

    let updated = state
        .bookings
        .update_status(id, booking.status, status)
        .await?
        .ok_or_else(|| {
            warn!("Booking {} changed before {} could be applied", id, status);
            ValidationError::InvalidStatusTransition {
                from: booking.status.to_string(),
                to: status.to_string(),
            }
        })?;

    if status == BookingStatus::Cancelled {
        state
            .inventory
            .release_time_slot(updated.slot_id, updated.time_slot_id)
            .await?;
    }
    info!("Booking {} moved from {} to {}", id, booking.status, status);

    Ok(updated)
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    MaybeSession(session): MaybeSession,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let mut rng = StdRng::from_entropy();
    let response = submit_booking(&state, payload, Utc::now(), &mut rng).await?;

    if let Some(session) = session {
        let note = response.warning.clone().unwrap_or_else(|| {
            format!(
                "Booking {} confirmed! Details sent to your phone",
                response.booking.id
            )
        });
        state.sessions.push_notification(session.token, note).await;
    }

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let booking = owned_booking(&state, &id, &session.phone).await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn list_my_bookings(
    State(state): State<Arc<ApiState>>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.bookings.list_bookings_by_phone(&session.phone).await?;
    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = change_booking_status(&state, &id, payload.status, &session.phone).await?;
    Ok(Json(booking))
}
