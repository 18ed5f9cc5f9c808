//! Booking rules: input validation, identifier generation, and the
//! confirmation message sent to the customer.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::parking::{ParkingSlot, TimeSlot};
use crate::phone::validate_local_phone;

pub const BOOKING_ID_PREFIX: &str = "PK";
const BOOKING_ID_RANDOM_LEN: usize = 5;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const WELCOME_MESSAGE: &str =
    "Welcome to ParkEasy! You're now logged in and ready to book parking spots across Vizag.";

/// Input that passed the form-level checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub customer_name: String,
    pub phone: String,
    pub time_slot_id: Uuid,
}

pub fn validate_booking_input(
    customer_name: &str,
    phone: &str,
    time_slot_id: Option<Uuid>,
) -> Result<ValidatedBooking, ValidationError> {
    let customer_name = customer_name.trim();
    if customer_name.is_empty() {
        return Err(ValidationError::MissingField("customer_name".to_string()));
    }
    if phone.is_empty() {
        return Err(ValidationError::MissingField("phone".to_string()));
    }
    validate_local_phone(phone)?;
    let time_slot_id = time_slot_id.ok_or(ValidationError::MissingTimeSlot)?;

    Ok(ValidatedBooking {
        customer_name: customer_name.to_string(),
        phone: phone.to_string(),
        time_slot_id,
    })
}

/// Picks the chosen time slot out of a fresh read of the slot's inventory.
pub fn select_time_slot(
    time_slots: &[TimeSlot],
    time_slot_id: Uuid,
) -> Result<&TimeSlot, ValidationError> {
    let time_slot = time_slots
        .iter()
        .find(|ts| ts.id == time_slot_id)
        .ok_or_else(|| ValidationError::UnknownTimeSlot(time_slot_id.to_string()))?;
    if !time_slot.is_available {
        return Err(ValidationError::TimeSlotUnavailable(time_slot_id.to_string()));
    }
    Ok(time_slot)
}

pub fn encode_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// `PK` + base36(unix millis) + five random base36 characters, upper-cased.
pub fn generate_booking_id<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    let random: String = (0..BOOKING_ID_RANDOM_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}{}", BOOKING_ID_PREFIX, encode_base36(millis), random).to_uppercase()
}

/// Checks the shape produced by [`generate_booking_id`].
pub fn is_booking_id(id: &str) -> bool {
    let Some(body) = id.strip_prefix(BOOKING_ID_PREFIX) else {
        return false;
    };
    body.len() > BOOKING_ID_RANDOM_LEN
        && body
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}

pub fn build_booking(
    id: String,
    slot: &ParkingSlot,
    time_slot: &TimeSlot,
    input: ValidatedBooking,
    now: DateTime<Utc>,
) -> Booking {
    Booking {
        id,
        slot_id: slot.id,
        time_slot_id: time_slot.id,
        location_name: slot.location_name.clone(),
        slot_number: slot.number,
        customer_name: input.customer_name,
        customer_phone: input.phone,
        start_time: time_slot.start_time,
        end_time: time_slot.end_time,
        total_price: time_slot.price,
        status: BookingStatus::Active,
        created_at: now,
    }
}

pub fn confirmation_message(booking: &Booking) -> String {
    format!(
        "ParkEasy Booking Confirmed!\n\nBooking ID: {}\nLocation: {}\nSlot: {}\nTime: {}-{}\nAmount: ₹{}\n\nShow this message at the counter. Happy Parking!",
        booking.id,
        booking.location_name,
        booking.slot_number,
        booking.start_time,
        booking.end_time,
        booking.total_price
    )
}

pub fn check_transition(from: BookingStatus, to: BookingStatus) -> Result<(), ValidationError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(ValidationError::InvalidStatusTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
