/// Phone login with one-time codes
pub mod auth;
/// Booking workflow and booking lookups
pub mod booking;
/// Locations, slots, and time slots
pub mod inventory;
/// Session notification list
pub mod notifications;
/// Availability estimates
pub mod prediction;
