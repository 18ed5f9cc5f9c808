pub mod auth;
pub mod booking;
pub mod parking;
pub mod prediction;
