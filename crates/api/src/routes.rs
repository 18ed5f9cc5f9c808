pub mod auth;
pub mod booking;
pub mod health;
pub mod inventory;
pub mod prediction;
