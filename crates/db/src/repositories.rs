pub mod booking;
pub mod location;
pub mod occupancy;
pub mod slot;
pub mod time_slot;
