pub mod booking;
pub mod errors;
pub mod estimator;
pub mod models;
pub mod phone;
pub mod repository;
pub mod retry;
