//! # ParkEasy Messaging
//!
//! Client for the third-party SMS and one-time-code API. Every call
//! normalizes the destination number, checks upstream health, and then
//! performs the request under a [`RetryPolicy`](parkeasy_core::retry::RetryPolicy).

pub mod client;
pub mod config;

pub use client::{MessagingError, TextflowClient};
pub use config::MessagingConfig;
