//! Bookings and their FX identifiers

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
