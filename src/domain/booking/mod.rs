//! Booking aggregate
//!
//! Contains the Booking entity, the booking identifier rules, and the
//! repository interface for bookings.

pub mod booking_id;
pub mod model;
pub mod repository;

pub use booking_id::{
    format_booking_id, next_booking_id, parse_sequence, BookingIdError, BOOKING_ID_PREFIX,
};
pub use model::{validate_stay, Booking, BookingFilter, BookingStatus, NewBooking, StayOutcome};
pub use repository::BookingRepository;
