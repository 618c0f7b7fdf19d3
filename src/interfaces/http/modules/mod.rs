pub mod amenities;
pub mod auth;
pub mod bookings;
pub mod health;
pub mod holidays;
pub mod metrics;
pub mod properties;
pub mod property_codes;
pub mod request_id;
pub mod roles;
pub mod sessions;
pub mod subscriptions;
pub mod tickets;
pub mod users;
