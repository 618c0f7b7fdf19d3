//! Shared properties with their amenities and images

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
