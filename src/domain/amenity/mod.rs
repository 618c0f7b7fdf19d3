//! Amenity aggregate

pub mod model;
pub mod repository;

pub use model::{Amenity, AmenityChanges, NewAmenity};
pub use repository::AmenityRepository;
