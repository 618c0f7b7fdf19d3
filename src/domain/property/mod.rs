//! Property aggregate
//!
//! A shared property, its amenity assignments and uploaded images.

pub mod model;
pub mod repository;

pub use model::{NewProperty, NewPropertyImage, Property, PropertyChanges, PropertyFilter, PropertyImage};
pub use repository::PropertyRepository;
