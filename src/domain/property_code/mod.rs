//! Property code aggregate
//!
//! Access codes (door, gate, Wi-Fi, alarm...) attached to a property.

pub mod model;
pub mod repository;

pub use model::{NewPropertyCode, PropertyCode, PropertyCodeChanges};
pub use repository::PropertyCodeRepository;
