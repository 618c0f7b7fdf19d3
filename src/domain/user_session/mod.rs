//! User session aggregate
//!
//! One row per login. The bearer token itself is never stored, only its
//! SHA-256 hash.

pub mod model;
pub mod repository;

pub use model::{NewUserSession, UserSession};
pub use repository::UserSessionRepository;
