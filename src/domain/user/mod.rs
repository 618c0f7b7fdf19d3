//! User aggregate
//!
//! Contains the User entity, its write models, and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewUser, User, UserChanges, UserFilter};
pub use repository::UserRepository;
