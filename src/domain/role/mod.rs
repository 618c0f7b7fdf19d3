//! Role aggregate

pub mod model;
pub mod repository;

pub use model::{NewRole, Role, RoleChanges, ADMIN_ROLE, OWNER_ROLE};
pub use repository::RoleRepository;
