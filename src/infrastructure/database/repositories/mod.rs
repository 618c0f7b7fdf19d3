//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod amenity_repository;
pub mod booking_repository;
pub mod holiday_repository;
pub mod property_code_repository;
pub mod property_repository;
pub mod repository_provider;
pub mod role_repository;
pub mod subscription_repository;
pub mod ticket_repository;
pub mod user_repository;
pub mod user_session_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

/// Unique-constraint failures become `Conflict`, everything else `Database`.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::from(e)
}
