//! Repository provider for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` - unified access to all per-aggregate repositories
//! - `DomainResult` - standard result type for domain operations

use super::amenity::AmenityRepository;
use super::booking::BookingRepository;
use super::holiday::HolidayRepository;
use super::property::PropertyRepository;
use super::property_code::PropertyCodeRepository;
use super::role::RoleRepository;
use super::subscription::SubscriptionRepository;
use super::ticket::TicketRepository;
use super::user::UserRepository;
use super::user_session::UserSessionRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let property = repos.properties().find_by_id(7).await?;
///     let latest = repos.bookings().find_by_booking_id("FX20240701").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn roles(&self) -> &dyn RoleRepository;
    fn users(&self) -> &dyn UserRepository;
    fn user_sessions(&self) -> &dyn UserSessionRepository;
    fn properties(&self) -> &dyn PropertyRepository;
    fn amenities(&self) -> &dyn AmenityRepository;
    fn property_codes(&self) -> &dyn PropertyCodeRepository;
    fn holidays(&self) -> &dyn HolidayRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn subscriptions(&self) -> &dyn SubscriptionRepository;
    fn tickets(&self) -> &dyn TicketRepository;
}
