//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::amenity::AmenityRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::holiday::HolidayRepository;
use crate::domain::property::PropertyRepository;
use crate::domain::property_code::PropertyCodeRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::role::RoleRepository;
use crate::domain::subscription::SubscriptionRepository;
use crate::domain::ticket::TicketRepository;
use crate::domain::user::UserRepository;
use crate::domain::user_session::UserSessionRepository;

use super::amenity_repository::SeaOrmAmenityRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::holiday_repository::SeaOrmHolidayRepository;
use super::property_code_repository::SeaOrmPropertyCodeRepository;
use super::property_repository::SeaOrmPropertyRepository;
use super::role_repository::SeaOrmRoleRepository;
use super::subscription_repository::SeaOrmSubscriptionRepository;
use super::ticket_repository::SeaOrmTicketRepository;
use super::user_repository::SeaOrmUserRepository;
use super::user_session_repository::SeaOrmUserSessionRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let property = repos.properties().find_by_id(7).await?;
/// let booking = repos.bookings().find_by_booking_id("FX20240701").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    roles: SeaOrmRoleRepository,
    users: SeaOrmUserRepository,
    user_sessions: SeaOrmUserSessionRepository,
    properties: SeaOrmPropertyRepository,
    amenities: SeaOrmAmenityRepository,
    property_codes: SeaOrmPropertyCodeRepository,
    holidays: SeaOrmHolidayRepository,
    bookings: SeaOrmBookingRepository,
    subscriptions: SeaOrmSubscriptionRepository,
    tickets: SeaOrmTicketRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            roles: SeaOrmRoleRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            user_sessions: SeaOrmUserSessionRepository::new(db.clone()),
            properties: SeaOrmPropertyRepository::new(db.clone()),
            amenities: SeaOrmAmenityRepository::new(db.clone()),
            property_codes: SeaOrmPropertyCodeRepository::new(db.clone()),
            holidays: SeaOrmHolidayRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            subscriptions: SeaOrmSubscriptionRepository::new(db.clone()),
            tickets: SeaOrmTicketRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn roles(&self) -> &dyn RoleRepository {
        &self.roles
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn user_sessions(&self) -> &dyn UserSessionRepository {
        &self.user_sessions
    }

    fn properties(&self) -> &dyn PropertyRepository {
        &self.properties
    }

    fn amenities(&self) -> &dyn AmenityRepository {
        &self.amenities
    }

    fn property_codes(&self) -> &dyn PropertyCodeRepository {
        &self.property_codes
    }

    fn holidays(&self) -> &dyn HolidayRepository {
        &self.holidays
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn subscriptions(&self) -> &dyn SubscriptionRepository {
        &self.subscriptions
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }
}
