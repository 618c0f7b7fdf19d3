//! Domain layer
//!
//! Each aggregate lives in its own module with its model and repository
//! interface. Repository traits are implemented in
//! `infrastructure::database::repositories`.

pub mod amenity;
pub mod booking;
pub mod holiday;
pub mod property;
pub mod property_code;
pub mod repositories;
pub mod role;
pub mod subscription;
pub mod ticket;
pub mod user;
pub mod user_session;

pub use amenity::{Amenity, AmenityRepository};
pub use booking::{Booking, BookingRepository, BookingStatus, StayOutcome};
pub use holiday::{Holiday, HolidayRepository};
pub use property::{Property, PropertyImage, PropertyRepository};
pub use property_code::{PropertyCode, PropertyCodeRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use role::{Role, RoleRepository};
pub use subscription::{Subscription, SubscriptionRepository};
pub use ticket::{Ticket, TicketCategory, TicketRepository, TicketStatus};
pub use user::{User, UserRepository};
pub use user_session::{UserSession, UserSessionRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
