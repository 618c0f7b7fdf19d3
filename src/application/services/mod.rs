//! Application services
//!
//! One service per aggregate. Handlers stay thin and delegate here; every
//! existence, uniqueness and authorization rule lives in this layer.

mod amenity;
mod auth;
mod booking;
mod holiday;
mod property;
mod property_code;
mod reminder;
mod role;
mod subscription;
mod ticket;
mod user;

pub use amenity::{AmenityInput, AmenityService};
pub use auth::{AuthService, AuthenticatedUser, LoginResult};
pub use booking::{BookingService, BookingUpdate, CreateBooking};
pub use holiday::HolidayService;
pub use property::{ImageUpload, PropertyService};
pub use property_code::PropertyCodeService;
pub use reminder::{BookingReminder, ReminderSettings};
pub use role::RoleService;
pub use subscription::SubscriptionService;
pub use ticket::{ContactRequest, MaintenanceRequest, TicketService};
pub use user::{CreateUser, UserService};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use sea_orm::DatabaseConnection;

    use crate::domain::property::{NewProperty, Property};
    use crate::domain::repositories::RepositoryProvider;
    use crate::domain::role::{NewRole, ADMIN_ROLE, OWNER_ROLE};
    use crate::domain::user::{NewUser, User};
    use crate::infrastructure::database::memory_db;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    use super::AuthenticatedUser;

    pub struct Fixture {
        pub repos: Arc<dyn RepositoryProvider>,
        pub admin: User,
        pub owner: User,
        pub property: Property,
    }

    impl Fixture {
        pub fn admin_caller(&self) -> AuthenticatedUser {
            AuthenticatedUser::for_user(&self.admin)
        }

        pub fn owner_caller(&self) -> AuthenticatedUser {
            AuthenticatedUser::for_user(&self.owner)
        }
    }

    /// Migrated in-memory database with an admin, an owner and one property.
    pub async fn fixture() -> Fixture {
        fixture_on(memory_db().await).await
    }

    /// Same records on a caller-supplied database.
    pub async fn fixture_on(db: DatabaseConnection) -> Fixture {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));

        let mut users = Vec::new();
        for (role_name, email) in [(ADMIN_ROLE, "admin@example.com"), (OWNER_ROLE, "owner@example.com")] {
            let role = repos
                .roles()
                .create(NewRole {
                    role_name: role_name.into(),
                    description: None,
                    created_by: None,
                })
                .await
                .unwrap();
            let user = repos
                .users()
                .create(NewUser {
                    first_name: role_name.into(),
                    last_name: "User".into(),
                    email: email.into(),
                    password_hash: bcrypt::hash("password123", 4).unwrap(),
                    phone: None,
                    role_id: role.id,
                    created_by: None,
                })
                .await
                .unwrap();
            users.push(user);
        }

        let property = repos
            .properties()
            .create(NewProperty {
                property_name: "Lake House".into(),
                address: "1 Shore Rd".into(),
                city: "Tahoe".into(),
                state: Some("CA".into()),
                country: "US".into(),
                zipcode: None,
                description: None,
                total_shares: 8,
                guest_capacity: 4,
                created_by: None,
            })
            .await
            .unwrap();

        let owner = users.pop().unwrap();
        let admin = users.pop().unwrap();
        Fixture {
            repos,
            admin,
            owner,
            property,
        }
    }
}
