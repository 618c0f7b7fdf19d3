pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./propshare.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./propshare.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Default::default()
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!(url = %config.url, "Connecting to database");

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Fresh, migrated in-memory database.
///
/// One pooled connection: every SQLite `:memory:` connection is its own
/// database.
#[cfg(test)]
pub(crate) async fn memory_db() -> DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(3600))
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    migrator::Migrator::up(&db, None).await.unwrap();
    db
}

/// Fresh, migrated database in a temporary file, shared by up to
/// `max_connections` pooled connections.
#[cfg(test)]
pub(crate) async fn file_db(max_connections: u32) -> DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    let path = std::env::temp_dir().join(format!("propshare-{}.db", uuid::Uuid::new_v4()));
    let db = init_database(&DatabaseConfig {
        max_connections,
        ..DatabaseConfig::sqlite(&path.to_string_lossy())
    })
    .await
    .unwrap();
    migrator::Migrator::up(&db, None).await.unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{Booking, BookingStatus, NewBooking, StayOutcome};
    use crate::domain::property::NewProperty;
    use crate::domain::repositories::RepositoryProvider;
    use crate::domain::role::NewRole;
    use crate::domain::user::NewUser;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use chrono::NaiveDate;

    async fn seeded() -> (SeaOrmRepositoryProvider, i32, i32) {
        seeded_on(memory_db().await).await
    }

    async fn seeded_on(db: DatabaseConnection) -> (SeaOrmRepositoryProvider, i32, i32) {
        let repos = SeaOrmRepositoryProvider::new(db);
        let role = repos
            .roles()
            .create(NewRole {
                role_name: "owner".into(),
                description: None,
                created_by: None,
            })
            .await
            .unwrap();
        let user = repos
            .users()
            .create(NewUser {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                password_hash: "x".into(),
                phone: None,
                role_id: role.id,
                created_by: None,
            })
            .await
            .unwrap();
        let property = repos
            .properties()
            .create(NewProperty {
                property_name: "Lake House".into(),
                address: "1 Shore Rd".into(),
                city: "Tahoe".into(),
                state: None,
                country: "US".into(),
                zipcode: None,
                description: None,
                total_shares: 8,
                guest_capacity: 6,
                created_by: None,
            })
            .await
            .unwrap();
        (repos, user.id, property.id)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn user_loads_role_name() {
        let (repos, user_id, _) = seeded().await;
        let user = repos.users().find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(user.role_name, "owner");
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn role_lookup_ignores_case() {
        let (repos, _, _) = seeded().await;
        assert!(repos.roles().find_by_name("OWNER").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let (repos, user_id, _) = seeded().await;
        let existing = repos.users().find_by_id(user_id).await.unwrap().unwrap();
        let err = repos
            .users()
            .create(NewUser {
                first_name: "Other".into(),
                last_name: "Person".into(),
                email: existing.email,
                password_hash: "x".into(),
                phone: None,
                role_id: existing.role_id,
                created_by: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, crate::domain::DomainError::Conflict(_)));
    }

    fn stay(property_id: i32, user_id: i32, check_in: NaiveDate, check_out: NaiveDate) -> NewBooking {
        NewBooking {
            property_id,
            user_id,
            check_in,
            check_out,
            no_of_guests: 2,
            notes: None,
            created_by: None,
        }
    }

    async fn reserved(repos: &SeaOrmRepositoryProvider, booking: NewBooking, year: i32) -> Booking {
        match repos.bookings().reserve(booking, year).await.unwrap() {
            StayOutcome::Saved(b) => b,
            StayOutcome::Overlaps(clash) => panic!("unexpected overlap with {}", clash.booking_id),
        }
    }

    #[tokio::test]
    async fn sequence_counts_per_property_and_year() {
        let (repos, user_id, property_id) = seeded().await;
        let first = reserved(&repos, stay(property_id, user_id, date(2024, 1, 1), date(2024, 1, 2)), 2024).await;
        let second = reserved(&repos, stay(property_id, user_id, date(2024, 1, 2), date(2024, 1, 3)), 2024).await;
        let next_year = reserved(&repos, stay(property_id, user_id, date(2025, 1, 1), date(2025, 1, 2)), 2025).await;

        assert_eq!(first.booking_id, format!("FX2024{:02}01", property_id));
        assert_eq!(second.booking_id, format!("FX2024{:02}02", property_id));
        assert_eq!(next_year.booking_id, format!("FX2025{:02}01", property_id));
    }

    #[tokio::test]
    async fn sequence_seeds_from_existing_bookings() {
        use crate::infrastructure::database::entities::booking;
        use sea_orm::{ActiveModelTrait, Set};

        let db = memory_db().await;
        let (repos, user_id, property_id) = seeded_on(db.clone()).await;
        let now = chrono::Utc::now();
        for seq in [3u32, 11] {
            booking::ActiveModel {
                booking_id: Set(format!("FX2024{:02}{:02}", property_id, seq)),
                property_id: Set(property_id),
                user_id: Set(user_id),
                check_in: Set(date(2024, 1, seq)),
                check_out: Set(date(2024, 1, seq + 1)),
                no_of_guests: Set(2),
                notes: Set(None),
                status: Set(BookingStatus::Confirmed.as_str().to_string()),
                reminder_sent: Set(false),
                cancelled_at: Set(None),
                created_by: Set(None),
                updated_by: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let next = reserved(&repos, stay(property_id, user_id, date(2024, 3, 1), date(2024, 3, 4)), 2024).await;
        assert_eq!(next.booking_id, format!("FX2024{:02}12", property_id));
        let after = reserved(&repos, stay(property_id, user_id, date(2024, 3, 4), date(2024, 3, 6)), 2024).await;
        assert_eq!(after.booking_id, format!("FX2024{:02}13", property_id));
    }

    #[tokio::test]
    async fn overlap_ignores_cancelled_and_touching_stays() {
        let (repos, user_id, property_id) = seeded().await;
        let created = reserved(&repos, stay(property_id, user_id, date(2024, 6, 10), date(2024, 6, 15)), 2024).await;

        let bookings = repos.bookings();
        match bookings
            .reserve(stay(property_id, user_id, date(2024, 6, 14), date(2024, 6, 20)), 2024)
            .await
            .unwrap()
        {
            StayOutcome::Overlaps(clash) => assert_eq!(clash.id, created.id),
            StayOutcome::Saved(b) => panic!("overlapping stay saved as {}", b.booking_id),
        }

        let touching = reserved(&repos, stay(property_id, user_id, date(2024, 6, 15), date(2024, 6, 20)), 2024).await;

        let mut cancelled = created;
        cancelled.cancel(None);
        bookings.update(cancelled).await.unwrap();
        reserved(&repos, stay(property_id, user_id, date(2024, 6, 11), date(2024, 6, 14)), 2024).await;

        let mut stretched = touching;
        stretched.check_in = date(2024, 6, 12);
        assert!(matches!(
            bookings.reschedule(stretched.clone()).await.unwrap(),
            StayOutcome::Overlaps(_)
        ));
        stretched.check_in = date(2024, 6, 14);
        assert!(matches!(
            bookings.reschedule(stretched).await.unwrap(),
            StayOutcome::Saved(_)
        ));
    }

    #[tokio::test]
    async fn reserve_on_missing_property_is_not_found() {
        let (repos, user_id, _) = seeded().await;
        let err = repos
            .bookings()
            .reserve(stay(4242, user_id, date(2024, 6, 1), date(2024, 6, 2)), 2024)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::domain::DomainError::NotFound { entity: "Property", .. }));
    }

    #[tokio::test]
    async fn amenities_are_replaced_as_a_set() {
        use crate::domain::amenity::NewAmenity;

        let (repos, _, property_id) = seeded().await;
        let mut ids = Vec::new();
        for name in ["Wifi", "Pool", "Sauna"] {
            let a = repos
                .amenities()
                .create(NewAmenity {
                    amenity_name: name.into(),
                    amenity_type: None,
                    description: None,
                    created_by: None,
                })
                .await
                .unwrap();
            ids.push(a.id);
        }

        let props = repos.properties();
        props.set_amenities(property_id, &ids[..2]).await.unwrap();
        props.set_amenities(property_id, &ids[1..]).await.unwrap();

        let names: Vec<String> = props
            .amenities_of(property_id)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.amenity_name)
            .collect();
        assert_eq!(names, vec!["Pool".to_string(), "Sauna".to_string()]);
    }
}
