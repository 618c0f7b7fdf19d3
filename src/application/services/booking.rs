//! Bookings and their identifiers

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use tracing::info;

use crate::domain::booking::{
    validate_stay, Booking, BookingFilter, BookingStatus, NewBooking, StayOutcome,
};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};
use crate::shared::{retry_with_backoff, PaginatedResult, PaginationParams, RetryConfig};

use super::AuthenticatedUser;

fn overlap_conflict(clash: Booking) -> DomainError {
    DomainError::Conflict(format!(
        "Dates overlap booking {} ({} to {})",
        clash.booking_id, clash.check_in, clash.check_out
    ))
}

#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub property_id: i32,
    /// Defaults to the caller
    pub user_id: Option<i32>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub no_of_guests: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub no_of_guests: Option<i32>,
    pub notes: Option<String>,
}

/// Bookings with `FX<year><property><sequence>` identifiers.
///
/// Availability and the identifier are settled by the repository in one
/// transaction per write; a busy database or a lost counter seed is
/// retried with backoff.
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    retry: RetryConfig,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            retry: RetryConfig::default(),
        }
    }

    /// Stay and party size checks shared by create and update.
    async fn check_stay(
        &self,
        property_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
    ) -> DomainResult<()> {
        let property = self
            .repos
            .properties()
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", "id", property_id))?;
        if !property.is_active {
            return Err(DomainError::Validation(format!(
                "Property '{}' is not accepting bookings",
                property.property_name
            )));
        }

        validate_stay(check_in, check_out).map_err(DomainError::Validation)?;

        if !property.accepts_guests(guests) {
            return Err(DomainError::Validation(format!(
                "no_of_guests must be between 1 and {}",
                property.guest_capacity
            )));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        input: CreateBooking,
    ) -> DomainResult<Booking> {
        let user_id = input.user_id.unwrap_or(caller.user_id);
        caller.require_self_or_admin(user_id)?;

        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        self.check_stay(
            input.property_id,
            input.check_in,
            input.check_out,
            input.no_of_guests,
        )
        .await?;

        let stay = NewBooking {
            property_id: input.property_id,
            user_id,
            check_in: input.check_in,
            check_out: input.check_out,
            no_of_guests: input.no_of_guests,
            notes: input.notes,
            created_by: Some(caller.user_id),
        };
        let year = Utc::now().year();
        let outcome = retry_with_backoff(
            self.retry.clone(),
            || self.repos.bookings().reserve(stay.clone(), year),
            DomainError::is_transient,
            "reserve_booking",
        )
        .await?;

        match outcome {
            StayOutcome::Saved(booking) => {
                metrics::counter!("bookings_created_total").increment(1);
                info!(
                    booking_id = %booking.booking_id,
                    property_id = booking.property_id,
                    user_id = booking.user_id,
                    "Booking created"
                );
                Ok(booking)
            }
            StayOutcome::Overlaps(clash) => Err(overlap_conflict(clash)),
        }
    }

    pub async fn list(
        &self,
        filter: BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>> {
        self.repos.bookings().list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))
    }

    pub async fn get_by_reference(&self, booking_id: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_booking_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "booking_id", booking_id))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        changes: BookingUpdate,
    ) -> DomainResult<Booking> {
        let mut booking = self.get(id).await?;
        caller.require_self_or_admin(booking.user_id)?;
        if booking.status != BookingStatus::Confirmed {
            return Err(DomainError::Validation(format!(
                "Only confirmed bookings can be changed (status: {})",
                booking.status
            )));
        }

        booking.check_in = changes.check_in.unwrap_or(booking.check_in);
        booking.check_out = changes.check_out.unwrap_or(booking.check_out);
        booking.no_of_guests = changes.no_of_guests.unwrap_or(booking.no_of_guests);
        if changes.notes.is_some() {
            booking.notes = changes.notes;
        }
        if changes.check_in.is_some() {
            booking.reminder_sent = false;
        }

        self.check_stay(
            booking.property_id,
            booking.check_in,
            booking.check_out,
            booking.no_of_guests,
        )
        .await?;

        booking.updated_by = Some(caller.user_id);
        match self.repos.bookings().reschedule(booking).await? {
            StayOutcome::Saved(booking) => Ok(booking),
            StayOutcome::Overlaps(clash) => Err(overlap_conflict(clash)),
        }
    }

    pub async fn cancel(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<Booking> {
        let mut booking = self.get(id).await?;
        caller.require_self_or_admin(booking.user_id)?;
        match booking.status {
            BookingStatus::Cancelled => {
                return Err(DomainError::Validation("Booking is already cancelled".into()))
            }
            BookingStatus::Completed => {
                return Err(DomainError::Validation(
                    "Completed bookings cannot be cancelled".into(),
                ))
            }
            BookingStatus::Confirmed => {}
        }

        booking.cancel(Some(caller.user_id));
        let booking = self.repos.bookings().update(booking).await?;
        info!(booking_id = %booking.booking_id, by = caller.user_id, "Booking cancelled");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{fixture, fixture_on};
    use crate::domain::booking::parse_sequence;
    use crate::domain::property::NewProperty;
    use crate::infrastructure::database::file_db;
    use std::collections::HashSet;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, m, d).unwrap()
    }

    fn stay(property_id: i32, check_in: NaiveDate, check_out: NaiveDate) -> CreateBooking {
        CreateBooking {
            property_id,
            user_id: None,
            check_in,
            check_out,
            no_of_guests: 2,
            notes: None,
        }
    }

    #[tokio::test]
    async fn first_booking_gets_sequence_one() {
        let fx = fixture().await;
        let bookings = BookingService::new(fx.repos.clone());
        let booking = bookings
            .create(&fx.owner_caller(), stay(fx.property.id, date(7, 1), date(7, 5)))
            .await
            .unwrap();

        let expected = format!("FX{:04}{:02}01", Utc::now().year(), fx.property.id);
        assert_eq!(booking.booking_id, expected);
        assert_eq!(booking.user_id, fx.owner.id);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn sequences_increase_per_property() {
        let fx = fixture().await;
        let bookings = BookingService::new(fx.repos.clone());
        let other = fx
            .repos
            .properties()
            .create(NewProperty {
                property_name: "Beach Flat".into(),
                address: "9 Sand Ln".into(),
                city: "Malibu".into(),
                state: None,
                country: "US".into(),
                zipcode: None,
                description: None,
                total_shares: 2,
                guest_capacity: 2,
                created_by: None,
            })
            .await
            .unwrap();

        let caller = fx.owner_caller();
        let a1 = bookings.create(&caller, stay(fx.property.id, date(7, 1), date(7, 3))).await.unwrap();
        let a2 = bookings.create(&caller, stay(fx.property.id, date(7, 3), date(7, 6))).await.unwrap();
        let b1 = bookings.create(&caller, stay(other.id, date(7, 1), date(7, 3))).await.unwrap();

        let year = Utc::now().year();
        assert_eq!(a1.booking_id, format!("FX{:04}{:02}01", year, fx.property.id));
        assert_eq!(a2.booking_id, format!("FX{:04}{:02}02", year, fx.property.id));
        assert_eq!(b1.booking_id, format!("FX{:04}{:02}01", year, other.id));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_creates_of_one_stay_book_it_once() {
        let fx = fixture_on(file_db(10).await).await;
        let bookings = Arc::new(BookingService::new(fx.repos.clone()));
        let caller = fx.admin_caller();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let bookings = bookings.clone();
            let caller = caller.clone();
            let input = stay(fx.property.id, date(7, 1), date(7, 5));
            handles.push(tokio::spawn(async move { bookings.create(&caller, input).await }));
        }

        let mut saved = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => saved += 1,
                Err(DomainError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!((saved, conflicts), (1, 9));

        let listed = bookings
            .list(
                BookingFilter {
                    property_id: Some(fx.property.id),
                    ..Default::default()
                },
                PaginationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_creates_get_unique_sequential_ids() {
        const STAYS: u32 = 12;
        let fx = fixture_on(file_db(6).await).await;
        let bookings = Arc::new(BookingService::new(fx.repos.clone()));
        let caller = fx.admin_caller();

        let mut handles = Vec::new();
        for day in 1..=STAYS {
            let bookings = bookings.clone();
            let caller = caller.clone();
            let input = stay(fx.property.id, date(8, day), date(8, day + 1));
            handles.push(tokio::spawn(async move { bookings.create(&caller, input).await }));
        }

        let mut ids = HashSet::new();
        let mut sequences = Vec::new();
        for handle in handles {
            let booking = handle.await.unwrap().unwrap();
            let pid = u32::try_from(fx.property.id).unwrap();
            sequences.push(parse_sequence(&booking.booking_id, pid).unwrap());
            ids.insert(booking.booking_id);
        }
        sequences.sort_unstable();

        assert_eq!(ids.len(), STAYS as usize);
        assert_eq!(sequences, (1..=STAYS).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn overlapping_stay_conflicts_but_back_to_back_is_fine() {
        let fx = fixture().await;
        let bookings = BookingService::new(fx.repos.clone());
        bookings
            .create(&fx.owner_caller(), stay(fx.property.id, date(7, 1), date(7, 5)))
            .await
            .unwrap();

        let err = bookings
            .create(&fx.admin_caller(), stay(fx.property.id, date(7, 4), date(7, 8)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        bookings
            .create(&fx.admin_caller(), stay(fx.property.id, date(7, 5), date(7, 8)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn stay_and_party_are_validated() {
        let fx = fixture().await;
        let bookings = BookingService::new(fx.repos.clone());

        let err = bookings
            .create(&fx.owner_caller(), stay(fx.property.id, date(7, 5), date(7, 5)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let mut crowd = stay(fx.property.id, date(8, 1), date(8, 3));
        crowd.no_of_guests = 5;
        let err = bookings.create(&fx.owner_caller(), crowd).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = bookings
            .create(&fx.owner_caller(), stay(4242, date(8, 1), date(8, 3)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Property", .. }));
    }

    #[tokio::test]
    async fn owners_book_only_for_themselves() {
        let fx = fixture().await;
        let bookings = BookingService::new(fx.repos.clone());
        let mut for_admin = stay(fx.property.id, date(9, 1), date(9, 3));
        for_admin.user_id = Some(fx.admin.id);

        let err = bookings
            .create(&fx.owner_caller(), for_admin.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let mut for_owner = for_admin;
        for_owner.user_id = Some(fx.owner.id);
        let booking = bookings.create(&fx.admin_caller(), for_owner).await.unwrap();
        assert_eq!(booking.user_id, fx.owner.id);
        assert_eq!(booking.created_by, Some(fx.admin.id));
    }

    #[tokio::test]
    async fn cancel_twice_is_rejected_and_frees_dates() {
        let fx = fixture().await;
        let bookings = BookingService::new(fx.repos.clone());
        let booking = bookings
            .create(&fx.owner_caller(), stay(fx.property.id, date(10, 1), date(10, 4)))
            .await
            .unwrap();

        let cancelled = bookings.cancel(&fx.owner_caller(), booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert!(cancelled.cancelled_at.is_some());

        let err = bookings.cancel(&fx.owner_caller(), booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        bookings
            .create(&fx.admin_caller(), stay(fx.property.id, date(10, 1), date(10, 4)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_rechecks_availability() {
        let fx = fixture().await;
        let bookings = BookingService::new(fx.repos.clone());
        bookings
            .create(&fx.admin_caller(), stay(fx.property.id, date(11, 10), date(11, 12)))
            .await
            .unwrap();
        let mine = bookings
            .create(&fx.owner_caller(), stay(fx.property.id, date(11, 1), date(11, 3)))
            .await
            .unwrap();

        let err = bookings
            .update(
                &fx.owner_caller(),
                mine.id,
                BookingUpdate {
                    check_out: Some(date(11, 11)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let moved = bookings
            .update(
                &fx.owner_caller(),
                mine.id,
                BookingUpdate {
                    check_out: Some(date(11, 10)),
                    no_of_guests: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.nights(), 9);
        assert_eq!(moved.booking_id, mine.booking_id);
    }
}
