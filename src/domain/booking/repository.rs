//! Booking repository interfaces

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, BookingFilter, NewBooking, StayOutcome};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a confirmed booking unless it overlaps a non-cancelled stay of
    /// the same property. The overlap check, the identifier allocation from
    /// the `(property, year)` counter and the insert commit together.
    ///
    /// A missing counter continues from identifiers already issued for that
    /// property and year. Losing a concurrent seed race returns
    /// `DomainError::Conflict`; callers retry.
    async fn reserve(&self, booking: NewBooking, year: i32) -> DomainResult<StayOutcome>;

    /// Persist new dates, guests or notes under the same availability check
    /// as `reserve`, ignoring the booking's own row.
    async fn reschedule(&self, booking: Booking) -> DomainResult<StayOutcome>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;
    async fn find_by_booking_id(&self, booking_id: &str) -> DomainResult<Option<Booking>>;
    /// Newest first
    async fn list(
        &self,
        filter: BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>>;

    /// Persist all mutable fields without an availability check (status changes)
    async fn update(&self, booking: Booking) -> DomainResult<Booking>;

    /// Confirmed bookings without a reminder whose check-in is in `[from, until]`
    async fn find_due_reminders(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> DomainResult<Vec<Booking>>;

    async fn mark_reminder_sent(&self, id: i32) -> DomainResult<()>;
}
