//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::{BookingUpdate, CreateBooking};
use crate::domain::booking::{Booking, BookingFilter, BookingStatus};
use crate::interfaces::http::common::{ApiError, IdRef};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    /// Booking identifier, e.g. `FX20240701`
    pub booking_id: String,
    pub property_id: i32,
    pub user_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub no_of_guests: i32,
    pub notes: Option<String>,
    /// `Confirmed`, `Cancelled` or `Completed`
    pub status: String,
    pub reminder_sent: bool,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            nights: b.nights(),
            status: b.status.as_str().to_string(),
            id: b.id,
            booking_id: b.booking_id,
            property_id: b.property_id,
            user_id: b.user_id,
            check_in: b.check_in,
            check_out: b.check_out,
            no_of_guests: b.no_of_guests,
            notes: b.notes,
            reminder_sent: b.reminder_sent,
            cancelled_at: b.cancelled_at,
            created_by: b.created_by,
            updated_by: b.updated_by,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(nested)]
    pub property: IdRef,
    /// Guest account; defaults to the caller (admins may book for others)
    #[validate(nested)]
    pub user: Option<IdRef>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, message = "no_of_guests must be at least 1"))]
    pub no_of_guests: i32,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl From<CreateBookingRequest> for CreateBooking {
    fn from(r: CreateBookingRequest) -> Self {
        Self {
            property_id: r.property.id,
            user_id: r.user.map(|u| u.id),
            check_in: r.check_in,
            check_out: r.check_out,
            no_of_guests: r.no_of_guests,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    #[validate(range(min = 1, message = "no_of_guests must be at least 1"))]
    pub no_of_guests: Option<i32>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl From<UpdateBookingRequest> for BookingUpdate {
    fn from(r: UpdateBookingRequest) -> Self {
        Self {
            check_in: r.check_in,
            check_out: r.check_out,
            no_of_guests: r.no_of_guests,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub property_id: Option<i32>,
    pub user_id: Option<i32>,
    /// `Confirmed`, `Cancelled` or `Completed` (case-insensitive)
    pub status: Option<String>,
}

impl BookingQuery {
    pub fn filter(&self) -> Result<BookingFilter, ApiError> {
        let status = match self.status.as_deref() {
            None => None,
            Some(raw) => Some(BookingStatus::parse(raw).ok_or_else(|| {
                ApiError::bad_request(format!("Unknown booking status '{}'", raw))
            })?),
        };
        Ok(BookingFilter {
            property_id: self.property_id,
            user_id: self.user_id,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_is_case_insensitive() {
        let query = BookingQuery {
            status: Some("cancelled".into()),
            ..Default::default()
        };
        assert_eq!(query.filter().unwrap().status, Some(BookingStatus::Cancelled));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let query = BookingQuery {
            status: Some("pending".into()),
            ..Default::default()
        };
        assert!(query.filter().is_err());
    }
}
