//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    /// Case-insensitive parse; `None` for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stay at a property
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i32,
    /// Human-facing identifier, see [`super::booking_id`]
    pub booking_id: String,
    pub property_id: i32,
    pub user_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub no_of_guests: i32,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub reminder_sent: bool,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open interval overlap: a check-out day may be the next check-in day.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    pub fn cancel(&mut self, by: Option<i32>) {
        self.status = BookingStatus::Cancelled;
        self.cancelled_at = Some(Utc::now());
        self.updated_by = by;
    }
}

/// Check-out must be strictly after check-in.
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), String> {
    if check_out <= check_in {
        return Err("check_out must be after check_in".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub property_id: i32,
    pub user_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub no_of_guests: i32,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
}

/// Result of a write that claims dates
#[derive(Debug)]
pub enum StayOutcome {
    Saved(Booking),
    /// The stay collides with this non-cancelled booking
    Overlaps(Booking),
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub property_id: Option<i32>,
    pub user_id: Option<i32>,
    pub status: Option<BookingStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn booking(check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        Booking {
            id: 1,
            booking_id: "FX20240701".into(),
            property_id: 7,
            user_id: 1,
            check_in,
            check_out,
            no_of_guests: 2,
            notes: None,
            status: BookingStatus::Confirmed,
            reminder_sent: false,
            cancelled_at: None,
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn stay_requires_at_least_one_night() {
        assert!(validate_stay(date(7, 1), date(7, 2)).is_ok());
        assert!(validate_stay(date(7, 1), date(7, 1)).is_err());
        assert!(validate_stay(date(7, 3), date(7, 1)).is_err());
    }

    #[test]
    fn back_to_back_stays_do_not_overlap() {
        let b = booking(date(7, 1), date(7, 5));
        assert!(!b.overlaps(date(7, 5), date(7, 8)));
        assert!(!b.overlaps(date(6, 28), date(7, 1)));
        assert!(b.overlaps(date(7, 4), date(7, 6)));
        assert!(b.overlaps(date(6, 30), date(7, 10)));
        assert_eq!(b.nights(), 4);
    }

    #[test]
    fn cancel_records_time_and_actor() {
        let mut b = booking(date(7, 1), date(7, 5));
        b.cancel(Some(3));
        assert!(b.is_cancelled());
        assert!(b.cancelled_at.is_some());
        assert_eq!(b.updated_by, Some(3));
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(BookingStatus::parse("CONFIRMED"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse("cancelled"), Some(BookingStatus::Cancelled));
        assert_eq!(BookingStatus::parse("pending"), None);
        assert_eq!(BookingStatus::Completed.to_string(), "Completed");
    }
}
