//! Holiday domain entity

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// A named holiday period in a calendar year
#[derive(Debug, Clone)]
pub struct Holiday {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Holiday {
    /// Inclusive day count
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Write model shared by create and update
#[derive(Debug, Clone)]
pub struct HolidayInput {
    pub name: String,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Set as `created_by` on create and `updated_by` on update
    pub actor: Option<i32>,
}

impl HolidayInput {
    /// Dates must be ordered and fall inside `year`.
    pub fn validate(&self) -> Result<(), String> {
        if self.end_date < self.start_date {
            return Err("end_date must not be before start_date".to_string());
        }
        if self.start_date.year() != self.year || self.end_date.year() != self.year {
            return Err(format!("Holiday dates must fall within {}", self.year));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(start: (i32, u32, u32), end: (i32, u32, u32), year: i32) -> HolidayInput {
        HolidayInput {
            name: "Winter break".into(),
            year,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            actor: None,
        }
    }

    #[test]
    fn single_day_holiday_is_valid() {
        assert!(input((2024, 12, 25), (2024, 12, 25), 2024).validate().is_ok());
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let err = input((2024, 12, 26), (2024, 12, 25), 2024).validate().unwrap_err();
        assert!(err.contains("end_date"));
    }

    #[test]
    fn dates_outside_year_are_rejected() {
        assert!(input((2024, 12, 30), (2025, 1, 2), 2024).validate().is_err());
    }

    #[test]
    fn day_count_is_inclusive() {
        let i = input((2024, 12, 24), (2024, 12, 26), 2024);
        let h = Holiday {
            id: 1,
            name: i.name,
            year: i.year,
            start_date: i.start_date,
            end_date: i.end_date,
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(h.days(), 3);
        assert!(h.contains(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
        assert!(!h.contains(NaiveDate::from_ymd_opt(2024, 12, 27).unwrap()));
    }
}
