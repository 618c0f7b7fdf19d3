use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::holiday::{Holiday, HolidayInput};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HolidayDto {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inclusive length in days
    pub days: i64,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Holiday> for HolidayDto {
    fn from(h: Holiday) -> Self {
        Self {
            days: h.days(),
            id: h.id,
            name: h.name,
            year: h.year,
            start_date: h.start_date,
            end_date: h.end_date,
            created_by: h.created_by,
            updated_by: h.updated_by,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

/// Used for both create and full replacement
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HolidayRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1970, max = 9999, message = "year must be a four-digit year"))]
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<HolidayRequest> for HolidayInput {
    fn from(r: HolidayRequest) -> Self {
        Self {
            name: r.name,
            year: r.year,
            start_date: r.start_date,
            end_date: r.end_date,
            actor: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HolidayQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub year: Option<i32>,
}
