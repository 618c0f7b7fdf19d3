use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::{ContactRequest, MaintenanceRequest};
use crate::domain::ticket::{Ticket, TicketCategory, TicketFilter, TicketStatus};
use crate::interfaces::http::common::{ApiError, IdRef};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketDto {
    pub id: i32,
    /// `ContactUs` or `Maintenance`
    pub category: String,
    pub property_id: Option<i32>,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// `Open`, `InProgress`, `Resolved` or `Closed`
    pub status: String,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketDto {
    fn from(t: Ticket) -> Self {
        Self {
            id: t.id,
            category: t.category.as_str().to_string(),
            property_id: t.property_id,
            user_id: t.user_id,
            name: t.name,
            email: t.email,
            phone: t.phone,
            subject: t.subject,
            message: t.message,
            status: t.status.as_str().to_string(),
            updated_by: t.updated_by,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactUsRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "message is required"))]
    pub message: String,
}

impl From<ContactUsRequest> for ContactRequest {
    fn from(r: ContactUsRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            subject: r.subject,
            message: r.message,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MaintenanceTicketRequest {
    #[validate(nested)]
    pub property: IdRef,
    #[validate(length(min = 1, max = 200, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "message is required"))]
    pub message: String,
}

impl From<MaintenanceTicketRequest> for MaintenanceRequest {
    fn from(r: MaintenanceTicketRequest) -> Self {
        Self {
            property_id: r.property.id,
            subject: r.subject,
            message: r.message,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTicketStatusRequest {
    /// `Open`, `InProgress`, `Resolved` or `Closed`
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

impl UpdateTicketStatusRequest {
    pub fn status(&self) -> Result<TicketStatus, ApiError> {
        TicketStatus::parse(&self.status)
            .ok_or_else(|| ApiError::bad_request(format!("Unknown ticket status '{}'", self.status)))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// `ContactUs` or `Maintenance`
    pub category: Option<String>,
    pub status: Option<String>,
    pub property_id: Option<i32>,
}

impl TicketQuery {
    pub fn filter(&self) -> Result<TicketFilter, ApiError> {
        let category = self
            .category
            .as_deref()
            .map(|raw| {
                TicketCategory::parse(raw)
                    .ok_or_else(|| ApiError::bad_request(format!("Unknown ticket category '{}'", raw)))
            })
            .transpose()?;
        let status = self
            .status
            .as_deref()
            .map(|raw| {
                TicketStatus::parse(raw)
                    .ok_or_else(|| ApiError::bad_request(format!("Unknown ticket status '{}'", raw)))
            })
            .transpose()?;
        Ok(TicketFilter {
            category,
            status,
            property_id: self.property_id,
        })
    }
}
