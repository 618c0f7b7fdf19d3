use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::property_code::{NewPropertyCode, PropertyCode, PropertyCodeChanges};
use crate::interfaces::http::common::IdRef;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PropertyCodeDto {
    pub id: i32,
    pub property_id: i32,
    /// Normalized lowercase kind, e.g. "wifi", "door", "alarm"
    pub code_type: String,
    pub code: String,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PropertyCode> for PropertyCodeDto {
    fn from(c: PropertyCode) -> Self {
        Self {
            id: c.id,
            property_id: c.property_id,
            code_type: c.code_type,
            code: c.code,
            description: c.description,
            created_by: c.created_by,
            updated_by: c.updated_by,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyCodeRequest {
    #[validate(nested)]
    pub property: IdRef,
    #[validate(length(min = 1, max = 50, message = "code_type is required"))]
    pub code_type: String,
    #[validate(length(min = 1, max = 100, message = "code is required"))]
    pub code: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

impl From<CreatePropertyCodeRequest> for NewPropertyCode {
    fn from(r: CreatePropertyCodeRequest) -> Self {
        Self {
            property_id: r.property.id,
            code_type: r.code_type,
            code: r.code,
            description: r.description,
            created_by: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePropertyCodeRequest {
    #[validate(length(min = 1, max = 50))]
    pub code_type: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub code: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

impl From<UpdatePropertyCodeRequest> for PropertyCodeChanges {
    fn from(r: UpdatePropertyCodeRequest) -> Self {
        Self {
            code_type: r.code_type,
            code: r.code,
            description: r.description,
            updated_by: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyCodeQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub property_id: Option<i32>,
}
