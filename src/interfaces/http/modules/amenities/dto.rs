use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::AmenityInput;
use crate::domain::amenity::{Amenity, AmenityChanges};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AmenityDto {
    pub id: i32,
    pub amenity_name: String,
    pub amenity_type: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Amenity> for AmenityDto {
    fn from(a: Amenity) -> Self {
        Self {
            id: a.id,
            amenity_name: a.amenity_name,
            amenity_type: a.amenity_type,
            description: a.description,
            created_by: a.created_by,
            updated_by: a.updated_by,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAmenityRequest {
    #[validate(length(min = 1, max = 100, message = "amenity_name is required"))]
    pub amenity_name: String,
    /// Free-form grouping, e.g. "Kitchen" or "Outdoor"
    #[validate(length(max = 50))]
    pub amenity_type: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl From<CreateAmenityRequest> for AmenityInput {
    fn from(r: CreateAmenityRequest) -> Self {
        Self {
            amenity_name: r.amenity_name,
            amenity_type: r.amenity_type,
            description: r.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAmenityRequest {
    #[validate(length(min = 1, max = 100))]
    pub amenity_name: Option<String>,
    #[validate(length(max = 50))]
    pub amenity_type: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl From<UpdateAmenityRequest> for AmenityChanges {
    fn from(r: UpdateAmenityRequest) -> Self {
        Self {
            amenity_name: r.amenity_name,
            amenity_type: r.amenity_type,
            description: r.description,
            updated_by: None,
        }
    }
}
