//! Property DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::property::{NewProperty, Property, PropertyChanges, PropertyFilter, PropertyImage};
use crate::infrastructure::ImageStore;
use crate::interfaces::http::common::IdRef;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PropertyDto {
    pub id: i32,
    pub property_name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub zipcode: Option<String>,
    pub description: Option<String>,
    pub total_shares: i32,
    pub guest_capacity: i32,
    pub is_active: bool,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            property_name: p.property_name,
            address: p.address,
            city: p.city,
            state: p.state,
            country: p.country,
            zipcode: p.zipcode,
            description: p.description,
            total_shares: p.total_shares,
            guest_capacity: p.guest_capacity,
            is_active: p.is_active,
            created_by: p.created_by,
            updated_by: p.updated_by,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 150, message = "property_name is required"))]
    pub property_name: String,
    #[validate(length(min = 1, max = 255, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(min = 1, max = 100, message = "country is required"))]
    pub country: String,
    #[validate(length(max = 20))]
    pub zipcode: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "total_shares must be at least 1"))]
    pub total_shares: i32,
    #[validate(range(min = 1, message = "guest_capacity must be at least 1"))]
    pub guest_capacity: i32,
}

impl From<CreatePropertyRequest> for NewProperty {
    fn from(r: CreatePropertyRequest) -> Self {
        Self {
            property_name: r.property_name,
            address: r.address,
            city: r.city,
            state: r.state,
            country: r.country,
            zipcode: r.zipcode,
            description: r.description,
            total_shares: r.total_shares,
            guest_capacity: r.guest_capacity,
            created_by: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 150))]
    pub property_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 20))]
    pub zipcode: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "total_shares must be at least 1"))]
    pub total_shares: Option<i32>,
    #[validate(range(min = 1, message = "guest_capacity must be at least 1"))]
    pub guest_capacity: Option<i32>,
    pub is_active: Option<bool>,
}

impl From<UpdatePropertyRequest> for PropertyChanges {
    fn from(r: UpdatePropertyRequest) -> Self {
        Self {
            property_name: r.property_name,
            address: r.address,
            city: r.city,
            state: r.state,
            country: r.country,
            zipcode: r.zipcode,
            description: r.description,
            total_shares: r.total_shares,
            guest_capacity: r.guest_capacity,
            is_active: r.is_active,
            updated_by: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Matches name, address or city
    pub search: Option<String>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
}

impl PropertyQuery {
    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            search: self.search.clone(),
            city: self.city.clone(),
            is_active: self.is_active,
        }
    }
}

/// Replaces the amenity set of a property
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetAmenitiesRequest {
    #[validate(nested)]
    pub amenities: Vec<IdRef>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyImageDto {
    pub id: i32,
    pub property_id: i32,
    pub file_name: String,
    pub original_name: String,
    pub size_bytes: i64,
    /// Public URL served from the upload directory
    pub url: String,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<PropertyImage> for PropertyImageDto {
    fn from(i: PropertyImage) -> Self {
        Self {
            url: ImageStore::url_of(i.property_id, &i.file_name),
            id: i.id,
            property_id: i.property_id,
            file_name: i.file_name,
            original_name: i.original_name,
            size_bytes: i.size_bytes,
            created_by: i.created_by,
            created_at: i.created_at,
        }
    }
}

/// `multipart/form-data` body for image upload (OpenAPI only)
#[derive(ToSchema)]
pub struct ImageUploadForm {
    /// One or more image files
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
}
