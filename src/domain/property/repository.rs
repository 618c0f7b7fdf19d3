use async_trait::async_trait;

use super::model::{
    NewProperty, NewPropertyImage, Property, PropertyChanges, PropertyFilter, PropertyImage,
};
use crate::domain::amenity::Amenity;
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: NewProperty) -> DomainResult<Property>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Property>>;
    async fn find_by_name(&self, property_name: &str) -> DomainResult<Option<Property>>;
    async fn list(
        &self,
        filter: PropertyFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Property>>;
    async fn update(&self, id: i32, changes: PropertyChanges) -> DomainResult<Property>;
    async fn delete(&self, id: i32) -> DomainResult<()>;

    // ── Amenities ──────────────────────────────────────────────
    async fn amenities_of(&self, property_id: i32) -> DomainResult<Vec<Amenity>>;
    /// Replace the property's amenity set
    async fn set_amenities(&self, property_id: i32, amenity_ids: &[i32]) -> DomainResult<()>;

    // ── Images ─────────────────────────────────────────────────
    async fn add_image(&self, image: NewPropertyImage) -> DomainResult<PropertyImage>;
    async fn list_images(&self, property_id: i32) -> DomainResult<Vec<PropertyImage>>;
    async fn find_image(&self, property_id: i32, image_id: i32)
        -> DomainResult<Option<PropertyImage>>;
    async fn delete_image(&self, image_id: i32) -> DomainResult<()>;
}
