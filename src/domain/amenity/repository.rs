use async_trait::async_trait;

use super::model::{Amenity, AmenityChanges, NewAmenity};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait AmenityRepository: Send + Sync {
    async fn create(&self, amenity: NewAmenity) -> DomainResult<Amenity>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Amenity>>;
    /// Case-insensitive lookup
    async fn find_by_name(&self, amenity_name: &str) -> DomainResult<Option<Amenity>>;
    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Amenity>>;
    async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Amenity>>;
    async fn update(&self, id: i32, changes: AmenityChanges) -> DomainResult<Amenity>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
