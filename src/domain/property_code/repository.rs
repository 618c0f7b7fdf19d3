use async_trait::async_trait;

use super::model::{NewPropertyCode, PropertyCode, PropertyCodeChanges};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait PropertyCodeRepository: Send + Sync {
    async fn create(&self, code: NewPropertyCode) -> DomainResult<PropertyCode>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PropertyCode>>;
    async fn find_by_type(
        &self,
        property_id: i32,
        code_type: &str,
    ) -> DomainResult<Option<PropertyCode>>;
    async fn list(
        &self,
        property_id: Option<i32>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<PropertyCode>>;
    async fn update(&self, id: i32, changes: PropertyCodeChanges) -> DomainResult<PropertyCode>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
