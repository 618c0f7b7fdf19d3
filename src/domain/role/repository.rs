use async_trait::async_trait;

use super::model::{NewRole, Role, RoleChanges};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn create(&self, role: NewRole) -> DomainResult<Role>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Role>>;
    /// Case-insensitive lookup
    async fn find_by_name(&self, role_name: &str) -> DomainResult<Option<Role>>;
    async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Role>>;
    async fn update(&self, id: i32, changes: RoleChanges) -> DomainResult<Role>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
