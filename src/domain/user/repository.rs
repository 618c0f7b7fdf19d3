use async_trait::async_trait;

use super::{NewUser, User, UserChanges, UserFilter};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> DomainResult<User>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn list(
        &self,
        filter: UserFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn count_by_role(&self, role_id: i32) -> DomainResult<u64>;

    async fn update(&self, id: i32, changes: UserChanges) -> DomainResult<User>;
    async fn update_password(&self, id: i32, password_hash: &str) -> DomainResult<()>;
    async fn touch_last_login(&self, id: i32) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
