use async_trait::async_trait;

use super::model::{NewUserSession, UserSession};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserSessionRepository: Send + Sync {
    async fn create(&self, session: NewUserSession) -> DomainResult<UserSession>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserSession>>;
    async fn find_by_key(&self, session_key: &str) -> DomainResult<Option<UserSession>>;
    /// Newest first
    async fn list_for_user(&self, user_id: i32, active_only: bool)
        -> DomainResult<Vec<UserSession>>;
    async fn touch(&self, id: i32) -> DomainResult<()>;
    async fn deactivate(&self, id: i32) -> DomainResult<()>;
    /// Returns the number of sessions closed
    async fn deactivate_all_for_user(&self, user_id: i32) -> DomainResult<u64>;
}
