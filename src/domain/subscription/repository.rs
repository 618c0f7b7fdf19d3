use async_trait::async_trait;

use super::model::Subscription;
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, email: &str) -> DomainResult<Subscription>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Subscription>>;
    async fn save(&self, subscription: Subscription) -> DomainResult<Subscription>;
    async fn list(
        &self,
        active: Option<bool>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Subscription>>;
}
