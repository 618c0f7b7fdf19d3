use async_trait::async_trait;

use super::model::{Holiday, HolidayInput};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait HolidayRepository: Send + Sync {
    async fn create(&self, holiday: HolidayInput) -> DomainResult<Holiday>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Holiday>>;
    /// Ordered by start date
    async fn list(
        &self,
        year: Option<i32>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Holiday>>;
    async fn update(&self, id: i32, holiday: HolidayInput) -> DomainResult<Holiday>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
