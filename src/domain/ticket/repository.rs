use async_trait::async_trait;

use super::model::{NewTicket, Ticket, TicketFilter, TicketStatus};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn create(&self, ticket: NewTicket) -> DomainResult<Ticket>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>>;
    /// Newest first
    async fn list(
        &self,
        filter: TicketFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Ticket>>;
    async fn update_status(
        &self,
        id: i32,
        status: TicketStatus,
        updated_by: Option<i32>,
    ) -> DomainResult<Ticket>;
}
