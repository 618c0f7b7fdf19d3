//! SeaORM implementation of TicketRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::ticket::{
    NewTicket, Ticket, TicketCategory, TicketFilter, TicketRepository, TicketStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::ticket;
use crate::shared::{PaginatedResult, PaginationParams};

fn model_to_domain(m: ticket::Model) -> Ticket {
    Ticket {
        id: m.id,
        category: TicketCategory::parse(&m.category).unwrap_or(TicketCategory::ContactUs),
        property_id: m.property_id,
        user_id: m.user_id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        subject: m.subject,
        message: m.message,
        status: TicketStatus::parse(&m.status).unwrap_or(TicketStatus::Open),
        updated_by: m.updated_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub struct SeaOrmTicketRepository {
    db: DatabaseConnection,
}

impl SeaOrmTicketRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TicketRepository for SeaOrmTicketRepository {
    async fn create(&self, new: NewTicket) -> DomainResult<Ticket> {
        let now = Utc::now();
        let model = ticket::ActiveModel {
            category: Set(new.category.as_str().to_string()),
            property_id: Set(new.property_id),
            user_id: Set(new.user_id),
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            subject: Set(new.subject),
            message: Set(new.message),
            status: Set(TicketStatus::Open.as_str().to_string()),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!(ticket_id = result.id, category = %result.category, "Ticket created");
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>> {
        let model = ticket::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(
        &self,
        filter: TicketFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Ticket>> {
        let mut condition = Condition::all();
        if let Some(category) = filter.category {
            condition = condition.add(ticket::Column::Category.eq(category.as_str()));
        }
        if let Some(status) = filter.status {
            condition = condition.add(ticket::Column::Status.eq(status.as_str()));
        }
        if let Some(pid) = filter.property_id {
            condition = condition.add(ticket::Column::PropertyId.eq(pid));
        }

        let query = ticket::Entity::find().filter(condition);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_desc(ticket::Column::CreatedAt)
            .order_by_desc(ticket::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
            page.page,
            page.limit,
        ))
    }

    async fn update_status(
        &self,
        id: i32,
        status: TicketStatus,
        updated_by: Option<i32>,
    ) -> DomainResult<Ticket> {
        let existing = ticket::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Ticket", "id", id))?;

        let mut model: ticket::ActiveModel = existing.into();
        model.status = Set(status.as_str().to_string());
        model.updated_by = Set(updated_by);
        model.updated_at = Set(Utc::now());

        let result = model.update(&self.db).await.map_err(db_err)?;
        info!(ticket_id = id, status = %status, "Ticket status changed");
        Ok(model_to_domain(result))
    }
}
