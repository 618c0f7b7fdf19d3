//! SeaORM implementation of SubscriptionRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::subscription::{Subscription, SubscriptionRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::subscription;
use crate::shared::{PaginatedResult, PaginationParams};

fn model_to_domain(m: subscription::Model) -> Subscription {
    Subscription {
        id: m.id,
        email: m.email,
        is_active: m.is_active,
        subscribed_at: m.subscribed_at,
        unsubscribed_at: m.unsubscribed_at,
    }
}

pub struct SeaOrmSubscriptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn create(&self, email: &str) -> DomainResult<Subscription> {
        let model = subscription::ActiveModel {
            email: Set(email.to_string()),
            is_active: Set(true),
            subscribed_at: Set(Utc::now()),
            unsubscribed_at: Set(None),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Subscription>> {
        let model = subscription::Entity::find()
            .filter(subscription::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, s: Subscription) -> DomainResult<Subscription> {
        let model = subscription::ActiveModel {
            id: Set(s.id),
            email: Set(s.email),
            is_active: Set(s.is_active),
            subscribed_at: Set(s.subscribed_at),
            unsubscribed_at: Set(s.unsubscribed_at),
        };
        let result = model.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Subscription", "id", s.id),
            other => db_err(other),
        })?;
        Ok(model_to_domain(result))
    }

    async fn list(
        &self,
        active: Option<bool>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Subscription>> {
        let mut query = subscription::Entity::find();
        if let Some(active) = active {
            query = query.filter(subscription::Column::IsActive.eq(active));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_desc(subscription::Column::SubscribedAt)
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
}
