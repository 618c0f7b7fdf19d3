//! SeaORM implementation of UserSessionRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::db_err;
use crate::domain::user_session::{NewUserSession, UserSession, UserSessionRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user_session;

fn model_to_domain(m: user_session::Model) -> UserSession {
    UserSession {
        id: m.id,
        session_key: m.session_key,
        user_id: m.user_id,
        token_hash: m.token_hash,
        ip_address: m.ip_address,
        user_agent: m.user_agent,
        expires_at: m.expires_at,
        is_active: m.is_active,
        last_activity_at: m.last_activity_at,
        created_at: m.created_at,
    }
}

pub struct SeaOrmUserSessionRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserSessionRepository for SeaOrmUserSessionRepository {
    async fn create(&self, new: NewUserSession) -> DomainResult<UserSession> {
        let now = Utc::now();
        let model = user_session::ActiveModel {
            session_key: Set(new.session_key),
            user_id: Set(new.user_id),
            token_hash: Set(new.token_hash),
            ip_address: Set(new.ip_address),
            user_agent: Set(new.user_agent),
            expires_at: Set(new.expires_at),
            is_active: Set(true),
            last_activity_at: Set(Some(now)),
            created_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        debug!(session_id = result.id, user_id = result.user_id, "Session created");
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserSession>> {
        let model = user_session::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_key(&self, session_key: &str) -> DomainResult<Option<UserSession>> {
        let model = user_session::Entity::find()
            .filter(user_session::Column::SessionKey.eq(session_key))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list_for_user(
        &self,
        user_id: i32,
        active_only: bool,
    ) -> DomainResult<Vec<UserSession>> {
        let mut query =
            user_session::Entity::find().filter(user_session::Column::UserId.eq(user_id));
        if active_only {
            query = query
                .filter(user_session::Column::IsActive.eq(true))
                .filter(user_session::Column::ExpiresAt.gt(Utc::now()));
        }
        let models = query
            .order_by_desc(user_session::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn touch(&self, id: i32) -> DomainResult<()> {
        user_session::Entity::update_many()
            .col_expr(user_session::Column::LastActivityAt, Expr::value(Utc::now()))
            .filter(user_session::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn deactivate(&self, id: i32) -> DomainResult<()> {
        let result = user_session::Entity::update_many()
            .col_expr(user_session::Column::IsActive, Expr::value(false))
            .filter(user_session::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("UserSession", "id", id));
        }
        Ok(())
    }

    async fn deactivate_all_for_user(&self, user_id: i32) -> DomainResult<u64> {
        let result = user_session::Entity::update_many()
            .col_expr(user_session::Column::IsActive, Expr::value(false))
            .filter(user_session::Column::UserId.eq(user_id))
            .filter(user_session::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        debug!(user_id, count = result.rows_affected, "Sessions deactivated");
        Ok(result.rows_affected)
    }
}
