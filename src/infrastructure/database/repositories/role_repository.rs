//! SeaORM implementation of RoleRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::role::{NewRole, Role, RoleChanges, RoleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::role;
use crate::shared::{PaginatedResult, PaginationParams};

fn model_to_domain(m: role::Model) -> Role {
    Role {
        id: m.id,
        role_name: m.role_name,
        description: m.description,
        created_by: m.created_by,
        updated_by: m.updated_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn create(&self, new: NewRole) -> DomainResult<Role> {
        let now = Utc::now();
        let model = role::ActiveModel {
            role_name: Set(new.role_name),
            description: Set(new.description),
            created_by: Set(new.created_by),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!(role_id = result.id, role_name = %result.role_name, "Role created");
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Role>> {
        let model = role::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, role_name: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((role::Entity, role::Column::RoleName))))
                    .eq(role_name.trim().to_lowercase()),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Role>> {
        let mut query = role::Entity::find();
        if let Some(ref search) = search {
            query = query.filter(
                role::Column::RoleName
                    .contains(search)
                    .or(role::Column::Description.contains(search)),
            );
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_asc(role::Column::RoleName)
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

    async fn update(&self, id: i32, changes: RoleChanges) -> DomainResult<Role> {
        let existing = role::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Role", "id", id))?;

        let mut model: role::ActiveModel = existing.into();
        if let Some(role_name) = changes.role_name {
            model.role_name = Set(role_name);
        }
        if let Some(description) = changes.description {
            model.description = Set(Some(description));
        }
        model.updated_by = Set(changes.updated_by);
        model.updated_at = Set(Utc::now());

        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = role::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Role", "id", id));
        }
        info!(role_id = id, "Role deleted");
        Ok(())
    }
}
