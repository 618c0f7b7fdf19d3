//! SeaORM implementation of UserRepository
//!
//! Users are always loaded together with their role so `role_name` is
//! populated for authorization checks.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::user::{NewUser, User, UserChanges, UserFilter, UserRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{role, user};
use crate::shared::{PaginatedResult, PaginationParams};

fn model_to_domain(m: user::Model, role: Option<role::Model>) -> User {
    User {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        password_hash: m.password_hash,
        phone: m.phone,
        role_id: m.role_id,
        role_name: role.map(|r| r.role_name).unwrap_or_default(),
        is_active: m.is_active,
        last_login_at: m.last_login_at,
        created_by: m.created_by,
        updated_by: m.updated_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, id: i32) -> DomainResult<Option<User>> {
        let row = user::Entity::find_by_id(id)
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(|(u, r)| model_to_domain(u, r)))
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            phone: Set(new.phone),
            role_id: Set(new.role_id),
            is_active: Set(true),
            last_login_at: Set(None),
            created_by: Set(new.created_by),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!(user_id = result.id, email = %result.email, "User created");

        self.load(result.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", result.id))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        self.load(id).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let row = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(|(u, r)| model_to_domain(u, r)))
    }

    async fn list(
        &self,
        filter: UserFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>> {
        let mut condition = Condition::all();
        if let Some(ref search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(user::Column::FirstName.contains(search))
                    .add(user::Column::LastName.contains(search))
                    .add(user::Column::Email.contains(search)),
            );
        }
        if let Some(role_id) = filter.role_id {
            condition = condition.add(user::Column::RoleId.eq(role_id));
        }
        if let Some(is_active) = filter.is_active {
            condition = condition.add(user::Column::IsActive.eq(is_active));
        }

        let query = user::Entity::find().filter(condition);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let rows = query
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .find_also_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            rows.into_iter()
                .map(|(u, r)| model_to_domain(u, r))
                .collect(),
            total,
            page.page,
            page.limit,
        ))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn count_by_role(&self, role_id: i32) -> DomainResult<u64> {
        user::Entity::find()
            .filter(user::Column::RoleId.eq(role_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> DomainResult<User> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;

        let mut model: user::ActiveModel = existing.into();
        if let Some(first_name) = changes.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = changes.email {
            model.email = Set(email);
        }
        if let Some(phone) = changes.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(role_id) = changes.role_id {
            model.role_id = Set(role_id);
        }
        if let Some(is_active) = changes.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_by = Set(changes.updated_by);
        model.updated_at = Set(Utc::now());

        model.update(&self.db).await.map_err(db_err)?;

        self.load(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> DomainResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: i32) -> DomainResult<()> {
        user::Entity::update_many()
            .col_expr(user::Column::LastLoginAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
