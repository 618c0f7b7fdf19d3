//! SeaORM implementation of PropertyCodeRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::property_code::{
    NewPropertyCode, PropertyCode, PropertyCodeChanges, PropertyCodeRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::property_code;
use crate::shared::{PaginatedResult, PaginationParams};

fn model_to_domain(m: property_code::Model) -> PropertyCode {
    PropertyCode {
        id: m.id,
        property_id: m.property_id,
        code_type: m.code_type,
        code: m.code,
        description: m.description,
        created_by: m.created_by,
        updated_by: m.updated_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub struct SeaOrmPropertyCodeRepository {
    db: DatabaseConnection,
}

impl SeaOrmPropertyCodeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropertyCodeRepository for SeaOrmPropertyCodeRepository {
    async fn create(&self, new: NewPropertyCode) -> DomainResult<PropertyCode> {
        let now = Utc::now();
        let model = property_code::ActiveModel {
            property_id: Set(new.property_id),
            code_type: Set(new.code_type),
            code: Set(new.code),
            description: Set(new.description),
            created_by: Set(new.created_by),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PropertyCode>> {
        let model = property_code::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_type(
        &self,
        property_id: i32,
        code_type: &str,
    ) -> DomainResult<Option<PropertyCode>> {
        let model = property_code::Entity::find()
            .filter(property_code::Column::PropertyId.eq(property_id))
            .filter(property_code::Column::CodeType.eq(code_type))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(
        &self,
        property_id: Option<i32>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<PropertyCode>> {
        let mut query = property_code::Entity::find();
        if let Some(pid) = property_id {
            query = query.filter(property_code::Column::PropertyId.eq(pid));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_asc(property_code::Column::PropertyId)
            .order_by_asc(property_code::Column::CodeType)
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

    async fn update(&self, id: i32, changes: PropertyCodeChanges) -> DomainResult<PropertyCode> {
        let existing = property_code::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("PropertyCode", "id", id))?;

        let mut model: property_code::ActiveModel = existing.into();
        if let Some(v) = changes.code_type {
            model.code_type = Set(v);
        }
        if let Some(v) = changes.code {
            model.code = Set(v);
        }
        if let Some(v) = changes.description {
            model.description = Set(Some(v));
        }
        model.updated_by = Set(changes.updated_by);
        model.updated_at = Set(Utc::now());

        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = property_code::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("PropertyCode", "id", id));
        }
        Ok(())
    }
}
