//! SeaORM implementation of AmenityRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::amenity::{Amenity, AmenityChanges, AmenityRepository, NewAmenity};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::amenity;
use crate::shared::{PaginatedResult, PaginationParams};

fn model_to_domain(m: amenity::Model) -> Amenity {
    Amenity {
        id: m.id,
        amenity_name: m.amenity_name,
        amenity_type: m.amenity_type,
        description: m.description,
        created_by: m.created_by,
        updated_by: m.updated_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub struct SeaOrmAmenityRepository {
    db: DatabaseConnection,
}

impl SeaOrmAmenityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AmenityRepository for SeaOrmAmenityRepository {
    async fn create(&self, new: NewAmenity) -> DomainResult<Amenity> {
        let now = Utc::now();
        let model = amenity::ActiveModel {
            amenity_name: Set(new.amenity_name),
            amenity_type: Set(new.amenity_type),
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

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Amenity>> {
        let model = amenity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, amenity_name: &str) -> DomainResult<Option<Amenity>> {
        let model = amenity::Entity::find()
            .filter(amenity::Column::AmenityName.eq(amenity_name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Amenity>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = amenity::Entity::find()
            .filter(amenity::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Amenity>> {
        let mut query = amenity::Entity::find();
        if let Some(ref search) = search {
            query = query.filter(
                amenity::Column::AmenityName
                    .contains(search)
                    .or(amenity::Column::AmenityType.contains(search)),
            );
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_asc(amenity::Column::AmenityName)
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

    async fn update(&self, id: i32, changes: AmenityChanges) -> DomainResult<Amenity> {
        let existing = amenity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Amenity", "id", id))?;

        let mut model: amenity::ActiveModel = existing.into();
        if let Some(v) = changes.amenity_name {
            model.amenity_name = Set(v);
        }
        if let Some(v) = changes.amenity_type {
            model.amenity_type = Set(Some(v));
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
        let result = amenity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Amenity", "id", id));
        }
        Ok(())
    }
}
