//! SeaORM implementation of PropertyRepository
//!
//! Also owns the property ↔ amenity links and image rows, both of which
//! cascade with the property.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::db_err;
use crate::domain::amenity::Amenity;
use crate::domain::property::{
    NewProperty, NewPropertyImage, Property, PropertyChanges, PropertyFilter, PropertyImage,
    PropertyRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{
    amenity, property, property_amenity, property_image,
};
use crate::shared::{PaginatedResult, PaginationParams};

fn model_to_domain(m: property::Model) -> Property {
    Property {
        id: m.id,
        property_name: m.property_name,
        address: m.address,
        city: m.city,
        state: m.state,
        country: m.country,
        zipcode: m.zipcode,
        description: m.description,
        total_shares: m.total_shares,
        guest_capacity: m.guest_capacity,
        is_active: m.is_active,
        created_by: m.created_by,
        updated_by: m.updated_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn image_to_domain(m: property_image::Model) -> PropertyImage {
    PropertyImage {
        id: m.id,
        property_id: m.property_id,
        file_name: m.file_name,
        original_name: m.original_name,
        size_bytes: m.size_bytes,
        created_by: m.created_by,
        created_at: m.created_at,
    }
}

pub struct SeaOrmPropertyRepository {
    db: DatabaseConnection,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require(&self, id: i32) -> DomainResult<property::Model> {
        property::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Property", "id", id))
    }
}

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn create(&self, new: NewProperty) -> DomainResult<Property> {
        let now = Utc::now();
        let model = property::ActiveModel {
            property_name: Set(new.property_name),
            address: Set(new.address),
            city: Set(new.city),
            state: Set(new.state),
            country: Set(new.country),
            zipcode: Set(new.zipcode),
            description: Set(new.description),
            total_shares: Set(new.total_shares),
            guest_capacity: Set(new.guest_capacity),
            is_active: Set(true),
            created_by: Set(new.created_by),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!(property_id = result.id, name = %result.property_name, "Property created");
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Property>> {
        let model = property::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, property_name: &str) -> DomainResult<Option<Property>> {
        let model = property::Entity::find()
            .filter(property::Column::PropertyName.eq(property_name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(
        &self,
        filter: PropertyFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Property>> {
        let mut condition = Condition::all();
        if let Some(ref search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(property::Column::PropertyName.contains(search))
                    .add(property::Column::Address.contains(search))
                    .add(property::Column::City.contains(search)),
            );
        }
        if let Some(ref city) = filter.city {
            condition = condition.add(property::Column::City.eq(city.as_str()));
        }
        if let Some(is_active) = filter.is_active {
            condition = condition.add(property::Column::IsActive.eq(is_active));
        }

        let query = property::Entity::find().filter(condition);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_asc(property::Column::PropertyName)
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

    async fn update(&self, id: i32, changes: PropertyChanges) -> DomainResult<Property> {
        let existing = self.require(id).await?;

        let mut model: property::ActiveModel = existing.into();
        if let Some(v) = changes.property_name {
            model.property_name = Set(v);
        }
        if let Some(v) = changes.address {
            model.address = Set(v);
        }
        if let Some(v) = changes.city {
            model.city = Set(v);
        }
        if let Some(v) = changes.state {
            model.state = Set(Some(v));
        }
        if let Some(v) = changes.country {
            model.country = Set(v);
        }
        if let Some(v) = changes.zipcode {
            model.zipcode = Set(Some(v));
        }
        if let Some(v) = changes.description {
            model.description = Set(Some(v));
        }
        if let Some(v) = changes.total_shares {
            model.total_shares = Set(v);
        }
        if let Some(v) = changes.guest_capacity {
            model.guest_capacity = Set(v);
        }
        if let Some(v) = changes.is_active {
            model.is_active = Set(v);
        }
        model.updated_by = Set(changes.updated_by);
        model.updated_at = Set(Utc::now());

        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = property::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Property", "id", id));
        }
        info!(property_id = id, "Property deleted");
        Ok(())
    }

    async fn amenities_of(&self, property_id: i32) -> DomainResult<Vec<Amenity>> {
        let property = self.require(property_id).await?;
        let models = property
            .find_related(amenity::Entity)
            .order_by_asc(amenity::Column::AmenityName)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .map(|m| Amenity {
                id: m.id,
                amenity_name: m.amenity_name,
                amenity_type: m.amenity_type,
                description: m.description,
                created_by: m.created_by,
                updated_by: m.updated_by,
                created_at: m.created_at,
                updated_at: m.updated_at,
            })
            .collect())
    }

    async fn set_amenities(&self, property_id: i32, amenity_ids: &[i32]) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        property_amenity::Entity::delete_many()
            .filter(property_amenity::Column::PropertyId.eq(property_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if !amenity_ids.is_empty() {
            let links = amenity_ids.iter().map(|&amenity_id| property_amenity::ActiveModel {
                property_id: Set(property_id),
                amenity_id: Set(amenity_id),
            });
            property_amenity::Entity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        info!(property_id, count = amenity_ids.len(), "Property amenities replaced");
        Ok(())
    }

    async fn add_image(&self, new: NewPropertyImage) -> DomainResult<PropertyImage> {
        let model = property_image::ActiveModel {
            property_id: Set(new.property_id),
            file_name: Set(new.file_name),
            original_name: Set(new.original_name),
            size_bytes: Set(new.size_bytes),
            created_by: Set(new.created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(image_to_domain(result))
    }

    async fn list_images(&self, property_id: i32) -> DomainResult<Vec<PropertyImage>> {
        let models = property_image::Entity::find()
            .filter(property_image::Column::PropertyId.eq(property_id))
            .order_by_asc(property_image::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(image_to_domain).collect())
    }

    async fn find_image(
        &self,
        property_id: i32,
        image_id: i32,
    ) -> DomainResult<Option<PropertyImage>> {
        let model = property_image::Entity::find_by_id(image_id)
            .filter(property_image::Column::PropertyId.eq(property_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(image_to_domain))
    }

    async fn delete_image(&self, image_id: i32) -> DomainResult<()> {
        let result = property_image::Entity::delete_by_id(image_id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("PropertyImage", "id", image_id));
        }
        Ok(())
    }
}
