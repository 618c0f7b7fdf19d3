//! SeaORM implementation of HolidayRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::holiday::{Holiday, HolidayInput, HolidayRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::holiday;
use crate::shared::{PaginatedResult, PaginationParams};

fn model_to_domain(m: holiday::Model) -> Holiday {
    Holiday {
        id: m.id,
        name: m.name,
        year: m.year,
        start_date: m.start_date,
        end_date: m.end_date,
        created_by: m.created_by,
        updated_by: m.updated_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub struct SeaOrmHolidayRepository {
    db: DatabaseConnection,
}

impl SeaOrmHolidayRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HolidayRepository for SeaOrmHolidayRepository {
    async fn create(&self, input: HolidayInput) -> DomainResult<Holiday> {
        let now = Utc::now();
        let model = holiday::ActiveModel {
            name: Set(input.name),
            year: Set(input.year),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            created_by: Set(input.actor),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Holiday>> {
        let model = holiday::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(
        &self,
        year: Option<i32>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Holiday>> {
        let mut query = holiday::Entity::find();
        if let Some(year) = year {
            query = query.filter(holiday::Column::Year.eq(year));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_asc(holiday::Column::StartDate)
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

    async fn update(&self, id: i32, input: HolidayInput) -> DomainResult<Holiday> {
        let existing = holiday::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Holiday", "id", id))?;

        let mut model: holiday::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.year = Set(input.year);
        model.start_date = Set(input.start_date);
        model.end_date = Set(input.end_date);
        model.updated_by = Set(input.actor);
        model.updated_at = Set(Utc::now());

        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = holiday::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Holiday", "id", id));
        }
        Ok(())
    }
}
