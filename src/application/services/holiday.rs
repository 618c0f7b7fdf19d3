use std::sync::Arc;

use tracing::info;

use crate::domain::holiday::{Holiday, HolidayInput};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};
use crate::shared::{require_non_empty, PaginatedResult, PaginationParams};

use super::AuthenticatedUser;

pub struct HolidayService {
    repos: Arc<dyn RepositoryProvider>,
}

impl HolidayService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    fn prepare(caller: &AuthenticatedUser, mut input: HolidayInput) -> DomainResult<HolidayInput> {
        input.name = require_non_empty("name", &input.name).map_err(DomainError::Validation)?;
        input.validate().map_err(DomainError::Validation)?;
        input.actor = Some(caller.user_id);
        Ok(input)
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        input: HolidayInput,
    ) -> DomainResult<Holiday> {
        caller.require_admin()?;
        let holiday = self.repos.holidays().create(Self::prepare(caller, input)?).await?;
        info!(holiday_id = holiday.id, year = holiday.year, "Holiday created");
        Ok(holiday)
    }

    pub async fn list(
        &self,
        year: Option<i32>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Holiday>> {
        self.repos.holidays().list(year, page).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Holiday> {
        self.repos
            .holidays()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Holiday", "id", id))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        input: HolidayInput,
    ) -> DomainResult<Holiday> {
        caller.require_admin()?;
        self.get(id).await?;
        self.repos
            .holidays()
            .update(id, Self::prepare(caller, input)?)
            .await
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        caller.require_admin()?;
        self.repos.holidays().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;
    use chrono::NaiveDate;

    fn input(year: i32, start: (u32, u32), end: (u32, u32)) -> HolidayInput {
        HolidayInput {
            name: "Summer".into(),
            year,
            start_date: NaiveDate::from_ymd_opt(year, start.0, start.1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(year, end.0, end.1).unwrap(),
            actor: None,
        }
    }

    #[tokio::test]
    async fn list_filters_by_year() {
        let fx = fixture().await;
        let holidays = HolidayService::new(fx.repos.clone());
        holidays
            .create(&fx.admin_caller(), input(2024, (7, 1), (7, 14)))
            .await
            .unwrap();
        let created = holidays
            .create(&fx.admin_caller(), input(2025, (7, 1), (7, 14)))
            .await
            .unwrap();
        assert_eq!(created.created_by, Some(fx.admin.id));

        let page = holidays
            .list(Some(2025), PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].year, 2025);
    }

    #[tokio::test]
    async fn reversed_range_is_rejected() {
        let fx = fixture().await;
        let holidays = HolidayService::new(fx.repos.clone());
        let err = holidays
            .create(&fx.admin_caller(), input(2024, (7, 14), (7, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
