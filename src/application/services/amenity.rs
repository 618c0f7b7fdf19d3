use std::sync::Arc;

use tracing::info;

use crate::domain::amenity::{Amenity, AmenityChanges, NewAmenity};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};
use crate::shared::{require_non_empty, PaginatedResult, PaginationParams};

use super::AuthenticatedUser;

#[derive(Debug, Clone)]
pub struct AmenityInput {
    pub amenity_name: String,
    pub amenity_type: Option<String>,
    pub description: Option<String>,
}

pub struct AmenityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AmenityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn ensure_name_free(&self, name: &str, except: Option<i32>) -> DomainResult<()> {
        match self.repos.amenities().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::Conflict(format!(
                "Amenity '{}' already exists",
                name
            ))),
            _ => Ok(()),
        }
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        input: AmenityInput,
    ) -> DomainResult<Amenity> {
        caller.require_admin()?;
        let amenity_name =
            require_non_empty("amenity_name", &input.amenity_name).map_err(DomainError::Validation)?;
        self.ensure_name_free(&amenity_name, None).await?;

        let amenity = self
            .repos
            .amenities()
            .create(NewAmenity {
                amenity_name,
                amenity_type: input.amenity_type,
                description: input.description,
                created_by: Some(caller.user_id),
            })
            .await?;
        info!(amenity_id = amenity.id, "Amenity created");
        Ok(amenity)
    }

    pub async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Amenity>> {
        self.repos.amenities().list(search, page).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Amenity> {
        self.repos
            .amenities()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Amenity", "id", id))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        mut changes: AmenityChanges,
    ) -> DomainResult<Amenity> {
        caller.require_admin()?;
        self.get(id).await?;
        if let Some(name) = changes.amenity_name.take() {
            let name = require_non_empty("amenity_name", &name).map_err(DomainError::Validation)?;
            self.ensure_name_free(&name, Some(id)).await?;
            changes.amenity_name = Some(name);
        }
        changes.updated_by = Some(caller.user_id);
        self.repos.amenities().update(id, changes).await
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        caller.require_admin()?;
        self.repos.amenities().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;

    fn input(name: &str) -> AmenityInput {
        AmenityInput {
            amenity_name: name.into(),
            amenity_type: Some("Outdoor".into()),
            description: None,
        }
    }

    #[tokio::test]
    async fn names_are_unique() {
        let fx = fixture().await;
        let amenities = AmenityService::new(fx.repos.clone());
        let hot_tub = amenities.create(&fx.admin_caller(), input("Hot tub")).await.unwrap();
        let err = amenities
            .create(&fx.admin_caller(), input("hot TUB"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let sauna = amenities.create(&fx.admin_caller(), input("Sauna")).await.unwrap();
        let err = amenities
            .update(
                &fx.admin_caller(),
                sauna.id,
                AmenityChanges {
                    amenity_name: Some("Hot tub".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(amenities.get(hot_tub.id).await.unwrap().amenity_name, "Hot tub");
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let fx = fixture().await;
        let amenities = AmenityService::new(fx.repos.clone());
        let err = amenities.delete(&fx.admin_caller(), 77).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
