use std::sync::Arc;

use tracing::info;

use crate::domain::property_code::model::normalize_code_type;
use crate::domain::property_code::{NewPropertyCode, PropertyCode, PropertyCodeChanges};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};
use crate::shared::{require_non_empty, PaginatedResult, PaginationParams};

use super::AuthenticatedUser;

/// Access codes are visible to any signed-in user and managed by admins.
pub struct PropertyCodeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PropertyCodeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn ensure_property(&self, property_id: i32) -> DomainResult<()> {
        self.repos
            .properties()
            .find_by_id(property_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Property", "id", property_id))
    }

    async fn ensure_type_free(
        &self,
        property_id: i32,
        code_type: &str,
        except: Option<i32>,
    ) -> DomainResult<()> {
        match self.repos.property_codes().find_by_type(property_id, code_type).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::Conflict(format!(
                "Property {} already has a '{}' code",
                property_id, code_type
            ))),
            _ => Ok(()),
        }
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        mut code: NewPropertyCode,
    ) -> DomainResult<PropertyCode> {
        caller.require_admin()?;
        self.ensure_property(code.property_id).await?;

        code.code_type = normalize_code_type(&code.code_type);
        if code.code_type.is_empty() {
            return Err(DomainError::Validation("code_type must not be empty".into()));
        }
        code.code = require_non_empty("code", &code.code).map_err(DomainError::Validation)?;
        self.ensure_type_free(code.property_id, &code.code_type, None).await?;

        code.created_by = Some(caller.user_id);
        let created = self.repos.property_codes().create(code).await?;
        info!(
            property_id = created.property_id,
            code_type = %created.code_type,
            "Property code created"
        );
        Ok(created)
    }

    pub async fn list(
        &self,
        property_id: Option<i32>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<PropertyCode>> {
        if let Some(property_id) = property_id {
            self.ensure_property(property_id).await?;
        }
        self.repos.property_codes().list(property_id, page).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<PropertyCode> {
        self.repos
            .property_codes()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("PropertyCode", "id", id))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        mut changes: PropertyCodeChanges,
    ) -> DomainResult<PropertyCode> {
        caller.require_admin()?;
        let current = self.get(id).await?;

        if let Some(code_type) = changes.code_type.take() {
            let code_type = normalize_code_type(&code_type);
            if code_type.is_empty() {
                return Err(DomainError::Validation("code_type must not be empty".into()));
            }
            self.ensure_type_free(current.property_id, &code_type, Some(id))
                .await?;
            changes.code_type = Some(code_type);
        }
        if let Some(code) = changes.code.take() {
            changes.code = Some(require_non_empty("code", &code).map_err(DomainError::Validation)?);
        }
        changes.updated_by = Some(caller.user_id);

        self.repos.property_codes().update(id, changes).await
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        caller.require_admin()?;
        self.repos.property_codes().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;

    fn code(property_id: i32, code_type: &str) -> NewPropertyCode {
        NewPropertyCode {
            property_id,
            code_type: code_type.into(),
            code: "4321".into(),
            description: None,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn one_code_per_type() {
        let fx = fixture().await;
        let codes = PropertyCodeService::new(fx.repos.clone());

        let door = codes
            .create(&fx.admin_caller(), code(fx.property.id, " Door "))
            .await
            .unwrap();
        assert_eq!(door.code_type, "door");

        let err = codes
            .create(&fx.admin_caller(), code(fx.property.id, "DOOR"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        codes
            .create(&fx.admin_caller(), code(fx.property.id, "wifi"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_property_is_not_found() {
        let fx = fixture().await;
        let codes = PropertyCodeService::new(fx.repos.clone());
        let err = codes
            .create(&fx.admin_caller(), code(9999, "door"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Property", .. }));
    }
}
