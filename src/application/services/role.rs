use std::sync::Arc;

use tracing::info;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::role::{NewRole, Role, RoleChanges};
use crate::domain::{DomainError, DomainResult};
use crate::shared::{require_non_empty, PaginatedResult, PaginationParams};

use super::AuthenticatedUser;

pub struct RoleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RoleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn ensure_name_free(&self, role_name: &str, except: Option<i32>) -> DomainResult<()> {
        if let Some(existing) = self.repos.roles().find_by_name(role_name).await? {
            if Some(existing.id) != except {
                return Err(DomainError::Conflict(format!(
                    "Role '{}' already exists",
                    role_name
                )));
            }
        }
        Ok(())
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        role_name: &str,
        description: Option<String>,
    ) -> DomainResult<Role> {
        caller.require_admin()?;
        let role_name = require_non_empty("role_name", role_name).map_err(DomainError::Validation)?;
        self.ensure_name_free(&role_name, None).await?;

        let role = self
            .repos
            .roles()
            .create(NewRole {
                role_name,
                description,
                created_by: Some(caller.user_id),
            })
            .await?;
        info!(role_id = role.id, role_name = %role.role_name, "Role created");
        Ok(role)
    }

    pub async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Role>> {
        self.repos.roles().list(search, page).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Role> {
        self.repos
            .roles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", "id", id))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        mut changes: RoleChanges,
    ) -> DomainResult<Role> {
        caller.require_admin()?;
        self.get(id).await?;

        if let Some(name) = changes.role_name.take() {
            let name = require_non_empty("role_name", &name).map_err(DomainError::Validation)?;
            self.ensure_name_free(&name, Some(id)).await?;
            changes.role_name = Some(name);
        }
        changes.updated_by = Some(caller.user_id);

        self.repos.roles().update(id, changes).await
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        caller.require_admin()?;
        self.get(id).await?;

        let in_use = self.repos.users().count_by_role(id).await?;
        if in_use > 0 {
            return Err(DomainError::Conflict(format!(
                "Role is assigned to {} user(s)",
                in_use
            )));
        }

        self.repos.roles().delete(id).await?;
        info!(role_id = id, "Role deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;

    #[tokio::test]
    async fn names_are_unique_ignoring_case() {
        let fx = fixture().await;
        let roles = RoleService::new(fx.repos.clone());

        roles
            .create(&fx.admin_caller(), "Manager", None)
            .await
            .unwrap();
        let err = roles
            .create(&fx.admin_caller(), "  MANAGER ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn only_admins_create_roles() {
        let fx = fixture().await;
        let roles = RoleService::new(fx.repos.clone());
        let err = roles
            .create(&fx.owner_caller(), "Manager", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let fx = fixture().await;
        let roles = RoleService::new(fx.repos.clone());
        let err = roles.create(&fx.admin_caller(), "  ", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn role_in_use_cannot_be_deleted() {
        let fx = fixture().await;
        let roles = RoleService::new(fx.repos.clone());
        let err = roles
            .delete(&fx.admin_caller(), fx.owner.role_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let unused = roles
            .create(&fx.admin_caller(), "Guest", None)
            .await
            .unwrap();
        roles.delete(&fx.admin_caller(), unused.id).await.unwrap();
        assert!(matches!(
            roles.get(unused.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn rename_keeps_own_name() {
        let fx = fixture().await;
        let roles = RoleService::new(fx.repos.clone());
        let updated = roles
            .update(
                &fx.admin_caller(),
                fx.owner.role_id,
                RoleChanges {
                    role_name: Some("OWNER".into()),
                    description: Some("Share owners".into()),
                    updated_by: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role_name, "OWNER");
        assert_eq!(updated.updated_by, Some(fx.admin.id));
    }
}
