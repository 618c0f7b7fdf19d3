use std::sync::Arc;

use tracing::info;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::{NewUser, User, UserChanges, UserFilter};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::crypto::hash_password;
use crate::infrastructure::crypto::password::MIN_PASSWORD_LENGTH;
use crate::shared::{require_non_empty, PaginatedResult, PaginationParams};

use super::AuthenticatedUser;

/// Input for a new account
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role_id: i32,
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

fn normalize_email(email: &str) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::Validation("A valid email is required".into()));
    }
    Ok(email)
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn ensure_role_exists(&self, role_id: i32) -> DomainResult<()> {
        self.repos
            .roles()
            .find_by_id(role_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Role", "id", role_id))
    }

    async fn ensure_email_free(&self, email: &str, except: Option<i32>) -> DomainResult<()> {
        if let Some(existing) = self.repos.users().find_by_email(email).await? {
            if Some(existing.id) != except {
                return Err(DomainError::Conflict(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
        }
        Ok(())
    }

    /// Create an account. `created_by` is `None` for bootstrap seeding.
    pub async fn create(&self, input: CreateUser, created_by: Option<i32>) -> DomainResult<User> {
        let first_name =
            require_non_empty("first_name", &input.first_name).map_err(DomainError::Validation)?;
        let last_name =
            require_non_empty("last_name", &input.last_name).map_err(DomainError::Validation)?;
        let email = normalize_email(&input.email)?;
        if input.password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        self.ensure_role_exists(input.role_id).await?;
        self.ensure_email_free(&email, None).await?;

        let password_hash = hash_password(&input.password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repos
            .users()
            .create(NewUser {
                first_name,
                last_name,
                email,
                password_hash,
                phone: input.phone,
                role_id: input.role_id,
                created_by,
            })
            .await?;
        info!(user_id = user.id, role = %user.role_name, "User created");
        Ok(user)
    }

    pub async fn create_by(
        &self,
        caller: &AuthenticatedUser,
        input: CreateUser,
    ) -> DomainResult<User> {
        caller.require_admin()?;
        self.create(input, Some(caller.user_id)).await
    }

    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
        filter: UserFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>> {
        caller.require_admin()?;
        self.repos.users().list(filter, page).await
    }

    pub async fn get(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<User> {
        caller.require_self_or_admin(id)?;
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    /// Owners may edit their own profile but not their role or activation.
    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        mut changes: UserChanges,
    ) -> DomainResult<User> {
        self.get(caller, id).await?;

        if !caller.is_admin() && (changes.role_id.is_some() || changes.is_active.is_some()) {
            return Err(DomainError::Forbidden(
                "Only administrators may change roles or activation".into(),
            ));
        }
        if let Some(name) = changes.first_name.take() {
            changes.first_name =
                Some(require_non_empty("first_name", &name).map_err(DomainError::Validation)?);
        }
        if let Some(name) = changes.last_name.take() {
            changes.last_name =
                Some(require_non_empty("last_name", &name).map_err(DomainError::Validation)?);
        }
        if let Some(email) = changes.email.take() {
            let email = normalize_email(&email)?;
            self.ensure_email_free(&email, Some(id)).await?;
            changes.email = Some(email);
        }
        if let Some(role_id) = changes.role_id {
            self.ensure_role_exists(role_id).await?;
        }
        changes.updated_by = Some(caller.user_id);

        let user = self.repos.users().update(id, changes).await?;
        if !user.is_active {
            self.repos.user_sessions().deactivate_all_for_user(id).await?;
        }
        Ok(user)
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        caller.require_admin()?;
        if caller.user_id == id {
            return Err(DomainError::Validation(
                "Administrators cannot delete their own account".into(),
            ));
        }
        self.repos.users().delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.repos.users().count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;

    fn input(email: &str, role_id: i32) -> CreateUser {
        CreateUser {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: email.into(),
            password: "correct-horse".into(),
            phone: None,
            role_id,
        }
    }

    #[tokio::test]
    async fn create_normalizes_email_and_hashes_password() {
        let fx = fixture().await;
        let users = UserService::new(fx.repos.clone());
        let user = users
            .create_by(&fx.admin_caller(), input("  Jane@Example.COM ", fx.owner.role_id))
            .await
            .unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_ne!(user.password_hash, "correct-horse");
        assert_eq!(user.role_name, "owner");
        assert_eq!(user.created_by, Some(fx.admin.id));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let fx = fixture().await;
        let users = UserService::new(fx.repos.clone());
        let err = users
            .create_by(&fx.admin_caller(), input("OWNER@example.com", fx.owner.role_id))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_role_is_not_found() {
        let fx = fixture().await;
        let users = UserService::new(fx.repos.clone());
        let err = users
            .create_by(&fx.admin_caller(), input("new@example.com", 999))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Role", .. }));
    }

    #[tokio::test]
    async fn owners_cannot_promote_themselves() {
        let fx = fixture().await;
        let users = UserService::new(fx.repos.clone());
        let err = users
            .update(
                &fx.owner_caller(),
                fx.owner.id,
                UserChanges {
                    role_id: Some(fx.admin.role_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let renamed = users
            .update(
                &fx.owner_caller(),
                fx.owner.id,
                UserChanges {
                    phone: Some("555-0100".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.phone.as_deref(), Some("555-0100"));
    }

    #[tokio::test]
    async fn listing_is_admin_only() {
        let fx = fixture().await;
        let users = UserService::new(fx.repos.clone());
        assert!(users
            .list(&fx.owner_caller(), UserFilter::default(), PaginationParams::default())
            .await
            .is_err());
        let all = users
            .list(&fx.admin_caller(), UserFilter::default(), PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(all.total, 2);
    }
}
