//! Authentication and session management
//!
//! A login creates a `user_sessions` row and a JWT whose `sid` claim names
//! that row. A token is honoured only while its session is active, not
//! expired, and holds the token's SHA-256 fingerprint.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{info, warn};

use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::User;
use crate::domain::user_session::{NewUserSession, UserSession};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::crypto::password::MIN_PASSWORD_LENGTH;
use crate::infrastructure::crypto::{
    create_token, generate_session_key, hash_password, hash_token, verify_password, verify_token,
    JwtConfig,
};

/// The caller of a protected request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub role_name: String,
    /// `None` only for callers built outside the login flow
    pub session_id: Option<i32>,
}

impl AuthenticatedUser {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role_name: user.role_name.clone(),
            session_id: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role_name
            .eq_ignore_ascii_case(crate::domain::role::ADMIN_ROLE)
    }

    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Administrator role required".into()))
        }
    }

    /// Admins act for anyone; everyone else only for themselves.
    pub fn require_self_or_admin(&self, user_id: i32) -> DomainResult<()> {
        if self.user_id == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "Not allowed to act on behalf of another user".into(),
            ))
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub session_id: i32,
    pub user: User,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    /// Verify credentials and open a session.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> DomainResult<LoginResult> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            warn!(email = %email, "Login failed: unknown email");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let session_key = generate_session_key();
        let (token, claims) = create_token(
            user.id,
            &user.email,
            &user.role_name,
            &session_key,
            &self.jwt_config,
        )
        .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or_else(Utc::now);

        let session = self
            .repos
            .user_sessions()
            .create(NewUserSession {
                session_key,
                user_id: user.id,
                token_hash: hash_token(&token),
                ip_address,
                user_agent,
                expires_at,
            })
            .await?;

        self.repos.users().touch_last_login(user.id).await?;
        info!(user_id = user.id, session_id = session.id, "User logged in");

        Ok(LoginResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            expires_at,
            session_id: session.id,
            user,
        })
    }

    /// Resolve a bearer token to its caller.
    pub async fn authenticate(&self, token: &str) -> DomainResult<AuthenticatedUser> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|_| DomainError::Unauthorized("Invalid or expired token".into()))?;

        let session = self
            .repos
            .user_sessions()
            .find_by_key(&claims.sid)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Session not found".into()))?;

        if !session.is_valid() {
            return Err(DomainError::Unauthorized("Session expired or revoked".into()));
        }
        if session.token_hash != hash_token(token) {
            return Err(DomainError::Unauthorized("Token does not match session".into()));
        }

        let user = self
            .repos
            .users()
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("User no longer exists".into()))?;
        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        self.repos.user_sessions().touch(session.id).await?;

        Ok(AuthenticatedUser {
            user_id: user.id,
            email: user.email,
            role_name: user.role_name,
            session_id: Some(session.id),
        })
    }

    pub async fn logout(&self, caller: &AuthenticatedUser) -> DomainResult<()> {
        if let Some(session_id) = caller.session_id {
            self.repos.user_sessions().deactivate(session_id).await?;
            info!(user_id = caller.user_id, session_id, "User logged out");
        }
        Ok(())
    }

    pub async fn me(&self, caller: &AuthenticatedUser) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(caller.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", caller.user_id))
    }

    /// Replace the caller's password and revoke all of their sessions.
    /// Returns the number of sessions revoked.
    pub async fn change_password(
        &self,
        caller: &AuthenticatedUser,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<u64> {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let user = self.me(caller).await?;
        if !verify_password(current_password, &user.password_hash).unwrap_or(false) {
            return Err(DomainError::Validation("Current password is incorrect".into()));
        }

        let hashed = hash_password(new_password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        self.repos.users().update_password(user.id, &hashed).await?;

        let revoked = self
            .repos
            .user_sessions()
            .deactivate_all_for_user(user.id)
            .await?;
        info!(user_id = user.id, revoked, "Password changed");
        Ok(revoked)
    }

    /// Sessions of `user_id` (default: the caller).
    pub async fn list_sessions(
        &self,
        caller: &AuthenticatedUser,
        user_id: Option<i32>,
        active_only: bool,
    ) -> DomainResult<Vec<UserSession>> {
        let user_id = user_id.unwrap_or(caller.user_id);
        caller.require_self_or_admin(user_id)?;
        self.repos
            .user_sessions()
            .list_for_user(user_id, active_only)
            .await
    }

    pub async fn revoke_session(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        let session = self
            .repos
            .user_sessions()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("UserSession", "id", id))?;
        caller.require_self_or_admin(session.user_id)?;
        self.repos.user_sessions().deactivate(id).await?;
        info!(session_id = id, by = caller.user_id, "Session revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "propshare".into(),
        }
    }

    #[tokio::test]
    async fn login_then_authenticate() {
        let fx = fixture().await;
        let auth = AuthService::new(fx.repos.clone(), jwt());

        let login = auth
            .login("OWNER@example.com", "password123", Some("127.0.0.1".into()), None)
            .await
            .unwrap();
        assert_eq!(login.token_type, "Bearer");

        let caller = auth.authenticate(&login.token).await.unwrap();
        assert_eq!(caller.user_id, fx.owner.id);
        assert_eq!(caller.session_id, Some(login.session_id));
        assert!(!caller.is_admin());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let fx = fixture().await;
        let auth = AuthService::new(fx.repos.clone(), jwt());
        let err = auth
            .login("owner@example.com", "nope", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn logout_revokes_the_token() {
        let fx = fixture().await;
        let auth = AuthService::new(fx.repos.clone(), jwt());
        let login = auth
            .login("owner@example.com", "password123", None, None)
            .await
            .unwrap();
        let caller = auth.authenticate(&login.token).await.unwrap();

        auth.logout(&caller).await.unwrap();

        let err = auth.authenticate(&login.token).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn change_password_revokes_all_sessions() {
        let fx = fixture().await;
        let auth = AuthService::new(fx.repos.clone(), jwt());
        let first = auth
            .login("owner@example.com", "password123", None, None)
            .await
            .unwrap();
        auth.login("owner@example.com", "password123", None, None)
            .await
            .unwrap();
        let caller = auth.authenticate(&first.token).await.unwrap();

        let wrong = auth
            .change_password(&caller, "bad", "new-password-1")
            .await
            .unwrap_err();
        assert!(matches!(wrong, DomainError::Validation(_)));

        let revoked = auth
            .change_password(&caller, "password123", "new-password-1")
            .await
            .unwrap();
        assert_eq!(revoked, 2);
        assert!(auth.authenticate(&first.token).await.is_err());
        assert!(auth
            .login("owner@example.com", "new-password-1", None, None)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn owners_cannot_revoke_other_sessions() {
        let fx = fixture().await;
        let auth = AuthService::new(fx.repos.clone(), jwt());
        let admin_login = auth
            .login("admin@example.com", "password123", None, None)
            .await
            .unwrap();

        let err = auth
            .revoke_session(&fx.owner_caller(), admin_login.session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let err = auth
            .list_sessions(&fx.owner_caller(), Some(fx.admin.id), true)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let sessions = auth
            .list_sessions(&fx.admin_caller(), Some(fx.admin.id), true)
            .await
            .unwrap();
        assert_eq!(sessions.len(), 1);
    }
}
