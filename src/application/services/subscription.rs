use std::sync::Arc;

use tracing::info;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::subscription::model::normalize_email;
use crate::domain::subscription::Subscription;
use crate::domain::{DomainError, DomainResult};
use crate::shared::{PaginatedResult, PaginationParams};

use super::AuthenticatedUser;

/// Newsletter sign-ups. Subscribe and unsubscribe are public.
pub struct SubscriptionService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SubscriptionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Subscribing an already active address is a no-op; an inactive one
    /// is reactivated.
    pub async fn subscribe(&self, email: &str) -> DomainResult<Subscription> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("A valid email is required".into()));
        }

        match self.repos.subscriptions().find_by_email(&email).await? {
            Some(existing) if existing.is_active => Ok(existing),
            Some(mut existing) => {
                existing.resubscribe();
                let saved = self.repos.subscriptions().save(existing).await?;
                info!(subscription_id = saved.id, "Subscription reactivated");
                Ok(saved)
            }
            None => {
                let created = self.repos.subscriptions().create(&email).await?;
                info!(subscription_id = created.id, "Subscription created");
                Ok(created)
            }
        }
    }

    pub async fn unsubscribe(&self, email: &str) -> DomainResult<Subscription> {
        let email = normalize_email(email);
        let mut subscription = self
            .repos
            .subscriptions()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("Subscription", "email", &email))?;

        if !subscription.is_active {
            return Ok(subscription);
        }
        subscription.unsubscribe();
        self.repos.subscriptions().save(subscription).await
    }

    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
        active: Option<bool>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Subscription>> {
        caller.require_admin()?;
        self.repos.subscriptions().list(active, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;

    #[tokio::test]
    async fn subscribe_is_idempotent_and_reactivates() {
        let fx = fixture().await;
        let subs = SubscriptionService::new(fx.repos.clone());

        let first = subs.subscribe("Fan@Example.com").await.unwrap();
        let again = subs.subscribe("fan@example.com ").await.unwrap();
        assert_eq!(first.id, again.id);
        assert_eq!(again.email, "fan@example.com");

        let gone = subs.unsubscribe("fan@example.com").await.unwrap();
        assert!(!gone.is_active);
        assert!(gone.unsubscribed_at.is_some());

        let back = subs.subscribe("fan@example.com").await.unwrap();
        assert_eq!(back.id, first.id);
        assert!(back.is_active);
        assert!(back.unsubscribed_at.is_none());
    }

    #[tokio::test]
    async fn unknown_unsubscribe_is_not_found() {
        let fx = fixture().await;
        let subs = SubscriptionService::new(fx.repos.clone());
        let err = subs.unsubscribe("nobody@example.com").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn listing_requires_admin() {
        let fx = fixture().await;
        let subs = SubscriptionService::new(fx.repos.clone());
        subs.subscribe("a@example.com").await.unwrap();
        assert!(subs
            .list(&fx.owner_caller(), None, PaginationParams::default())
            .await
            .is_err());
        let page = subs
            .list(&fx.admin_caller(), Some(true), PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }
}
