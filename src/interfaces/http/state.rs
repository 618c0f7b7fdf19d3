//! Shared state handed to every route group

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;

use super::middleware::AuthState;
use crate::application::{
    AmenityService, AuthService, BookingService, HolidayService, Mailer, PropertyCodeService,
    PropertyService, RoleService, SubscriptionService, TicketService, UserService,
};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::{ImageStore, UploadPolicy};

/// Services and runtime handles used by the handlers.
/// Axum extracts narrower states (e.g. [`AuthState`]) via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
    pub metrics: Option<PrometheusHandle>,
    pub upload_dir: PathBuf,
    /// Largest accepted multipart body for an image upload
    pub upload_body_limit: usize,
    pub auth: Arc<AuthService>,
    pub roles: Arc<RoleService>,
    pub users: Arc<UserService>,
    pub properties: Arc<PropertyService>,
    pub amenities: Arc<AmenityService>,
    pub property_codes: Arc<PropertyCodeService>,
    pub holidays: Arc<HolidayService>,
    pub bookings: Arc<BookingService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub tickets: Arc<TicketService>,
}

impl ApiState {
    pub fn new(db: DatabaseConnection, config: &AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let policy = UploadPolicy::from(&config.upload);
        let upload_body_limit = policy
            .max_file_size
            .saturating_mul(policy.max_files.max(1))
            .saturating_add(64 * 1024);

        Self {
            db,
            started_at: Arc::new(Instant::now()),
            metrics: None,
            upload_dir: config.upload.dir.clone(),
            upload_body_limit,
            auth: Arc::new(AuthService::new(
                repos.clone(),
                JwtConfig::from_security(&config.security),
            )),
            roles: Arc::new(RoleService::new(repos.clone())),
            users: Arc::new(UserService::new(repos.clone())),
            properties: Arc::new(PropertyService::new(
                repos.clone(),
                ImageStore::new(config.upload.dir.clone()),
                policy,
            )),
            amenities: Arc::new(AmenityService::new(repos.clone())),
            property_codes: Arc::new(PropertyCodeService::new(repos.clone())),
            holidays: Arc::new(HolidayService::new(repos.clone())),
            bookings: Arc::new(BookingService::new(repos.clone())),
            subscriptions: Arc::new(SubscriptionService::new(repos.clone())),
            tickets: Arc::new(TicketService::new(
                repos,
                mailer,
                config.mail.support_address.clone(),
            )),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(state: &ApiState) -> Self {
        AuthState {
            auth: Arc::clone(&state.auth),
        }
    }
}
