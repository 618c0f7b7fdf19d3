//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, database and
//! migrations, first-run seeding, the REST API, the booking reminder task
//! and graceful shutdown.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::services::{BookingReminder, CreateUser, ReminderSettings, UserService};
use crate::config::{AppConfig, LoggingConfig};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::role::{NewRole, Role, ADMIN_ROLE, OWNER_ROLE};
use crate::domain::DomainResult;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{build_mailer, init_database, DatabaseConfig};
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::SeaOrmRepositoryProvider;

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed the built-in roles and the default admin when no user exists
    /// (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

/// Handle to a running service.
///
/// ```rust,no_run
/// use propshare::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Port the REST API is bound to.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
    reminder_task: Option<JoinHandle<()>>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!(version = env!("CARGO_PKG_VERSION"), "Starting PropShare service...");

        let prometheus_handle = prometheus_handle();

        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
            max_connections: app_cfg.database.max_connections,
        };
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if opts.create_default_admin {
            if let Err(e) = seed_defaults(repos.clone(), &app_cfg).await {
                error!(error = %e, "Failed to seed default roles and admin");
            }
        }

        let mailer = build_mailer(&app_cfg.mail)?;

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let reminder_task = if app_cfg.reminders.enabled {
            let reminder = Arc::new(BookingReminder::new(
                repos.clone(),
                mailer.clone(),
                ReminderSettings {
                    interval_secs: app_cfg.reminders.interval_secs,
                    days_before: app_cfg.reminders.days_before,
                },
            ));
            Some(reminder.start(shutdown_signal.clone()))
        } else {
            info!("Booking reminders disabled");
            None
        };

        let mut state = ApiState::new(db.clone(), &app_cfg, mailer);
        if let Some(handle) = prometheus_handle {
            state = state.with_metrics(handle);
        }
        let api_router = create_api_router(state);

        let api_port = app_cfg.server.api_port;
        let api_addr = format!("{}:{}", app_cfg.server.api_host, api_port);
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 PropShare service started");

        Ok(Self {
            repos,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
            reminder_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install SIGTERM / SIGINT listeners that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the API server to stop, then drain background tasks within
    /// the configured shutdown timeout and close the database.
    pub async fn wait(self) {
        match self.api_task.await {
            Ok(()) => info!("REST API server stopped"),
            Err(e) => error!("REST API server task panicked: {}", e),
        }

        // The API can also stop on its own (bind loss); make sure the
        // reminder loop sees the signal either way.
        self.shutdown.signal().trigger();

        let reminder_task = self.reminder_task;
        let db = self.db;
        self.shutdown
            .shutdown_with_cleanup(|| async move {
                if let Some(task) = reminder_task {
                    if let Err(e) = task.await {
                        error!("Reminder task panicked: {}", e);
                    }
                }
                if let Err(e) = db.close().await {
                    warn!("Error closing database connection: {}", e);
                } else {
                    info!("✅ Database connection closed");
                }
            })
            .await;

        info!("👋 PropShare service shutdown complete");
    }

    pub async fn shutdown(self) {
        info!("🛑 Shutting down PropShare service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// The global recorder can be installed once per process; later starts
/// reuse the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
                None
            }
        })
        .clone()
}

async fn ensure_role(
    repos: &Arc<dyn RepositoryProvider>,
    role_name: &str,
    description: &str,
) -> DomainResult<Role> {
    if let Some(role) = repos.roles().find_by_name(role_name).await? {
        return Ok(role);
    }
    info!(role = role_name, "Creating built-in role");
    repos
        .roles()
        .create(NewRole {
            role_name: role_name.to_string(),
            description: Some(description.to_string()),
            created_by: None,
        })
        .await
}

/// Create the built-in roles, then the default admin when the user table is
/// empty.
pub async fn seed_defaults(
    repos: Arc<dyn RepositoryProvider>,
    app_cfg: &AppConfig,
) -> DomainResult<()> {
    let admin_role = ensure_role(&repos, ADMIN_ROLE, "Back-office administrator").await?;
    ensure_role(&repos, OWNER_ROLE, "Share owner").await?;

    let users = UserService::new(repos);
    if users.count().await? > 0 {
        return Ok(());
    }

    info!("Creating default admin user...");
    let admin = users
        .create(
            CreateUser {
                first_name: app_cfg.admin.first_name.clone(),
                last_name: app_cfg.admin.last_name.clone(),
                email: app_cfg.admin.email.clone(),
                password: app_cfg.admin.password.clone(),
                phone: None,
                role_id: admin_role.id,
            },
            None,
        )
        .await?;
    info!(email = %admin.email, "Default admin created");
    warn!("⚠️  Please change the admin password immediately!");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`;
/// `logging.format = "json"` selects structured output. Call once, before
/// [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let logging: &LoggingConfig = &config.logging;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json().with_current_span(true)).init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::memory_db;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(memory_db().await));
        let config = AppConfig::default();

        seed_defaults(repos.clone(), &config).await.unwrap();
        seed_defaults(repos.clone(), &config).await.unwrap();

        assert_eq!(repos.users().count().await.unwrap(), 1);
        let admin = repos
            .users()
            .find_by_email(&config.admin.email.to_lowercase())
            .await
            .unwrap()
            .unwrap();
        let role = repos.roles().find_by_id(admin.role_id).await.unwrap().unwrap();
        assert!(role.is_admin());
        assert!(repos.roles().find_by_name(OWNER_ROLE).await.unwrap().is_some());
    }
}
