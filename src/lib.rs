//! # PropShare Service
//!
//! Administrative back end for a property-sharing business: owners, shared
//! properties, holidays, bookings, access codes and support tickets.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Aggregates, repository traits and the booking identifier rules
//! - **application**: Services (use cases), ports and background tasks
//! - **infrastructure**: Database, crypto, mail transport and upload storage
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors, pagination, retry and shutdown helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
