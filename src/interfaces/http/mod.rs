//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping and extractors
//! - `middleware`: bearer-token authentication
//! - `modules`: one module per resource (DTOs + handlers)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

pub use router::create_api_router;
pub use state::ApiState;
