//! API Router with Swagger UI

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiError, ApiResponse, IdRef, PaginatedResponse};
use super::middleware::{auth_middleware, AuthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics};
use super::modules::request_id::request_id_middleware;
use super::modules::{
    amenities, auth, bookings, health, holidays, properties, property_codes, roles, sessions,
    subscriptions, tickets, users,
};
use super::ApiState;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::logout,
        auth::get_current_user,
        auth::change_password,
        // Sessions
        sessions::list_sessions,
        sessions::revoke_session,
        // Roles
        roles::create_role,
        roles::list_roles,
        roles::get_role,
        roles::update_role,
        roles::delete_role,
        // Users
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Properties
        properties::create_property,
        properties::list_properties,
        properties::get_property,
        properties::update_property,
        properties::delete_property,
        properties::list_property_amenities,
        properties::set_property_amenities,
        properties::list_property_images,
        properties::upload_property_images,
        properties::delete_property_image,
        // Amenities
        amenities::create_amenity,
        amenities::list_amenities,
        amenities::get_amenity,
        amenities::update_amenity,
        amenities::delete_amenity,
        // Property codes
        property_codes::create_property_code,
        property_codes::list_property_codes,
        property_codes::get_property_code,
        property_codes::update_property_code,
        property_codes::delete_property_code,
        // Holidays
        holidays::create_holiday,
        holidays::list_holidays,
        holidays::get_holiday,
        holidays::update_holiday,
        holidays::delete_holiday,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::get_booking_by_reference,
        bookings::update_booking,
        bookings::cancel_booking,
        // Subscriptions
        subscriptions::subscribe,
        subscriptions::unsubscribe,
        subscriptions::list_subscriptions,
        // Tickets
        tickets::create_contact_ticket,
        tickets::create_maintenance_ticket,
        tickets::list_tickets,
        tickets::get_ticket,
        tickets::update_ticket_status,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            IdRef,
            PaginatedResponse<bookings::BookingDto>,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::ChangePasswordRequest,
            auth::PasswordChanged,
            sessions::SessionDto,
            // Roles / users
            roles::RoleDto,
            roles::CreateRoleRequest,
            roles::UpdateRoleRequest,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            // Properties
            properties::PropertyDto,
            properties::CreatePropertyRequest,
            properties::UpdatePropertyRequest,
            properties::SetAmenitiesRequest,
            properties::PropertyImageDto,
            properties::ImageUploadForm,
            amenities::AmenityDto,
            amenities::CreateAmenityRequest,
            amenities::UpdateAmenityRequest,
            property_codes::PropertyCodeDto,
            property_codes::CreatePropertyCodeRequest,
            property_codes::UpdatePropertyCodeRequest,
            // Calendar
            holidays::HolidayDto,
            holidays::HolidayRequest,
            bookings::BookingDto,
            bookings::CreateBookingRequest,
            bookings::UpdateBookingRequest,
            // Outreach
            subscriptions::SubscriptionDto,
            subscriptions::SubscriptionRequest,
            tickets::TicketDto,
            tickets::ContactUsRequest,
            tickets::MaintenanceTicketRequest,
            tickets::UpdateTicketStatusRequest,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Login (JWT), logout, profile and password change"),
        (name = "Sessions", description = "Login sessions backing issued tokens"),
        (name = "Roles", description = "Role management"),
        (name = "Users", description = "Owner and administrator accounts"),
        (name = "Properties", description = "Shared properties, their amenities and images"),
        (name = "Amenities", description = "Amenity catalogue"),
        (name = "Property Codes", description = "Per-property access codes (door, wifi, alarm...)"),
        (name = "Holidays", description = "Holiday calendar"),
        (name = "Bookings", description = "Stays with FX booking identifiers"),
        (name = "Subscriptions", description = "Newsletter sign-ups"),
        (name = "Tickets", description = "Contact-us and maintenance requests"),
    ),
    info(
        title = "PropShare Admin API",
        version = "1.0.0",
        description = "REST API for administering shared properties, owners and bookings",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Route not found")
}

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let auth_state = AuthState::from_ref(&state);

    // Public routes
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/subscriptions/subscribe", post(subscriptions::subscribe))
        .route("/subscriptions/unsubscribe", post(subscriptions::unsubscribe))
        .route("/tickets/contact", post(tickets::create_contact_ticket));

    // Protected routes; route_layer keeps unknown paths at 404
    let protected_routes = Router::new()
        // Auth
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/change-password", put(auth::change_password))
        // Sessions
        .route("/user-sessions", get(sessions::list_sessions))
        .route("/user-sessions/{id}", delete(sessions::revoke_session))
        // Roles
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route(
            "/roles/{id}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Properties
        .route(
            "/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route(
            "/properties/{id}",
            get(properties::get_property)
                .put(properties::update_property)
                .delete(properties::delete_property),
        )
        .route(
            "/properties/{id}/amenities",
            get(properties::list_property_amenities).put(properties::set_property_amenities),
        )
        .route(
            "/properties/{id}/images",
            get(properties::list_property_images)
                .post(properties::upload_property_images)
                .layer(DefaultBodyLimit::max(state.upload_body_limit)),
        )
        .route(
            "/properties/{id}/images/{image_id}",
            delete(properties::delete_property_image),
        )
        // Amenities
        .route(
            "/amenities",
            get(amenities::list_amenities).post(amenities::create_amenity),
        )
        .route(
            "/amenities/{id}",
            get(amenities::get_amenity)
                .put(amenities::update_amenity)
                .delete(amenities::delete_amenity),
        )
        // Property codes
        .route(
            "/property-codes",
            get(property_codes::list_property_codes).post(property_codes::create_property_code),
        )
        .route(
            "/property-codes/{id}",
            get(property_codes::get_property_code)
                .put(property_codes::update_property_code)
                .delete(property_codes::delete_property_code),
        )
        // Holidays
        .route(
            "/holidays",
            get(holidays::list_holidays).post(holidays::create_holiday),
        )
        .route(
            "/holidays/{id}",
            get(holidays::get_holiday)
                .put(holidays::update_holiday)
                .delete(holidays::delete_holiday),
        )
        // Bookings
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/bookings/reference/{booking_id}",
            get(bookings::get_booking_by_reference),
        )
        .route(
            "/bookings/{id}",
            get(bookings::get_booking).put(bookings::update_booking),
        )
        .route("/bookings/{id}/cancel", post(bookings::cancel_booking))
        // Subscriptions / tickets
        .route("/subscriptions", get(subscriptions::list_subscriptions))
        .route("/tickets", get(tickets::list_tickets))
        .route("/tickets/maintenance", post(tickets::create_maintenance_ticket))
        .route("/tickets/{id}", get(tickets::get_ticket))
        .route("/tickets/{id}/status", put(tickets::update_ticket_status))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());
    let uploads = ServeDir::new(&state.upload_dir);

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health / metrics
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        // REST API
        .nest("/api/v1", public_routes.merge(protected_routes))
        // Uploaded images
        .nest_service("/uploads", uploads)
        .fallback(route_not_found)
        .with_state(state)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request};
    use chrono::{Datelike, Utc};
    use serde_json::{json, Value};
    use tower::Service;

    use super::*;
    use crate::application::ports::mailer::testing::RecordingMailer;
    use crate::config::AppConfig;
    use crate::domain::repositories::RepositoryProvider;
    use crate::domain::role::{NewRole, ADMIN_ROLE};
    use crate::domain::user::NewUser;
    use crate::infrastructure::database::memory_db;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    struct TestApp {
        router: Router,
        mailer: Arc<RecordingMailer>,
    }

    impl TestApp {
        async fn send(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let body = match body {
                Some(value) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(value.to_string())
                }
                None => Body::empty(),
            };

            let mut svc = self.router.clone().into_service();
            let resp = svc.call(builder.body(body).unwrap()).await.unwrap();
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }

        async fn login(&self) -> String {
            let (status, body) = self
                .send(
                    "POST",
                    "/api/v1/auth/login",
                    None,
                    Some(json!({"email": "admin@example.com", "password": "password123"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{}", body);
            body["data"]["token"].as_str().unwrap().to_string()
        }
    }

    async fn app() -> TestApp {
        let db = memory_db().await;
        let repos = SeaOrmRepositoryProvider::new(db.clone());
        let role = repos
            .roles()
            .create(NewRole {
                role_name: ADMIN_ROLE.into(),
                description: None,
                created_by: None,
            })
            .await
            .unwrap();
        repos
            .users()
            .create(NewUser {
                first_name: "Ada".into(),
                last_name: "Admin".into(),
                email: "admin@example.com".into(),
                password_hash: bcrypt::hash("password123", 4).unwrap(),
                phone: None,
                role_id: role.id,
                created_by: None,
            })
            .await
            .unwrap();

        let mut config = AppConfig::default();
        config.upload.dir =
            std::env::temp_dir().join(format!("propshare-router-{}", uuid::Uuid::new_v4()));
        let mailer = Arc::new(RecordingMailer::default());
        let state = ApiState::new(db, &config, mailer.clone());
        TestApp {
            router: create_api_router(state),
            mailer,
        }
    }

    #[tokio::test]
    async fn health_uses_the_envelope() {
        let app = app().await;
        let (status, body) = app.send("GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["data"]["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_routes_return_404_envelope() {
        let app = app().await;
        let (status, body) = app.send("GET", "/api/v1/nothing-here", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 404);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = app().await;
        let (status, body) = app.send("GET", "/api/v1/roles", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["statusCode"], 401);

        let (status, _) = app.send("GET", "/api/v1/roles", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn logout_invalidates_the_token() {
        let app = app().await;
        let token = app.login().await;

        let (status, body) = app.send("GET", "/api/v1/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "admin@example.com");
        assert!(body["data"].get("password_hash").is_none());

        let (status, _) = app.send("POST", "/api/v1/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app.send("GET", "/api/v1/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_bodies_are_400() {
        let app = app().await;
        let token = app.login().await;

        let (status, body) = app
            .send("POST", "/api/v1/roles", Some(&token), Some(json!({"role_name": ""})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);

        let user = json!({
            "first_name": "Olive",
            "last_name": "Owner",
            "email": "olive@example.com",
            "password": "password123",
            "role": {"id": 0}
        });
        let (status, body) = app.send("POST", "/api/v1/users", Some(&token), Some(user)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("role.id"));
    }

    #[tokio::test]
    async fn duplicate_role_is_409() {
        let app = app().await;
        let token = app.login().await;
        let role = json!({"role_name": "Manager"});

        let (status, body) = app
            .send("POST", "/api/v1/roles", Some(&token), Some(role.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["statusCode"], 201);

        let (status, _) = app.send("POST", "/api/v1/roles", Some(&token), Some(role)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn booking_flow_assigns_sequential_identifiers() {
        let app = app().await;
        let token = app.login().await;

        let property = json!({
            "property_name": "Lake House",
            "address": "1 Shore Rd",
            "city": "Tahoe",
            "country": "US",
            "total_shares": 8,
            "guest_capacity": 4
        });
        let (status, body) = app
            .send("POST", "/api/v1/properties", Some(&token), Some(property))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let property_id = body["data"]["id"].as_i64().unwrap();
        let prefix = format!("FX{}{:02}", Utc::now().year(), property_id);

        let booking = |check_in: &str, check_out: &str| {
            json!({
                "property": {"id": property_id},
                "check_in": check_in,
                "check_out": check_out,
                "no_of_guests": 2
            })
        };

        let (status, body) = app
            .send("POST", "/api/v1/bookings", Some(&token), Some(booking("2030-01-10", "2030-01-15")))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["data"]["booking_id"], format!("{}01", prefix));
        let first_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = app
            .send("POST", "/api/v1/bookings", Some(&token), Some(booking("2030-02-01", "2030-02-03")))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["booking_id"], format!("{}02", prefix));

        let (status, _) = app
            .send("POST", "/api/v1/bookings", Some(&token), Some(booking("2030-01-12", "2030-01-20")))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let uri = format!("/api/v1/bookings/reference/{}01", prefix);
        let (status, body) = app.send("GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], first_id);

        let uri = format!("/api/v1/bookings/{}/cancel", first_id);
        let (status, body) = app.send("POST", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Cancelled");

        let (status, _) = app.send("POST", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn public_contact_ticket_notifies_support() {
        let app = app().await;
        let ticket = json!({
            "name": "Guest",
            "email": "guest@example.com",
            "subject": "Availability",
            "message": "Is the lake house free in June?"
        });
        let (status, body) = app
            .send("POST", "/api/v1/tickets/contact", None, Some(ticket))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["data"]["category"], "ContactUs");

        let sent = app.mailer.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "support@propshare.local");
    }

    #[tokio::test]
    async fn metrics_are_404_without_a_recorder() {
        let app = app().await;
        let (status, body) = app.send("GET", "/metrics", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["statusCode"], 404);
    }
}
