//! # StaffDesk Gateway Crate
//!
//! HTTP layer for the StaffDesk backend: the axum router, REST handlers,
//! bearer-token middleware, CORS, and the HTTP error mapping over the domain
//! services.
//!
//! ## Architecture
//!
//! - **REST**: JSON endpoints with OpenAPI documentation
//! - **State**: shared services handed to every handler
//! - **Middleware**: authentication, CORS, request logging

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{GatewayError, GatewayResult};
pub use middleware::auth_middleware;
pub use state::GatewayState;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Create the main application router.
///
/// Public routes: login, registration, the email probes, and health.
/// Everything under the directory plus password/identity management sits
/// behind the bearer-token middleware.
pub fn create_router(state: GatewayState) -> anyhow::Result<Router> {
    let cors = middleware::create_cors_layer(&state.allowed_origin)?;
    let arc_state = Arc::new(state);

    let public = Router::new()
        .route("/login", post(rest::auth::login))
        .route("/register", post(rest::auth::register))
        .route("/check-email", post(rest::auth::check_email))
        .route("/check-email-exists", post(rest::auth::check_email_exists))
        .route("/health", get(rest::health::health_check));

    let protected = Router::new()
        .route("/get-user-email", get(rest::auth::get_user_email))
        .route("/change-password", put(rest::auth::change_password))
        .route(
            "/users",
            get(rest::employees::list_users).post(rest::employees::create_user),
        )
        .route(
            "/users/:id",
            put(rest::employees::update_user).delete(rest::employees::delete_user),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            arc_state.clone(),
            middleware::auth_middleware,
        ));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .merge(public)
        .merge(protected)
        .with_state(arc_state)
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // Swagger UI only in debug builds.
    #[cfg(debug_assertions)]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::auth::login,
                rest::auth::register,
                rest::auth::check_email,
                rest::auth::check_email_exists,
                rest::auth::change_password,
                rest::auth::get_user_email,
                rest::employees::list_users,
                rest::employees::create_user,
                rest::employees::update_user,
                rest::employees::delete_user,
                rest::health::health_check,
            ),
            components(
                schemas(
                    rest::auth::LoginRequest,
                    rest::auth::RegisterRequest,
                    rest::auth::EmailCheckRequest,
                    rest::auth::ChangePasswordRequest,
                    rest::auth::AdminLoginResponse,
                    rest::auth::EmployeeLoginResponse,
                    rest::auth::EmployeeProfile,
                    rest::auth::MessageResponse,
                    rest::auth::ExistsResponse,
                    rest::auth::EmailResponse,
                    rest::auth::ErrorResponse,
                    rest::employees::ListUsersResponse,
                    rest::employees::CreateUserResponse,
                    rest::health::HealthResponse,
                    staffdesk_database::Employee,
                    staffdesk_database::EmployeePayload,
                )
            ),
            tags(
                (name = "Auth", description = "Authentication and account management"),
                (name = "Users", description = "Employee directory"),
                (name = "Health", description = "Service health"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    Ok(router)
}
