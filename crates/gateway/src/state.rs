//! Shared application state for the gateway.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use staffdesk_config::AppConfig;
use staffdesk_directory::{AuthService, EmployeeService, TokenManager};

/// Shared state handed to every handler: the pool plus the services built on
/// it. The token manager and signing secret are read-only after startup.
#[derive(Clone)]
pub struct GatewayState {
    pub pool: PgPool,
    pub allowed_origin: String,
    tokens: Arc<TokenManager>,
    auth_service: Arc<AuthService>,
    employee_service: Arc<EmployeeService>,
}

impl GatewayState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        let tokens = Arc::new(
            TokenManager::new(&config.auth.secret)
                .with_duration(Duration::from_secs(config.auth.token_ttl_seconds)),
        );
        let auth_service = Arc::new(AuthService::new(
            pool.clone(),
            tokens.clone(),
            config.auth.admin_email.clone(),
        ));
        let employee_service = Arc::new(EmployeeService::new(pool.clone()));

        Self {
            pool,
            allowed_origin: config.cors.allowed_origin.clone(),
            tokens,
            auth_service,
            employee_service,
        }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }

    pub fn employee_service(&self) -> &EmployeeService {
        &self.employee_service
    }
}
