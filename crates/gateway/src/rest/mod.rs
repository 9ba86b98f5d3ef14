//! REST API endpoints for the gateway.

pub mod auth;
pub mod employees;
pub mod health;
