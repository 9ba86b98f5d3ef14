//! Authentication REST endpoints.

use axum::{extract::State, Extension, Json};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use staffdesk_directory::{Employee, LoginOutcome};

use crate::error::GatewayResult;
use crate::middleware::AuthenticatedEmail;
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailCheckRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeLoginResponse {
    pub token: String,
    pub user_data: EmployeeProfile,
    pub email: String,
}

/// Profile payload returned at login: the directory row without its surrogate
/// key and timestamps.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub role: String,
    pub salary: i64,
    pub join_date: NaiveDate,
    pub years_of_experience: i32,
}

impl From<Employee> for EmployeeProfile {
    fn from(employee: Employee) -> Self {
        Self {
            first_name: employee.first_name,
            last_name: employee.last_name,
            gender: employee.gender,
            location: employee.location,
            email: employee.email,
            phone: employee.phone,
            department: employee.department,
            role: employee.role,
            salary: employee.salary,
            join_date: employee.join_date,
            years_of_experience: employee.years_of_experience,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmailResponse {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued; non-admin logins also carry the profile payload"),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<LoginRequest>,
) -> GatewayResult<Response> {
    let outcome = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(match outcome {
        LoginOutcome::Admin { token } => Json(AdminLoginResponse { token }).into_response(),
        LoginOutcome::Employee { token, profile } => Json(EmployeeLoginResponse {
            token,
            email: profile.email.clone(),
            user_data: profile.into(),
        })
        .into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Credential registered", body = MessageResponse),
        (status = 400, description = "Malformed input or policy violation", body = ErrorResponse),
        (status = 403, description = "Reserved administrative email", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<RegisterRequest>,
) -> GatewayResult<Json<MessageResponse>> {
    state
        .auth_service()
        .register(&payload.email, &payload.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/check-email",
    tag = "Auth",
    request_body = EmailCheckRequest,
    responses(
        (status = 200, description = "Whether a credential exists for the email", body = ExistsResponse)
    )
)]
pub async fn check_email(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<EmailCheckRequest>,
) -> GatewayResult<Json<ExistsResponse>> {
    let exists = state.auth_service().check_email(&payload.email).await?;

    Ok(Json(ExistsResponse { exists }))
}

#[utoipa::path(
    post,
    path = "/check-email-exists",
    tag = "Auth",
    request_body = EmailCheckRequest,
    responses(
        (status = 200, description = "Whether a directory profile exists for the email", body = ExistsResponse)
    )
)]
pub async fn check_email_exists(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<EmailCheckRequest>,
) -> GatewayResult<Json<ExistsResponse>> {
    let exists = state
        .auth_service()
        .check_profile_email(&payload.email)
        .await?;

    Ok(Json(ExistsResponse { exists }))
}

#[utoipa::path(
    put,
    path = "/change-password",
    tag = "Auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Old password mismatch or policy violation", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn change_password(
    State(state): State<Arc<GatewayState>>,
    Extension(AuthenticatedEmail(email)): Extension<AuthenticatedEmail>,
    Json(payload): Json<ChangePasswordRequest>,
) -> GatewayResult<Json<MessageResponse>> {
    state
        .auth_service()
        .change_password(&email, &payload.old_password, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/get-user-email",
    tag = "Auth",
    responses(
        (status = 200, description = "Email of the authenticated identity", body = EmailResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_user_email(
    Extension(AuthenticatedEmail(email)): Extension<AuthenticatedEmail>,
) -> Json<EmailResponse> {
    Json(EmailResponse { email })
}
