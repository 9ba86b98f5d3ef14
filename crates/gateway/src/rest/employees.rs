//! Employee directory REST endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use staffdesk_database::{Employee, EmployeePayload, UserFilters};

use crate::error::GatewayResult;
use crate::rest::auth::{ErrorResponse, MessageResponse};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<Employee>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub id: i64,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number, default 1"),
        ("limit" = Option<i64>, Query, description = "Page size, default 10"),
        ("first_name" = Option<String>, Query, description = "Substring match"),
        ("last_name" = Option<String>, Query, description = "Substring match"),
        ("email" = Option<String>, Query, description = "Substring match"),
        ("phone" = Option<String>, Query, description = "Substring match"),
        ("gender" = Option<String>, Query, description = "Repeated gender[] keys or comma-separated values"),
        ("location" = Option<String>, Query, description = "Repeated location[] keys or comma-separated values"),
        ("department" = Option<String>, Query, description = "Repeated department[] keys or comma-separated values"),
        ("role" = Option<String>, Query, description = "Repeated role[] keys or comma-separated values"),
        ("salary_from" = Option<i64>, Query, description = "Inclusive lower bound"),
        ("salary_to" = Option<i64>, Query, description = "Inclusive upper bound"),
        ("join_date_from" = Option<String>, Query, description = "Inclusive lower bound, YYYY-MM-DD"),
        ("join_date_to" = Option<String>, Query, description = "Inclusive upper bound, YYYY-MM-DD"),
        ("years_of_experience_from" = Option<i64>, Query, description = "Inclusive lower bound"),
        ("years_of_experience_to" = Option<i64>, Query, description = "Inclusive upper bound")
    ),
    responses(
        (status = 200, description = "One page of matching employees", body = ListUsersResponse),
        (status = 400, description = "Unparseable filter value", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> GatewayResult<Json<ListUsersResponse>> {
    let (filters, page) = UserFilters::from_query_pairs(&params)?;

    let (users, total) = state.employee_service().list(&filters, page).await?;

    Ok(Json(ListUsersResponse {
        users,
        total,
        page: page.page,
        limit: page.limit,
    }))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = CreateUserResponse),
        (status = 400, description = "Malformed input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Duplicate email or phone, or store failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<EmployeePayload>,
) -> GatewayResult<(StatusCode, Json<CreateUserResponse>)> {
    let id = state.employee_service().create(payload).await?;

    Ok((StatusCode::CREATED, Json(CreateUserResponse { id })))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee updated", body = MessageResponse),
        (status = 400, description = "Malformed input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No such employee", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> GatewayResult<Json<MessageResponse>> {
    state.employee_service().update(id, payload).await?;

    Ok(Json(MessageResponse {
        message: "User updated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No such employee", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<MessageResponse>> {
    state.employee_service().delete(id).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
