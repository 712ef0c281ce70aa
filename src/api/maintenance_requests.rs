//! Maintenance request API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::maintenance_request::{
        CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
        MaintenanceRequestQuery, StageChange, UpdateMaintenanceRequest,
    },
};

use super::AuthenticatedUser;

/// List maintenance requests
#[utoipa::path(
    get,
    path = "/maintenance-requests",
    tag = "maintenance-requests",
    security(("bearer_auth" = [])),
    params(MaintenanceRequestQuery),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<MaintenanceRequestDetails>),
        (status = 400, description = "Unknown stage or type", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<MaintenanceRequestQuery>,
) -> AppResult<Json<Vec<MaintenanceRequestDetails>>> {
    let requests = state.services.maintenance_requests.list(&query).await?;
    Ok(Json(requests))
}

/// Get a maintenance request by ID
#[utoipa::path(
    get,
    path = "/maintenance-requests/{id}",
    tag = "maintenance-requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = MaintenanceRequestDetails),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequestDetails>> {
    let request = state.services.maintenance_requests.get_by_id(id).await?;
    Ok(Json(request))
}

/// Create a maintenance request
///
/// `assigned_by` defaults to the caller and `team_id` to the equipment's
/// maintenance team.
#[utoipa::path(
    post,
    path = "/maintenance-requests",
    tag = "maintenance-requests",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "Request created", body = MaintenanceRequest)
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Json(data): Json<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    data.validate()?;
    let request = state
        .services
        .maintenance_requests
        .create(&data, user.user_id())
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Update a maintenance request
#[utoipa::path(
    put,
    path = "/maintenance-requests/{id}",
    tag = "maintenance-requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateMaintenanceRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenanceRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    data.validate()?;
    let request = state.services.maintenance_requests.update(id, &data).await?;
    Ok(Json(request))
}

/// Move a request to another stage
#[utoipa::path(
    patch,
    path = "/maintenance-requests/{id}/stage",
    tag = "maintenance-requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = StageChange,
    responses(
        (status = 200, description = "Stage changed", body = MaintenanceRequest),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn change_stage(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<StageChange>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state
        .services
        .maintenance_requests
        .change_stage(id, data.stage)
        .await?;
    Ok(Json(request))
}

#[utoipa::path(
    delete,
    path = "/maintenance-requests/{id}",
    tag = "maintenance-requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Request deleted"),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_request(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.maintenance_requests.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
