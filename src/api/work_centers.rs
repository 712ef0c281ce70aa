//! Work center API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::work_center::{WorkCenter, WorkCenterDetails, WorkCenterInput},
};

use super::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/work-centers",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Work centers ordered by name", body = Vec<WorkCenterDetails>)
    )
)]
pub async fn list_work_centers(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<WorkCenterDetails>>> {
    let centers = state.services.work_centers.list().await?;
    Ok(Json(centers))
}

#[utoipa::path(
    get,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Work center ID")),
    responses(
        (status = 200, description = "Work center", body = WorkCenter),
        (status = 404, description = "Work center not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_work_center(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<WorkCenter>> {
    let center = state.services.work_centers.get_by_id(id).await?;
    Ok(Json(center))
}

/// Create a work center; missing rates take their defaults
#[utoipa::path(
    post,
    path = "/work-centers",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    request_body = WorkCenterInput,
    responses(
        (status = 201, description = "Work center created", body = WorkCenter)
    )
)]
pub async fn create_work_center(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Json(data): Json<WorkCenterInput>,
) -> AppResult<(StatusCode, Json<WorkCenter>)> {
    data.validate()?;
    let center = state.services.work_centers.create(&data, user.company_id).await?;
    Ok((StatusCode::CREATED, Json(center)))
}

#[utoipa::path(
    put,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Work center ID")),
    request_body = WorkCenterInput,
    responses(
        (status = 200, description = "Work center updated", body = WorkCenter),
        (status = 404, description = "Work center not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_work_center(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<WorkCenterInput>,
) -> AppResult<Json<WorkCenter>> {
    data.validate()?;
    let center = state
        .services
        .work_centers
        .update(id, &data, user.company_id)
        .await?;
    Ok(Json(center))
}

#[utoipa::path(
    delete,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Work center ID")),
    responses(
        (status = 204, description = "Work center deleted"),
        (status = 404, description = "Work center not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_work_center(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.work_centers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
