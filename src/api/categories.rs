//! Equipment category API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::category::{EquipmentCategory, EquipmentCategoryDetails, EquipmentCategoryInput},
};

use super::AuthenticatedUser;

/// List categories ordered by name
#[utoipa::path(
    get,
    path = "/equipment-categories",
    tag = "equipment-categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category list", body = Vec<EquipmentCategoryDetails>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<EquipmentCategoryDetails>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/equipment-categories/{id}",
    tag = "equipment-categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = EquipmentCategory),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentCategory>> {
    let category = state.services.categories.get_by_id(id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    post,
    path = "/equipment-categories",
    tag = "equipment-categories",
    security(("bearer_auth" = [])),
    request_body = EquipmentCategoryInput,
    responses(
        (status = 201, description = "Category created", body = EquipmentCategory)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Json(data): Json<EquipmentCategoryInput>,
) -> AppResult<(StatusCode, Json<EquipmentCategory>)> {
    data.validate()?;
    let category = state.services.categories.create(&data, user.company_id).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/equipment-categories/{id}",
    tag = "equipment-categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = EquipmentCategoryInput,
    responses(
        (status = 200, description = "Category updated", body = EquipmentCategory),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<EquipmentCategoryInput>,
) -> AppResult<Json<EquipmentCategory>> {
    data.validate()?;
    let category = state.services.categories.update(id, &data, user.company_id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/equipment-categories/{id}",
    tag = "equipment-categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
