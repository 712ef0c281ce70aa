//! Dashboard API endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        dashboard::{DashboardStats, ReportQuery, ReportRow, TaskQuery},
        maintenance_request::MaintenanceRequestDetails,
    },
};

use super::AuthenticatedUser;

/// Dashboard counters
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Task and inventory counters", body = DashboardStats)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.dashboard.stats().await?;
    Ok(Json(stats))
}

/// Latest tasks, optionally filtered by status
#[utoipa::path(
    get,
    path = "/dashboard/tasks",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    params(TaskQuery),
    responses(
        (status = 200, description = "Up to 50 tasks, newest first", body = Vec<MaintenanceRequestDetails>),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_tasks(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<Vec<MaintenanceRequestDetails>>> {
    let tasks = state.services.dashboard.tasks(&query).await?;
    Ok(Json(tasks))
}

/// Request counts grouped by team or category
#[utoipa::path(
    get,
    path = "/dashboard/reports",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    params(ReportQuery),
    responses(
        (status = 200, description = "One row per group, largest first", body = Vec<ReportRow>),
        (status = 400, description = "Missing or unknown group_by", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reports(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<ReportRow>>> {
    let rows = state.services.dashboard.report(&query).await?;
    Ok(Json(rows))
}
