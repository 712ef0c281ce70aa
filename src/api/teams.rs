//! Maintenance team API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::team::{
        MaintenanceTeam, MaintenanceTeamDetails, MaintenanceTeamInput, MaintenanceTeamSummary,
    },
};

use super::AuthenticatedUser;

/// List teams with their members and open request counts
#[utoipa::path(
    get,
    path = "/maintenance-teams",
    tag = "maintenance-teams",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Team list", body = Vec<MaintenanceTeamSummary>)
    )
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceTeamSummary>>> {
    let teams = state.services.teams.list().await?;
    Ok(Json(teams))
}

/// Get a team with its members
#[utoipa::path(
    get,
    path = "/maintenance-teams/{id}",
    tag = "maintenance-teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team with members", body = MaintenanceTeamDetails),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_team(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceTeamDetails>> {
    let team = state.services.teams.get_by_id(id).await?;
    Ok(Json(team))
}

/// Create a team and its memberships
#[utoipa::path(
    post,
    path = "/maintenance-teams",
    tag = "maintenance-teams",
    security(("bearer_auth" = [])),
    request_body = MaintenanceTeamInput,
    responses(
        (status = 201, description = "Team created", body = MaintenanceTeam)
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Json(data): Json<MaintenanceTeamInput>,
) -> AppResult<(StatusCode, Json<MaintenanceTeam>)> {
    data.validate()?;
    let team = state.services.teams.create(&data, user.company_id).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Update a team, replacing its membership with `member_ids`
#[utoipa::path(
    put,
    path = "/maintenance-teams/{id}",
    tag = "maintenance-teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    request_body = MaintenanceTeamInput,
    responses(
        (status = 200, description = "Team updated", body = MaintenanceTeam),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<MaintenanceTeamInput>,
) -> AppResult<Json<MaintenanceTeam>> {
    data.validate()?;
    let team = state.services.teams.update(id, &data, user.company_id).await?;
    Ok(Json(team))
}

#[utoipa::path(
    delete,
    path = "/maintenance-teams/{id}",
    tag = "maintenance-teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_team(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.teams.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
