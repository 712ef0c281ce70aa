//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    categories, dashboard, equipment, health, maintenance_requests, teams, users, work_centers,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "1.0.0",
        description = "Maintenance management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::list_equipment_requests,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Maintenance requests
        maintenance_requests::list_requests,
        maintenance_requests::get_request,
        maintenance_requests::create_request,
        maintenance_requests::update_request,
        maintenance_requests::change_stage,
        maintenance_requests::delete_request,
        // Teams
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        teams::delete_team,
        // Work centers
        work_centers::list_work_centers,
        work_centers::get_work_center,
        work_centers::create_work_center,
        work_centers::update_work_center,
        work_centers::delete_work_center,
        // Users
        users::list_users,
        // Dashboard
        dashboard::get_stats,
        dashboard::list_tasks,
        dashboard::get_reports,
    ),
    components(
        schemas(
            // Enums
            crate::models::enums::RequestType,
            crate::models::enums::Priority,
            crate::models::enums::Stage,
            crate::models::enums::Frequency,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::EquipmentInput,
            // Categories
            crate::models::category::EquipmentCategory,
            crate::models::category::EquipmentCategoryDetails,
            crate::models::category::EquipmentCategoryInput,
            // Requests
            crate::models::maintenance_request::MaintenanceRequest,
            crate::models::maintenance_request::MaintenanceRequestDetails,
            crate::models::maintenance_request::CreateMaintenanceRequest,
            crate::models::maintenance_request::UpdateMaintenanceRequest,
            crate::models::maintenance_request::StageChange,
            // Teams
            crate::models::team::MaintenanceTeam,
            crate::models::team::MaintenanceTeamSummary,
            crate::models::team::MaintenanceTeamDetails,
            crate::models::team::MaintenanceTeamInput,
            crate::models::team::TeamMember,
            crate::models::team::TeamMemberRef,
            // Work centers
            crate::models::work_center::WorkCenter,
            crate::models::work_center::WorkCenterDetails,
            crate::models::work_center::WorkCenterInput,
            // Users
            crate::models::user::User,
            // Dashboard
            crate::models::dashboard::DashboardStats,
            crate::models::dashboard::ReportRow,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment inventory"),
        (name = "equipment-categories", description = "Equipment categories"),
        (name = "maintenance-requests", description = "Maintenance request lifecycle"),
        (name = "maintenance-teams", description = "Maintenance teams and membership"),
        (name = "work-centers", description = "Work centers"),
        (name = "users", description = "User directory"),
        (name = "dashboard", description = "Dashboard counters and reports")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_lifecycle_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/maintenance-requests/{id}/stage"));
        assert!(doc.paths.paths.contains_key("/dashboard/reports"));
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
