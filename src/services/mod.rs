//! Business logic services

pub mod categories;
pub mod dashboard;
pub mod equipment;
pub mod maintenance_requests;
pub mod teams;
pub mod users;
pub mod work_centers;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub equipment: equipment::EquipmentService,
    pub categories: categories::CategoriesService,
    pub teams: teams::TeamsService,
    pub work_centers: work_centers::WorkCentersService,
    pub maintenance_requests: maintenance_requests::MaintenanceRequestsService,
    pub dashboard: dashboard::DashboardService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            teams: teams::TeamsService::new(repository.clone()),
            work_centers: work_centers::WorkCentersService::new(repository.clone()),
            maintenance_requests: maintenance_requests::MaintenanceRequestsService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            repository,
        }
    }

    /// Readiness probe against the store
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
