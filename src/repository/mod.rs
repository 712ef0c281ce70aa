//! Repository layer for database operations

pub mod categories;
pub mod dashboard;
pub mod equipment;
pub mod maintenance_requests;
pub mod teams;
pub mod users;
pub mod work_centers;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub categories: categories::CategoriesRepository,
    pub teams: teams::TeamsRepository,
    pub work_centers: work_centers::WorkCentersRepository,
    pub maintenance_requests: maintenance_requests::MaintenanceRequestsRepository,
    pub dashboard: dashboard::DashboardRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            teams: teams::TeamsRepository::new(pool.clone()),
            work_centers: work_centers::WorkCentersRepository::new(pool.clone()),
            maintenance_requests: maintenance_requests::MaintenanceRequestsRepository::new(pool.clone()),
            dashboard: dashboard::DashboardRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
