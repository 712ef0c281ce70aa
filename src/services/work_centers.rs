//! Work centers service

use crate::{
    error::AppResult,
    models::work_center::{WorkCenter, WorkCenterDetails, WorkCenterInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct WorkCentersService {
    repository: Repository,
}

impl WorkCentersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<WorkCenterDetails>> {
        self.repository.work_centers.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<WorkCenter> {
        self.repository.work_centers.get_by_id(id).await
    }

    pub async fn create(&self, data: &WorkCenterInput, tenant_id: i32) -> AppResult<WorkCenter> {
        let company_id = data.company_id.unwrap_or(tenant_id);
        self.repository.work_centers.create(data, company_id).await
    }

    pub async fn update(
        &self,
        id: i32,
        data: &WorkCenterInput,
        tenant_id: i32,
    ) -> AppResult<WorkCenter> {
        let company_id = data.company_id.unwrap_or(tenant_id);
        self.repository.work_centers.update(id, data, company_id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.work_centers.delete(id).await
    }
}
