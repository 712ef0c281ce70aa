//! Equipment service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{
        equipment::{Equipment, EquipmentDetails, EquipmentInput, EquipmentQuery},
        maintenance_request::MaintenanceRequestDetails,
    },
    repository::{maintenance_requests::RequestFilters, Repository},
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentDetails> {
        self.repository.equipment.get_details(id).await
    }

    /// Create equipment; `company_id` falls back to the caller's tenant
    pub async fn create(&self, data: &EquipmentInput, tenant_id: i32) -> AppResult<Equipment> {
        let company_id = data.company_id.unwrap_or(tenant_id);
        self.repository.equipment.create(data, company_id).await
    }

    pub async fn update(&self, id: i32, data: &EquipmentInput) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await?;
        tracing::info!("Deleted equipment {}", id);
        Ok(())
    }

    /// Requests raised against an equipment, newest first
    pub async fn maintenance_requests(&self, id: i32) -> AppResult<Vec<MaintenanceRequestDetails>> {
        // 404 for unknown equipment rather than an empty list
        self.repository.equipment.get_details(id).await?;

        let filters = RequestFilters {
            equipment_id: Some(id),
            ..Default::default()
        };
        let now = Utc::now();
        let rows = self.repository.maintenance_requests.list(&filters).await?;
        Ok(rows.into_iter().map(|r| r.annotate(now)).collect())
    }
}
