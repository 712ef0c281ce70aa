//! Equipment categories service

use crate::{
    error::AppResult,
    models::category::{EquipmentCategory, EquipmentCategoryDetails, EquipmentCategoryInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentCategoryDetails>> {
        self.repository.categories.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentCategory> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create(
        &self,
        data: &EquipmentCategoryInput,
        tenant_id: i32,
    ) -> AppResult<EquipmentCategory> {
        let company_id = data.company_id.unwrap_or(tenant_id);
        self.repository.categories.create(data, company_id).await
    }

    pub async fn update(
        &self,
        id: i32,
        data: &EquipmentCategoryInput,
        tenant_id: i32,
    ) -> AppResult<EquipmentCategory> {
        let company_id = data.company_id.unwrap_or(tenant_id);
        self.repository.categories.update(id, data, company_id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }
}
