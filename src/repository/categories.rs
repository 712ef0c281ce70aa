//! Equipment categories repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{EquipmentCategory, EquipmentCategoryDetails, EquipmentCategoryInput},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List categories ordered by name
    pub async fn list(&self) -> AppResult<Vec<EquipmentCategoryDetails>> {
        let rows = sqlx::query_as::<_, EquipmentCategoryDetails>(
            r#"
            SELECT ec.*, u.name AS responsible_name, c.name AS company_name
            FROM equipment_categories ec
            LEFT JOIN users u ON ec.responsible_id = u.id
            LEFT JOIN companies c ON ec.company_id = c.id
            ORDER BY ec.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>("SELECT * FROM equipment_categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create(
        &self,
        data: &EquipmentCategoryInput,
        company_id: i32,
    ) -> AppResult<EquipmentCategory> {
        let row = sqlx::query_as::<_, EquipmentCategory>(
            r#"
            INSERT INTO equipment_categories (name, responsible_id, company_id, description, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.responsible_id)
        .bind(company_id)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        data: &EquipmentCategoryInput,
        company_id: i32,
    ) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>(
            r#"
            UPDATE equipment_categories SET
                name = $1,
                responsible_id = $2,
                company_id = $3,
                description = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.responsible_id)
        .bind(company_id)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}
