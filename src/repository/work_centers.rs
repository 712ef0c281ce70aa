//! Work centers repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::work_center::{WorkCenter, WorkCenterDetails, WorkCenterInput},
};

#[derive(Clone)]
pub struct WorkCentersRepository {
    pool: Pool<Postgres>,
}

impl WorkCentersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List work centers ordered by name
    pub async fn list(&self) -> AppResult<Vec<WorkCenterDetails>> {
        let rows = sqlx::query_as::<_, WorkCenterDetails>(
            r#"
            SELECT wc.*, c.name AS company_name
            FROM work_centers wc
            LEFT JOIN companies c ON wc.company_id = c.id
            ORDER BY wc.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<WorkCenter> {
        sqlx::query_as::<_, WorkCenter>("SELECT * FROM work_centers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work center {} not found", id)))
    }

    pub async fn create(&self, data: &WorkCenterInput, company_id: i32) -> AppResult<WorkCenter> {
        let rates = data.rates();
        let row = sqlx::query_as::<_, WorkCenter>(
            r#"
            INSERT INTO work_centers (
                name, code, company_id, cost, cost_per_hour,
                capacity, daily_target, work_rate, hourly_rate, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(company_id)
        .bind(rates.cost)
        .bind(rates.cost_per_hour)
        .bind(rates.capacity)
        .bind(rates.daily_target)
        .bind(rates.work_rate)
        .bind(rates.hourly_rate)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        data: &WorkCenterInput,
        company_id: i32,
    ) -> AppResult<WorkCenter> {
        let rates = data.rates();
        sqlx::query_as::<_, WorkCenter>(
            r#"
            UPDATE work_centers SET
                name = $1,
                code = $2,
                company_id = $3,
                cost = $4,
                cost_per_hour = $5,
                capacity = $6,
                daily_target = $7,
                work_rate = $8,
                hourly_rate = $9,
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(company_id)
        .bind(rates.cost)
        .bind(rates.cost_per_hour)
        .bind(rates.capacity)
        .bind(rates.daily_target)
        .bind(rates.work_rate)
        .bind(rates.hourly_rate)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Work center {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM work_centers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Work center {} not found", id)));
        }
        Ok(())
    }
}
