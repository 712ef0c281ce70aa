//! Equipment repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentDetails, EquipmentInput, EquipmentQuery},
};

const DETAILS_SELECT: &str = r#"
    SELECT
        e.*,
        ec.name AS category_name,
        mt.name AS team_name,
        u.name AS employee_name,
        d.name AS department_name
    FROM equipment e
    LEFT JOIN equipment_categories ec ON e.category_id = ec.id
    LEFT JOIN maintenance_teams mt ON e.maintenance_team_id = mt.id
    LEFT JOIN users u ON e.employee_id = u.id
    LEFT JOIN departments d ON e.department_id = d.id
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with optional filters, newest first
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.department.is_some() {
            conditions.push(format!("e.department_id = ${}", idx));
            idx += 1;
        }
        if query.employee.is_some() {
            conditions.push(format!("e.employee_id = ${}", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("e.category_id = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!("{} {} ORDER BY e.created_at DESC", DETAILS_SELECT, where_clause);
        let mut builder = sqlx::query_as::<_, EquipmentDetails>(&select_q);
        if let Some(department) = query.department { builder = builder.bind(department); }
        if let Some(employee) = query.employee { builder = builder.bind(employee); }
        if let Some(category) = query.category { builder = builder.bind(category); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get equipment by ID with display names and its open request count
    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        let select_q = format!("{} WHERE e.id = $1", DETAILS_SELECT);
        let mut details = sqlx::query_as::<_, EquipmentDetails>(&select_q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        let open: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE equipment_id = $1 AND stage NOT IN ('Repaired', 'Scrap')
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        details.open_requests_count = Some(open);
        Ok(details)
    }

    /// Create equipment
    pub async fn create(&self, data: &EquipmentInput, company_id: i32) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, serial_number, category_id, department_id, employee_id,
                maintenance_team_id, location, purchase_date, warranty_date,
                type_model, setup_date, description, company_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW())
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(data.category_id)
        .bind(data.department_id)
        .bind(data.employee_id)
        .bind(data.maintenance_team_id)
        .bind(&data.location)
        .bind(data.purchase_date)
        .bind(data.warranty_date)
        .bind(&data.type_model)
        .bind(data.setup_date)
        .bind(&data.description)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite the editable fields of an equipment
    pub async fn update(&self, id: i32, data: &EquipmentInput) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment SET
                name = $1,
                serial_number = $2,
                category_id = $3,
                department_id = $4,
                employee_id = $5,
                maintenance_team_id = $6,
                location = $7,
                purchase_date = $8,
                warranty_date = $9,
                type_model = $10,
                setup_date = $11,
                description = $12,
                updated_at = NOW()
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(data.category_id)
        .bind(data.department_id)
        .bind(data.employee_id)
        .bind(data.maintenance_team_id)
        .bind(&data.location)
        .bind(data.purchase_date)
        .bind(data.warranty_date)
        .bind(&data.type_model)
        .bind(data.setup_date)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment. Its requests keep existing with no equipment.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Maintenance team of an equipment, `None` when the equipment does not exist
    pub async fn maintenance_team_id(
        &self,
        conn: &mut PgConnection,
        id: i32,
    ) -> AppResult<Option<Option<i32>>> {
        let team = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT maintenance_team_id FROM equipment WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(team)
    }

    /// Set or clear the scrapped flag. `scrapped_at` follows the flag.
    pub async fn set_scrapped(
        &self,
        conn: &mut PgConnection,
        id: i32,
        scrapped: bool,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE equipment SET
                is_scrapped = $1,
                scrapped_at = CASE WHEN $1 THEN NOW() ELSE NULL END
            WHERE id = $2
            "#,
        )
        .bind(scrapped)
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
