//! Maintenance requests repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{RequestType, Stage},
        maintenance_request::{
            CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
            UpdateMaintenanceRequest,
        },
    },
};

/// Request row joined with the display names of everything it references
pub(crate) const DETAILS_SELECT: &str = r#"
    SELECT
        mr.*,
        e.name AS equipment_name,
        e.serial_number,
        ec.name AS category_name,
        u1.name AS assigned_by_name,
        u2.name AS assigned_to_name,
        u2.email AS assigned_to_email,
        mt.name AS team_name,
        wc.name AS work_center_name
    FROM maintenance_requests mr
    LEFT JOIN equipment e ON mr.equipment_id = e.id
    LEFT JOIN equipment_categories ec ON e.category_id = ec.id
    LEFT JOIN users u1 ON mr.assigned_by = u1.id
    LEFT JOIN users u2 ON mr.assigned_to = u2.id
    LEFT JOIN maintenance_teams mt ON mr.team_id = mt.id
    LEFT JOIN work_centers wc ON mr.work_center_id = wc.id
"#;

/// Typed list filters
#[derive(Debug, Default, Clone)]
pub struct RequestFilters {
    pub stage: Option<Stage>,
    pub team_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub request_type: Option<RequestType>,
}

/// Stage and equipment of a request as stored before a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredState {
    pub stage: Stage,
    pub equipment_id: Option<i32>,
}

/// Values resolved by the lifecycle rules before insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDefaults {
    pub assigned_by: i32,
    pub stage: Stage,
    pub team_id: Option<i32>,
}

#[derive(Clone)]
pub struct MaintenanceRequestsRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List requests matching the filters, newest first
    pub async fn list(&self, filters: &RequestFilters) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if filters.stage.is_some() {
            conditions.push(format!("mr.stage = ${}", idx));
            idx += 1;
        }
        if filters.team_id.is_some() {
            conditions.push(format!("mr.team_id = ${}", idx));
            idx += 1;
        }
        if filters.equipment_id.is_some() {
            conditions.push(format!("mr.equipment_id = ${}", idx));
            idx += 1;
        }
        if filters.request_type.is_some() {
            conditions.push(format!("mr.type = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!("{} {} ORDER BY mr.created_at DESC", DETAILS_SELECT, where_clause);
        let mut builder = sqlx::query_as::<_, MaintenanceRequestDetails>(&select_q);
        if let Some(stage) = filters.stage { builder = builder.bind(stage); }
        if let Some(team_id) = filters.team_id { builder = builder.bind(team_id); }
        if let Some(equipment_id) = filters.equipment_id { builder = builder.bind(equipment_id); }
        if let Some(request_type) = filters.request_type { builder = builder.bind(request_type); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get a request with its display fields
    pub async fn get_details(&self, id: i32) -> AppResult<MaintenanceRequestDetails> {
        let select_q = format!("{} WHERE mr.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, MaintenanceRequestDetails>(&select_q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// Lock a request row and read the fields the lifecycle rules depend on
    pub async fn lock_state(&self, conn: &mut PgConnection, id: i32) -> AppResult<Option<StoredState>> {
        let state = sqlx::query_as::<_, StoredState>(
            "SELECT stage, equipment_id FROM maintenance_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(state)
    }

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &CreateMaintenanceRequest,
        defaults: &ResolvedDefaults,
    ) -> AppResult<MaintenanceRequest> {
        let row = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (
                task_name, type, subject, equipment_id, assigned_by, assigned_to,
                due_date, scheduled_date, priority, stage, team_id, work_center_id,
                maintenance_type, duration, frequency, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW())
            RETURNING *
            "#,
        )
        .bind(&data.task_name)
        .bind(data.request_type)
        .bind(&data.subject)
        .bind(data.equipment_id)
        .bind(defaults.assigned_by)
        .bind(data.assigned_to)
        .bind(data.due_date)
        .bind(data.scheduled_date)
        .bind(data.priority)
        .bind(defaults.stage)
        .bind(defaults.team_id)
        .bind(data.work_center_id)
        .bind(&data.maintenance_type)
        .bind(data.duration)
        .bind(data.frequency)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Overwrite every field of a request; `hours_spent` keeps the stored
    /// value when null
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i32,
        data: &UpdateMaintenanceRequest,
    ) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            UPDATE maintenance_requests SET
                task_name = $1,
                type = $2,
                subject = $3,
                equipment_id = $4,
                assigned_to = $5,
                due_date = $6,
                scheduled_date = $7,
                priority = $8,
                stage = $9,
                team_id = $10,
                work_center_id = $11,
                maintenance_type = $12,
                duration = $13,
                frequency = $14,
                hours_spent = COALESCE($15, hours_spent),
                updated_at = NOW()
            WHERE id = $16
            RETURNING *
            "#,
        )
        .bind(&data.task_name)
        .bind(data.request_type)
        .bind(&data.subject)
        .bind(data.equipment_id)
        .bind(data.assigned_to)
        .bind(data.due_date)
        .bind(data.scheduled_date)
        .bind(data.priority)
        .bind(data.stage)
        .bind(data.team_id)
        .bind(data.work_center_id)
        .bind(&data.maintenance_type)
        .bind(data.duration)
        .bind(data.frequency)
        .bind(data.hours_spent)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// Change only the stage of a request
    pub async fn update_stage(
        &self,
        conn: &mut PgConnection,
        id: i32,
        stage: Stage,
    ) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>(
            "UPDATE maintenance_requests SET stage = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(stage)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// Delete a request. The equipment scrap flag is left as is.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Request {} not found", id)));
        }
        Ok(())
    }
}
