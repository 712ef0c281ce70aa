//! Dashboard counters, task lists and grouped reports

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        dashboard::{DashboardStats, ReportRow},
        enums::{ReportGroupBy, TaskStatusFilter},
        maintenance_request::MaintenanceRequestDetails,
    },
};

use super::maintenance_requests::DETAILS_SELECT;

/// Dashboard task lists never return more rows than this
pub const TASK_LIST_LIMIT: i64 = 50;

const OPEN_STAGE: &str = "stage NOT IN ('Repaired', 'Scrap')";

/// Overdue once `$1` (now) has passed the UTC midnight that starts the due date
fn past_due(column: &str) -> String {
    format!("({}::timestamp AT TIME ZONE 'UTC') < $1", column)
}

/// Reference instants for the time-based counters
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub now: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
}

impl Clock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            week_end: now + chrono::Duration::days(7),
        }
    }
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: Pool<Postgres>,
}

impl DashboardRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn stats(&self, clock: &Clock) -> AppResult<DashboardStats> {
        let query = format!(
            r#"
            SELECT
                (SELECT COUNT(*) FROM maintenance_requests
                 WHERE {past_due} AND {open}) AS overdue_tasks,
                (SELECT COUNT(*) FROM maintenance_requests
                 WHERE scheduled_date BETWEEN $1 AND $2 AND {open}) AS upcoming_tasks,
                (SELECT COUNT(*) FROM maintenance_requests
                 WHERE stage = 'Repaired') AS completed_tasks,
                (SELECT COUNT(*) FROM equipment) AS total_equipment,
                (SELECT COUNT(*) FROM maintenance_teams) AS total_teams
            "#,
            past_due = past_due("due_date"),
            open = OPEN_STAGE
        );

        let stats = sqlx::query_as::<_, DashboardStats>(&query)
            .bind(clock.now)
            .bind(clock.week_end)
            .fetch_one(&self.pool)
            .await?;
        Ok(stats)
    }

    /// Newest requests matching the status filter, capped at `TASK_LIST_LIMIT`
    pub async fn tasks(
        &self,
        filter: Option<TaskStatusFilter>,
        clock: &Clock,
    ) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let where_clause = match filter {
            None => String::new(),
            Some(TaskStatusFilter::Overdue) => {
                format!("WHERE {} AND mr.{}", past_due("mr.due_date"), OPEN_STAGE)
            }
            Some(TaskStatusFilter::Upcoming) => {
                format!("WHERE mr.scheduled_date BETWEEN $1 AND $2 AND mr.{}", OPEN_STAGE)
            }
            Some(TaskStatusFilter::Completed) => "WHERE mr.stage = 'Repaired'".to_string(),
        };

        let select_q = format!(
            "{} {} ORDER BY mr.created_at DESC LIMIT {}",
            DETAILS_SELECT, where_clause, TASK_LIST_LIMIT
        );
        let mut builder = sqlx::query_as::<_, MaintenanceRequestDetails>(&select_q);
        match filter {
            Some(TaskStatusFilter::Overdue) => builder = builder.bind(clock.now),
            Some(TaskStatusFilter::Upcoming) => builder = builder.bind(clock.now).bind(clock.week_end),
            _ => {}
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Request counts per team or per equipment category, largest groups first.
    /// Groups without requests are listed with zero counts and requests without
    /// a group land in a row with a null name.
    pub async fn report(&self, group_by: ReportGroupBy) -> AppResult<Vec<ReportRow>> {
        let source = match group_by {
            ReportGroupBy::Team => {
                r#"
                FROM maintenance_teams g
                FULL OUTER JOIN (
                    SELECT id, stage, team_id AS group_ref FROM maintenance_requests
                ) r ON r.group_ref = g.id
                "#
            }
            ReportGroupBy::Category => {
                r#"
                FROM equipment_categories g
                FULL OUTER JOIN (
                    SELECT mr.id, mr.stage, e.category_id AS group_ref
                    FROM maintenance_requests mr
                    LEFT JOIN equipment e ON mr.equipment_id = e.id
                ) r ON r.group_ref = g.id
                "#
            }
        };

        let query = format!(
            r#"
            SELECT
                g.id AS group_id,
                g.name AS group_name,
                COUNT(r.id) AS request_count,
                COUNT(r.id) FILTER (WHERE r.stage = 'Repaired') AS completed_count,
                COUNT(r.id) FILTER (WHERE r.{open}) AS open_count,
                COUNT(r.id) FILTER (WHERE r.stage = 'Scrap') AS scrap_count
            {source}
            GROUP BY g.id, g.name
            ORDER BY request_count DESC, g.name
            "#,
            open = OPEN_STAGE,
            source = source
        );

        let rows = sqlx::query_as::<_, ReportRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clock_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 23, 30, 0).unwrap();
        let clock = Clock::at(now);
        assert_eq!(clock.now, now);
        assert_eq!(clock.week_end - clock.now, chrono::Duration::days(7));
    }

    #[test]
    fn test_past_due_compares_day_start_with_now() {
        assert_eq!(
            past_due("mr.due_date"),
            "(mr.due_date::timestamp AT TIME ZONE 'UTC') < $1"
        );
    }
}
