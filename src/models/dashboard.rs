//! Dashboard and report models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DashboardStats {
    /// Open requests past their due date
    pub overdue_tasks: i64,
    /// Open requests scheduled within the next 7 days
    pub upcoming_tasks: i64,
    /// Requests in stage Repaired
    pub completed_tasks: i64,
    pub total_equipment: i64,
    pub total_teams: i64,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct TaskQuery {
    /// overdue, upcoming or completed; all tasks when absent
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    /// team or category
    pub group_by: Option<String>,
}

/// One report group (a team or an equipment category)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReportRow {
    /// Team or category id; null groups requests without one
    pub group_id: Option<i32>,
    pub group_name: Option<String>,
    pub request_count: i64,
    pub completed_count: i64,
    pub open_count: i64,
    pub scrap_count: i64,
}

impl ReportRow {
    /// Every request of the group is either completed, open or scrapped
    pub fn is_consistent(&self) -> bool {
        self.completed_count + self.open_count + self.scrap_count == self.request_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_row_partition() {
        let row = ReportRow {
            group_id: Some(1),
            group_name: Some("Mechanics".to_string()),
            request_count: 5,
            completed_count: 2,
            open_count: 2,
            scrap_count: 1,
        };
        assert!(row.is_consistent());

        let broken = ReportRow { scrap_count: 0, ..row };
        assert!(!broken.is_consistent());
    }
}
