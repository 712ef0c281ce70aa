//! Maintenance request model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{Frequency, Priority, RequestType, Stage};

/// Maintenance request record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    pub task_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub request_type: RequestType,
    pub subject: Option<String>,
    pub equipment_id: Option<i32>,
    /// User who raised the request
    pub assigned_by: Option<i32>,
    /// Technician in charge
    pub assigned_to: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub stage: Stage,
    pub team_id: Option<i32>,
    pub work_center_id: Option<i32>,
    pub maintenance_type: Option<String>,
    /// Planned duration in hours
    pub duration: Option<Decimal>,
    pub frequency: Option<Frequency>,
    pub hours_spent: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MaintenanceRequest {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        is_overdue(self.due_date, self.stage, now)
    }
}

/// A request is overdue once `now` has passed the start (UTC midnight) of
/// its due date and it is still open. Never stored.
pub fn is_overdue(due_date: Option<NaiveDate>, stage: Stage, now: DateTime<Utc>) -> bool {
    let past_due = due_date
        .and_then(|due| due.and_hms_opt(0, 0, 0))
        .map_or(false, |start| start.and_utc() < now);
    past_due && stage.is_open()
}

/// Request with join-derived display fields and the overdue flag
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceRequestDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub request: MaintenanceRequest,
    pub equipment_name: Option<String>,
    pub serial_number: Option<String>,
    pub category_name: Option<String>,
    pub assigned_by_name: Option<String>,
    pub assigned_to_name: Option<String>,
    pub assigned_to_email: Option<String>,
    pub team_name: Option<String>,
    pub work_center_name: Option<String>,
    #[sqlx(skip)]
    pub is_overdue: bool,
}

impl MaintenanceRequestDetails {
    /// Fill in `is_overdue` against `now`
    pub fn annotate(mut self, now: DateTime<Utc>) -> Self {
        self.is_overdue = self.request.is_overdue(now);
        self
    }
}

/// Create maintenance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenanceRequest {
    #[validate(length(min = 1, message = "Task name is required"))]
    pub task_name: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub subject: Option<String>,
    /// When set, the equipment's maintenance team is used unless `team_id` is given
    pub equipment_id: Option<i32>,
    /// Defaults to the caller
    pub assigned_by: Option<i32>,
    pub assigned_to: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    /// Defaults to `New`
    pub stage: Option<Stage>,
    pub team_id: Option<i32>,
    pub work_center_id: Option<i32>,
    pub maintenance_type: Option<String>,
    pub duration: Option<Decimal>,
    pub frequency: Option<Frequency>,
}

/// Full update of a maintenance request. Every field overwrites the stored
/// value, null included, except `hours_spent` which keeps the stored value
/// when null.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenanceRequest {
    #[validate(length(min = 1, message = "Task name is required"))]
    pub task_name: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub subject: Option<String>,
    pub equipment_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub stage: Stage,
    pub team_id: Option<i32>,
    pub work_center_id: Option<i32>,
    pub maintenance_type: Option<String>,
    pub duration: Option<Decimal>,
    pub frequency: Option<Frequency>,
    pub hours_spent: Option<Decimal>,
}

/// Stage-only move (kanban drag and drop)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StageChange {
    pub stage: Stage,
}

/// Maintenance request list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct MaintenanceRequestQuery {
    /// New, In Progress, Repaired or Scrap
    pub stage: Option<String>,
    pub team_id: Option<i32>,
    pub equipment_id: Option<i32>,
    /// Corrective or Preventive
    #[serde(rename = "type")]
    pub request_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_overdue_requires_past_due_date() {
        let now = at("2024-06-10T10:00:00Z");
        assert!(is_overdue(Some(date("2024-06-09")), Stage::New, now));
        assert!(!is_overdue(Some(date("2024-06-11")), Stage::InProgress, now));
        assert!(!is_overdue(None, Stage::New, now));
    }

    #[test]
    fn test_due_today_is_overdue_once_the_day_started() {
        let due = Some(date("2024-06-10"));
        assert!(is_overdue(due, Stage::New, at("2024-06-10T10:00:00Z")));
        assert!(is_overdue(due, Stage::InProgress, at("2024-06-10T00:00:01Z")));
        assert!(!is_overdue(due, Stage::New, at("2024-06-10T00:00:00Z")));
        assert!(!is_overdue(due, Stage::New, at("2024-06-09T23:59:59Z")));
    }

    #[test]
    fn test_overdue_excludes_closed_stages() {
        let now = at("2024-06-10T10:00:00Z");
        let past = Some(date("2024-01-01"));
        assert!(is_overdue(past, Stage::InProgress, now));
        assert!(!is_overdue(past, Stage::Repaired, now));
        assert!(!is_overdue(past, Stage::Scrap, now));
        assert!(!is_overdue(Some(date("2024-06-10")), Stage::Repaired, now));
    }

    #[test]
    fn test_create_payload() {
        let payload: CreateMaintenanceRequest = serde_json::from_str(
            r#"{"task_name": "Leak", "type": "Corrective", "equipment_id": 4, "due_date": "2024-06-09"}"#,
        )
        .unwrap();
        assert_eq!(payload.request_type, RequestType::Corrective);
        assert_eq!(payload.equipment_id, Some(4));
        assert!(payload.stage.is_none());

        let bad = serde_json::from_str::<CreateMaintenanceRequest>(
            r#"{"task_name": "Leak", "type": "Corrective", "stage": "Done"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_update_payload_requires_stage() {
        let missing = serde_json::from_str::<UpdateMaintenanceRequest>(
            r#"{"task_name": "Leak", "type": "Preventive"}"#,
        );
        assert!(missing.is_err());

        let payload: UpdateMaintenanceRequest = serde_json::from_str(
            r#"{"task_name": "Leak", "type": "Preventive", "stage": "In Progress", "hours_spent": 5}"#,
        )
        .unwrap();
        assert_eq!(payload.stage, Stage::InProgress);
        assert_eq!(payload.hours_spent, Some(Decimal::from(5)));
    }
}
