//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub serial_number: Option<String>,
    pub category_id: Option<i32>,
    pub department_id: Option<i32>,
    /// Employee the equipment is assigned to
    pub employee_id: Option<i32>,
    /// Team defaulted onto new requests for this equipment
    pub maintenance_team_id: Option<i32>,
    pub company_id: Option<i32>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_date: Option<NaiveDate>,
    pub type_model: Option<String>,
    pub setup_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Mirrors the last Scrap transition of a request on this equipment
    pub is_scrapped: bool,
    pub scrapped_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Equipment with join-derived display names
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub equipment: Equipment,
    pub category_name: Option<String>,
    pub team_name: Option<String>,
    pub employee_name: Option<String>,
    pub department_name: Option<String>,
    /// Requests on this equipment that are still open (single-record reads only)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(skip)]
    pub open_requests_count: Option<i64>,
}

/// Equipment payload used by both create and full update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EquipmentInput {
    #[validate(length(min = 1, message = "Equipment name is required"))]
    pub name: String,
    pub serial_number: Option<String>,
    pub category_id: Option<i32>,
    pub department_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub maintenance_team_id: Option<i32>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_date: Option<NaiveDate>,
    pub type_model: Option<String>,
    pub setup_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Ignored on update; defaults to the caller's tenant on create
    pub company_id: Option<i32>,
}

/// Equipment list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Department ID
    pub department: Option<i32>,
    /// Assigned employee (user) ID
    pub employee: Option<i32>,
    /// Equipment category ID
    pub category: Option<i32>,
}
