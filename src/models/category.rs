//! Equipment category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentCategory {
    pub id: i32,
    pub name: String,
    /// User responsible for equipment of this category
    pub responsible_id: Option<i32>,
    pub company_id: Option<i32>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Category with join-derived display names
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentCategoryDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub category: EquipmentCategory,
    pub responsible_name: Option<String>,
    pub company_name: Option<String>,
}

/// Category payload used by both create and full update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EquipmentCategoryInput {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    pub responsible_id: Option<i32>,
    pub company_id: Option<i32>,
    pub description: Option<String>,
}
