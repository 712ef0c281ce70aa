//! Maintenance request lifecycle
//!
//! Every write that can move a request into or out of `Scrap` mirrors the
//! move onto the linked equipment's scrapped flag in the same transaction.

use chrono::Utc;
use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{parse_optional, RequestType, Stage},
        maintenance_request::{
            CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
            MaintenanceRequestQuery, UpdateMaintenanceRequest,
        },
    },
    repository::{
        maintenance_requests::{RequestFilters, ResolvedDefaults},
        Repository,
    },
};

/// Change to apply to the equipment after a stage transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapEffect {
    MarkScrapped,
    Restore,
}

/// Equipment side effect of moving a request from `old` to `new`.
/// `old` is `None` for a request being created.
pub fn scrap_effect(old: Option<Stage>, new: Stage) -> Option<ScrapEffect> {
    let was_scrap = old == Some(Stage::Scrap);
    let is_scrap = new == Stage::Scrap;
    match (was_scrap, is_scrap) {
        (false, true) => Some(ScrapEffect::MarkScrapped),
        (true, false) => Some(ScrapEffect::Restore),
        _ => None,
    }
}

/// Fill the values a new request inherits when the caller leaves them out
pub fn resolve_defaults(
    data: &CreateMaintenanceRequest,
    caller_id: i32,
    equipment_team_id: Option<i32>,
) -> ResolvedDefaults {
    ResolvedDefaults {
        assigned_by: data.assigned_by.unwrap_or(caller_id),
        stage: data.stage.unwrap_or(Stage::New),
        team_id: data.team_id.or(equipment_team_id),
    }
}

/// Convert raw list query parameters into typed filters
pub fn parse_filters(query: &MaintenanceRequestQuery) -> AppResult<RequestFilters> {
    Ok(RequestFilters {
        stage: parse_optional::<Stage>(query.stage.as_deref())?,
        team_id: query.team_id,
        equipment_id: query.equipment_id,
        request_type: parse_optional::<RequestType>(query.request_type.as_deref())?,
    })
}

#[derive(Clone)]
pub struct MaintenanceRequestsService {
    repository: Repository,
}

impl MaintenanceRequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &MaintenanceRequestQuery) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let filters = parse_filters(query)?;
        let now = Utc::now();
        let rows = self.repository.maintenance_requests.list(&filters).await?;
        Ok(rows.into_iter().map(|r| r.annotate(now)).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequestDetails> {
        let now = Utc::now();
        let row = self.repository.maintenance_requests.get_details(id).await?;
        Ok(row.annotate(now))
    }

    /// Create a request. The equipment's team is inherited when no team is
    /// given, and a request created in `Scrap` scraps its equipment.
    pub async fn create(
        &self,
        data: &CreateMaintenanceRequest,
        caller_id: i32,
    ) -> AppResult<MaintenanceRequest> {
        let mut tx = self.repository.pool.begin().await?;

        let equipment_team_id = match data.equipment_id {
            Some(equipment_id) => self
                .repository
                .equipment
                .maintenance_team_id(&mut *tx, equipment_id)
                .await?
                .flatten(),
            None => None,
        };

        let defaults = resolve_defaults(data, caller_id, equipment_team_id);
        let request = self
            .repository
            .maintenance_requests
            .insert(&mut *tx, data, &defaults)
            .await?;

        self.apply_scrap_effect(&mut *tx, scrap_effect(None, request.stage), request.equipment_id)
            .await?;
        tx.commit().await?;

        Ok(request)
    }

    /// Full update; `hours_spent` keeps its stored value when null
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateMaintenanceRequest,
    ) -> AppResult<MaintenanceRequest> {
        let mut tx = self.repository.pool.begin().await?;

        let previous = self
            .repository
            .maintenance_requests
            .lock_state(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))?;

        let request = self
            .repository
            .maintenance_requests
            .update(&mut *tx, id, data)
            .await?;

        let equipment_id = data.equipment_id.or(previous.equipment_id);
        self.apply_scrap_effect(&mut *tx, scrap_effect(Some(previous.stage), data.stage), equipment_id)
            .await?;
        tx.commit().await?;

        Ok(request)
    }

    /// Move a request to another stage without touching its other fields
    pub async fn change_stage(&self, id: i32, stage: Stage) -> AppResult<MaintenanceRequest> {
        let mut tx = self.repository.pool.begin().await?;

        let previous = self
            .repository
            .maintenance_requests
            .lock_state(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))?;

        let request = self
            .repository
            .maintenance_requests
            .update_stage(&mut *tx, id, stage)
            .await?;

        self.apply_scrap_effect(&mut *tx, scrap_effect(Some(previous.stage), stage), previous.equipment_id)
            .await?;
        tx.commit().await?;

        tracing::debug!("Request {} moved from {} to {}", id, previous.stage, stage);
        Ok(request)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.maintenance_requests.delete(id).await
    }

    async fn apply_scrap_effect(
        &self,
        conn: &mut PgConnection,
        effect: Option<ScrapEffect>,
        equipment_id: Option<i32>,
    ) -> AppResult<()> {
        let (Some(effect), Some(equipment_id)) = (effect, equipment_id) else {
            return Ok(());
        };

        let scrapped = effect == ScrapEffect::MarkScrapped;
        self.repository
            .equipment
            .set_scrapped(conn, equipment_id, scrapped)
            .await?;

        if scrapped {
            tracing::info!("Equipment {} marked as scrapped", equipment_id);
        } else {
            tracing::info!("Equipment {} restored from scrap", equipment_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(json: &str) -> CreateMaintenanceRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_entering_scrap_marks_equipment() {
        assert_eq!(scrap_effect(None, Stage::Scrap), Some(ScrapEffect::MarkScrapped));
        assert_eq!(scrap_effect(Some(Stage::New), Stage::Scrap), Some(ScrapEffect::MarkScrapped));
        assert_eq!(
            scrap_effect(Some(Stage::Repaired), Stage::Scrap),
            Some(ScrapEffect::MarkScrapped)
        );
    }

    #[test]
    fn test_leaving_scrap_restores_equipment() {
        for stage in [Stage::New, Stage::InProgress, Stage::Repaired] {
            assert_eq!(scrap_effect(Some(Stage::Scrap), stage), Some(ScrapEffect::Restore));
        }
    }

    #[test]
    fn test_no_effect_without_scrap() {
        assert_eq!(scrap_effect(Some(Stage::Scrap), Stage::Scrap), None);
        assert_eq!(scrap_effect(None, Stage::New), None);
        assert_eq!(scrap_effect(Some(Stage::New), Stage::Repaired), None);
        assert_eq!(scrap_effect(Some(Stage::Repaired), Stage::InProgress), None);
    }

    #[test]
    fn test_defaults_inherit_equipment_team() {
        let data = create_payload(r#"{"task_name": "Leak", "type": "Corrective", "equipment_id": 3}"#);
        let defaults = resolve_defaults(&data, 7, Some(12));
        assert_eq!(defaults.team_id, Some(12));
        assert_eq!(defaults.assigned_by, 7);
        assert_eq!(defaults.stage, Stage::New);
    }

    #[test]
    fn test_explicit_values_win_over_defaults() {
        let data = create_payload(
            r#"{"task_name": "Leak", "type": "Corrective", "equipment_id": 3,
                "team_id": 4, "assigned_by": 2, "stage": "Scrap"}"#,
        );
        let defaults = resolve_defaults(&data, 7, Some(12));
        assert_eq!(defaults.team_id, Some(4));
        assert_eq!(defaults.assigned_by, 2);
        assert_eq!(defaults.stage, Stage::Scrap);
    }

    #[test]
    fn test_parse_filters() {
        let query = MaintenanceRequestQuery {
            stage: Some("In Progress".to_string()),
            request_type: Some("Preventive".to_string()),
            team_id: Some(2),
            ..Default::default()
        };
        let filters = parse_filters(&query).unwrap();
        assert_eq!(filters.stage, Some(Stage::InProgress));
        assert_eq!(filters.request_type, Some(RequestType::Preventive));
        assert_eq!(filters.team_id, Some(2));
        assert_eq!(filters.equipment_id, None);

        let bad = MaintenanceRequestQuery {
            stage: Some("Closed".to_string()),
            ..Default::default()
        };
        assert!(matches!(parse_filters(&bad), Err(AppError::BadRequest(_))));
    }
}
