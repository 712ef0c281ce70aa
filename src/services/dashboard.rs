//! Dashboard aggregation service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        dashboard::{DashboardStats, ReportQuery, ReportRow, TaskQuery},
        enums::{parse_optional, ReportGroupBy, TaskStatusFilter},
        maintenance_request::MaintenanceRequestDetails,
    },
    repository::{dashboard::Clock, Repository},
};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let clock = Clock::at(Utc::now());
        self.repository.dashboard.stats(&clock).await
    }

    pub async fn tasks(&self, query: &TaskQuery) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let filter = parse_optional::<TaskStatusFilter>(query.status.as_deref())?;
        let clock = Clock::at(Utc::now());
        let rows = self.repository.dashboard.tasks(filter, &clock).await?;
        Ok(rows.into_iter().map(|r| r.annotate(clock.now)).collect())
    }

    pub async fn report(&self, query: &ReportQuery) -> AppResult<Vec<ReportRow>> {
        let group_by = parse_group_by(query.group_by.as_deref())?;
        let rows = self.repository.dashboard.report(group_by).await?;
        debug_assert!(rows.iter().all(ReportRow::is_consistent));
        Ok(rows)
    }
}

/// `group_by` is mandatory for reports
pub fn parse_group_by(value: Option<&str>) -> AppResult<ReportGroupBy> {
    parse_optional::<ReportGroupBy>(value)?
        .ok_or_else(|| AppError::BadRequest("group_by must be team or category".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_by() {
        assert_eq!(parse_group_by(Some("team")).unwrap(), ReportGroupBy::Team);
        assert_eq!(parse_group_by(Some("category")).unwrap(), ReportGroupBy::Category);
        assert!(matches!(parse_group_by(Some("department")), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_group_by(None), Err(AppError::BadRequest(_))));
    }
}
