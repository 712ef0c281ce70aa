//! Maintenance teams service
//!
//! Team row and membership are always written in one transaction: either the
//! team and its full member list are stored, or nothing changes.

use crate::{
    error::{AppError, AppResult},
    models::team::{
        MaintenanceTeam, MaintenanceTeamDetails, MaintenanceTeamInput, MaintenanceTeamSummary,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceTeamSummary>> {
        self.repository.teams.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTeamDetails> {
        let team = self.repository.teams.get_by_id(id).await?;
        let members = self.repository.teams.members(id).await?;
        Ok(MaintenanceTeamDetails { team, members })
    }

    pub async fn create(&self, data: &MaintenanceTeamInput, tenant_id: i32) -> AppResult<MaintenanceTeam> {
        let company_id = data.company_id.unwrap_or(tenant_id);
        let member_ids = data.distinct_member_ids();

        let mut tx = self.repository.pool.begin().await?;
        let team = self.repository.teams.insert(&mut *tx, &data.name, company_id).await?;
        self.repository.teams.add_members(&mut *tx, team.id, &member_ids).await?;
        tx.commit().await?;

        tracing::info!("Created team {} with {} members", team.id, member_ids.len());
        Ok(team)
    }

    /// Update the team and replace its whole membership with `member_ids`
    pub async fn update(
        &self,
        id: i32,
        data: &MaintenanceTeamInput,
        tenant_id: i32,
    ) -> AppResult<MaintenanceTeam> {
        let company_id = data.company_id.unwrap_or(tenant_id);
        let member_ids = data.distinct_member_ids();

        let mut tx = self.repository.pool.begin().await?;
        let team = self
            .repository
            .teams
            .update_row(&mut *tx, id, &data.name, company_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

        let removed = self.repository.teams.clear_members(&mut *tx, id).await?;
        self.repository.teams.add_members(&mut *tx, id, &member_ids).await?;
        tx.commit().await?;

        tracing::debug!(
            "Replaced membership of team {}: {} removed, {} added",
            id,
            removed,
            member_ids.len()
        );
        Ok(team)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.teams.delete(id).await
    }
}
