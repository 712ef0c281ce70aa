//! Maintenance teams repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::team::{MaintenanceTeam, MaintenanceTeamSummary, TeamMember},
};

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List teams with members and open request counts, ordered by name
    pub async fn list(&self) -> AppResult<Vec<MaintenanceTeamSummary>> {
        let rows = sqlx::query_as::<_, MaintenanceTeamSummary>(
            r#"
            SELECT
                mt.*,
                c.name AS company_name,
                COALESCE(
                    json_agg(
                        json_build_object('id', u.id, 'name', u.name)
                        ORDER BY u.name
                    ) FILTER (WHERE u.id IS NOT NULL),
                    '[]'::json
                ) AS members,
                (
                    SELECT COUNT(*) FROM maintenance_requests
                    WHERE team_id = mt.id AND stage NOT IN ('Repaired', 'Scrap')
                ) AS request_count
            FROM maintenance_teams mt
            LEFT JOIN companies c ON mt.company_id = c.id
            LEFT JOIN maintenance_team_members mtm ON mt.id = mtm.team_id
            LEFT JOIN users u ON mtm.user_id = u.id
            GROUP BY mt.id, c.name
            ORDER BY mt.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTeam> {
        sqlx::query_as::<_, MaintenanceTeam>("SELECT * FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    /// Members of a team ordered by name
    pub async fn members(&self, team_id: i32) -> AppResult<Vec<TeamMember>> {
        let rows = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT u.id, u.name, u.email
            FROM users u
            INNER JOIN maintenance_team_members mtm ON u.id = mtm.user_id
            WHERE mtm.team_id = $1
            ORDER BY u.name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        name: &str,
        company_id: i32,
    ) -> AppResult<MaintenanceTeam> {
        let row = sqlx::query_as::<_, MaintenanceTeam>(
            r#"
            INSERT INTO maintenance_teams (name, company_id, created_at)
            VALUES ($1, $2, NOW())
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(company_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Update the team row; `None` when the team does not exist
    pub async fn update_row(
        &self,
        conn: &mut PgConnection,
        id: i32,
        name: &str,
        company_id: i32,
    ) -> AppResult<Option<MaintenanceTeam>> {
        let row = sqlx::query_as::<_, MaintenanceTeam>(
            r#"
            UPDATE maintenance_teams SET
                name = $1,
                company_id = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(company_id)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Drop every membership of a team
    pub async fn clear_members(&self, conn: &mut PgConnection, team_id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM maintenance_team_members WHERE team_id = $1")
            .bind(team_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn add_members(
        &self,
        conn: &mut PgConnection,
        team_id: i32,
        member_ids: &[i32],
    ) -> AppResult<()> {
        for member_id in member_ids {
            sqlx::query("INSERT INTO maintenance_team_members (team_id, user_id) VALUES ($1, $2)")
                .bind(team_id)
                .bind(member_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Delete a team; memberships cascade
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }
        Ok(())
    }
}
