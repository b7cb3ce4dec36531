//! Explicit cascading deletes.
//!
//! Foreign keys cascade as well. These run the same deletes inside the
//! caller's transaction.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::entities::{budgets, expenses, players, revenues, seasons, teams};

/// Deletes a team with its players, budgets, expenses and revenues.
pub async fn delete_team<C>(conn: &C, team_id: Uuid) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    delete_team_children(conn, &[team_id]).await?;
    let result = teams::Entity::delete_by_id(team_id).exec(conn).await?;
    Ok(result.rows_affected)
}

/// Deletes a season with its teams, budgets, expenses and revenues.
pub async fn delete_season<C>(conn: &C, season_id: Uuid) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let team_ids: Vec<Uuid> = teams::Entity::find()
        .select_only()
        .column(teams::Column::Id)
        .filter(teams::Column::SeasonId.eq(season_id))
        .into_tuple()
        .all(conn)
        .await?;

    delete_team_children(conn, &team_ids).await?;
    teams::Entity::delete_many()
        .filter(teams::Column::SeasonId.eq(season_id))
        .exec(conn)
        .await?;

    budgets::Entity::delete_many()
        .filter(budgets::Column::SeasonId.eq(season_id))
        .exec(conn)
        .await?;
    expenses::Entity::delete_many()
        .filter(expenses::Column::SeasonId.eq(season_id))
        .exec(conn)
        .await?;
    revenues::Entity::delete_many()
        .filter(revenues::Column::SeasonId.eq(season_id))
        .exec(conn)
        .await?;

    let result = seasons::Entity::delete_by_id(season_id).exec(conn).await?;
    Ok(result.rows_affected)
}

async fn delete_team_children<C>(conn: &C, team_ids: &[Uuid]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if team_ids.is_empty() {
        return Ok(());
    }
    let ids = team_ids.iter().copied();

    players::Entity::delete_many()
        .filter(players::Column::TeamId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    budgets::Entity::delete_many()
        .filter(budgets::Column::TeamId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    expenses::Entity::delete_many()
        .filter(expenses::Column::TeamId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    revenues::Entity::delete_many()
        .filter(revenues::Column::TeamId.is_in(ids))
        .exec(conn)
        .await?;
    Ok(())
}
