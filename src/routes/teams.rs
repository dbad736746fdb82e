use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::PopulatedTeam;
use crate::validation::Validated;
use crate::validation::requests::{NewTeam, RecordId, TeamUpdate};

pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/teams", get(get_teams).post(create_team))
        .route(
            "/teams/{id}",
            get(get_team_by_id).put(update_team).delete(delete_team),
        )
}

fn not_found(team_id: i64) -> ApiError {
    ApiError::NotFound(format!("equipes with id {team_id} is not found !"))
}

// POST /teams - Create a team. The league reference is not checked here.
pub async fn create_team(
    State(pool): State<SqlitePool>,
    Validated(NewTeam { id, team }): Validated<NewTeam>,
) -> Result<(StatusCode, Json<&'static str>), ApiError> {
    db::insert_team(&pool, id, &team).await?;
    tracing::info!(team_id = id, league_id = team.league_id, "Team created");

    Ok((StatusCode::CREATED, Json("L'équipe a bien été crée!")))
}

// GET /teams - List all teams with their league
pub async fn get_teams(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<PopulatedTeam>>, ApiError> {
    let teams = db::get_all_teams(&pool).await?;

    Ok(Json(teams))
}

// GET /teams/:id - Get team by ID with its league, `null` when absent
pub async fn get_team_by_id(
    State(pool): State<SqlitePool>,
    Validated(RecordId(team_id)): Validated<RecordId>,
) -> Result<Json<Option<PopulatedTeam>>, ApiError> {
    let team = db::get_team_by_id(&pool, team_id).await?;

    Ok(Json(team))
}

// PUT /teams/:id - Replace a team
pub async fn update_team(
    State(pool): State<SqlitePool>,
    Validated(TeamUpdate { id, team }): Validated<TeamUpdate>,
) -> Result<(StatusCode, Json<&'static str>), ApiError> {
    db::update_team(&pool, id, &team)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(team_id = id, "Team updated");

    Ok((StatusCode::CREATED, Json("equipes updated successfully !")))
}

// DELETE /teams/:id - Delete a team
pub async fn delete_team(
    State(pool): State<SqlitePool>,
    Validated(RecordId(team_id)): Validated<RecordId>,
) -> Result<Json<&'static str>, ApiError> {
    db::delete_team(&pool, team_id)
        .await?
        .ok_or_else(|| not_found(team_id))?;
    tracing::info!(team_id, "Team deleted");

    Ok(Json("equipes deleted successfully !"))
}
