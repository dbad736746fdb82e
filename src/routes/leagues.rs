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
use crate::models::League;
use crate::validation::Validated;
use crate::validation::requests::{LeagueUpdate, NewLeague, RecordId};

pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/leagues", get(get_leagues).post(create_league))
        .route(
            "/leagues/{id}",
            get(get_league_by_id).put(update_league).delete(delete_league),
        )
}

fn not_found(league_id: i64) -> ApiError {
    ApiError::NotFound(format!("ligues with id {league_id} is not found !"))
}

// POST /leagues - Create a league with a caller-supplied id
pub async fn create_league(
    State(pool): State<SqlitePool>,
    Validated(NewLeague { id, league }): Validated<NewLeague>,
) -> Result<(StatusCode, Json<&'static str>), ApiError> {
    db::insert_league(&pool, id, &league).await?;
    tracing::info!(league_id = id, "League created");

    Ok((StatusCode::CREATED, Json("La ligue a bien été crée!")))
}

// GET /leagues - List all leagues
pub async fn get_leagues(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<League>>, ApiError> {
    let leagues = db::get_all_leagues(&pool).await?;

    Ok(Json(leagues))
}

// GET /leagues/:id - Get league by ID, `null` when absent
pub async fn get_league_by_id(
    State(pool): State<SqlitePool>,
    Validated(RecordId(league_id)): Validated<RecordId>,
) -> Result<Json<Option<League>>, ApiError> {
    let league = db::get_league_by_id(&pool, league_id).await?;

    Ok(Json(league))
}

// PUT /leagues/:id - Replace a league
pub async fn update_league(
    State(pool): State<SqlitePool>,
    Validated(LeagueUpdate { id, league }): Validated<LeagueUpdate>,
) -> Result<(StatusCode, Json<&'static str>), ApiError> {
    db::update_league(&pool, id, &league)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(league_id = id, "League updated");

    Ok((StatusCode::CREATED, Json("ligues updated successfully !")))
}

// DELETE /leagues/:id - Delete a league
pub async fn delete_league(
    State(pool): State<SqlitePool>,
    Validated(RecordId(league_id)): Validated<RecordId>,
) -> Result<Json<&'static str>, ApiError> {
    db::delete_league(&pool, league_id)
        .await?
        .ok_or_else(|| not_found(league_id))?;
    tracing::info!(league_id, "League deleted");

    Ok(Json("ligues deleted successfully !"))
}
