use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use crate::models::*;

/// Open the document store, creating the database file if needed
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
}

/// Create the leagues and teams collections if they do not exist.
/// `teams.ligue` deliberately has no foreign key: references are only
/// resolved when reading.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS leagues (
               _id INTEGER PRIMARY KEY,
               nom TEXT NOT NULL,
               pays TEXT NOT NULL,
               nb_equipes INTEGER,
               version INTEGER NOT NULL DEFAULT 0
           )"#
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS teams (
               _id INTEGER PRIMARY KEY,
               nom TEXT NOT NULL,
               pays TEXT NOT NULL,
               stade_equipe TEXT NOT NULL,
               date_creation TEXT NOT NULL,
               ligue INTEGER NOT NULL,
               version INTEGER NOT NULL DEFAULT 0
           )"#
    )
    .execute(pool)
    .await?;

    Ok(())
}

// League queries
pub async fn insert_league(pool: &SqlitePool, id: i64, league: &LeagueFields) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO leagues (_id, nom, pays, nb_equipes) VALUES (?, ?, ?, ?)"#
    )
    .bind(id)
    .bind(&league.name)
    .bind(&league.country)
    .bind(league.team_count)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_all_leagues(pool: &SqlitePool) -> Result<Vec<League>, sqlx::Error> {
    sqlx::query_as::<_, League>(
        r#"SELECT * FROM leagues ORDER BY _id"#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_league_by_id(pool: &SqlitePool, league_id: i64) -> Result<Option<League>, sqlx::Error> {
    sqlx::query_as::<_, League>(
        r#"SELECT * FROM leagues WHERE _id = ?"#
    )
    .bind(league_id)
    .fetch_optional(pool)
    .await
}

/// Replace every field of a league. Returns `None` when no league has this id.
pub async fn update_league(pool: &SqlitePool, league_id: i64, league: &LeagueFields) -> Result<Option<League>, sqlx::Error> {
    sqlx::query_as::<_, League>(
        r#"UPDATE leagues
           SET nom = ?, pays = ?, nb_equipes = ?, version = version + 1
           WHERE _id = ?
           RETURNING *"#
    )
    .bind(&league.name)
    .bind(&league.country)
    .bind(league.team_count)
    .bind(league_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_league(pool: &SqlitePool, league_id: i64) -> Result<Option<League>, sqlx::Error> {
    sqlx::query_as::<_, League>(
        r#"DELETE FROM leagues WHERE _id = ? RETURNING *"#
    )
    .bind(league_id)
    .fetch_optional(pool)
    .await
}

// Team queries
const POPULATED_TEAMS: &str = r#"SELECT
       t._id,
       t.nom,
       t.pays,
       t.stade_equipe,
       t.date_creation,
       t.ligue,
       l._id AS league_id,
       l.nom AS league_nom,
       l.pays AS league_pays,
       l.nb_equipes AS league_nb_equipes,
       l.version AS league_version
   FROM teams t
   LEFT JOIN leagues l ON l._id = t.ligue"#;

pub async fn insert_team(pool: &SqlitePool, id: i64, team: &TeamFields) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO teams (_id, nom, pays, stade_equipe, date_creation, ligue)
           VALUES (?, ?, ?, ?, ?, ?)"#
    )
    .bind(id)
    .bind(&team.name)
    .bind(&team.country)
    .bind(&team.stadium)
    .bind(team.founded_on)
    .bind(team.league_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// All teams with their league populated
pub async fn get_all_teams(pool: &SqlitePool) -> Result<Vec<PopulatedTeam>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TeamRow>(
        &format!("{POPULATED_TEAMS} ORDER BY t._id")
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TeamRow::into_populated).collect())
}

pub async fn get_team_by_id(pool: &SqlitePool, team_id: i64) -> Result<Option<PopulatedTeam>, sqlx::Error> {
    let row = sqlx::query_as::<_, TeamRow>(
        &format!("{POPULATED_TEAMS} WHERE t._id = ?")
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(TeamRow::into_populated))
}

/// Replace every field of a team. Returns `None` when no team has this id.
pub async fn update_team(pool: &SqlitePool, team_id: i64, team: &TeamFields) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"UPDATE teams
           SET nom = ?, pays = ?, stade_equipe = ?, date_creation = ?, ligue = ?, version = version + 1
           WHERE _id = ?
           RETURNING *"#
    )
    .bind(&team.name)
    .bind(&team.country)
    .bind(&team.stadium)
    .bind(team.founded_on)
    .bind(team.league_id)
    .bind(team_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_team(pool: &SqlitePool, team_id: i64) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"DELETE FROM teams WHERE _id = ? RETURNING *"#
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await
}
