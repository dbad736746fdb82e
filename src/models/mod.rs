use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

/// Wire format of a team's creation date
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// League document from the leagues collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct League {
    #[sqlx(rename = "_id")]
    pub id: i64,
    #[serde(rename = "nom")]
    #[sqlx(rename = "nom")]
    pub name: String,
    #[serde(rename = "pays")]
    #[sqlx(rename = "pays")]
    pub country: String,
    #[serde(rename = "nbEquipes")]
    #[sqlx(rename = "nb_equipes")]
    pub team_count: Option<i64>,
    /// Store-maintained revision, never serialized
    #[serde(skip)]
    pub version: i64,
}

/// Team document as stored, with the league reference left unresolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    #[sqlx(rename = "_id")]
    pub id: i64,
    #[serde(rename = "nom")]
    #[sqlx(rename = "nom")]
    pub name: String,
    #[serde(rename = "pays")]
    #[sqlx(rename = "pays")]
    pub country: String,
    #[serde(rename = "stadeEquipe")]
    #[sqlx(rename = "stade_equipe")]
    pub stadium: String,
    #[serde(rename = "dateCreation", with = "creation_date")]
    #[sqlx(rename = "date_creation")]
    pub founded_on: NaiveDate,
    #[serde(rename = "ligue")]
    #[sqlx(rename = "ligue")]
    pub league_id: i64,
    #[serde(skip)]
    pub version: i64,
}

/// Team with its league reference resolved into the league document.
/// A dangling reference populates as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedTeam {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "pays")]
    pub country: String,
    #[serde(rename = "stadeEquipe")]
    pub stadium: String,
    #[serde(rename = "dateCreation", with = "creation_date")]
    pub founded_on: NaiveDate,
    #[serde(rename = "ligue")]
    pub league: Option<League>,
}

/// Row from the teams collection joined with its league
#[derive(Debug, sqlx::FromRow)]
pub struct TeamRow {
    #[sqlx(rename = "_id")]
    pub id: i64,
    pub nom: String,
    pub pays: String,
    pub stade_equipe: String,
    pub date_creation: NaiveDate,
    pub ligue: i64,
    pub league_id: Option<i64>,
    pub league_nom: Option<String>,
    pub league_pays: Option<String>,
    pub league_nb_equipes: Option<i64>,
    pub league_version: Option<i64>,
}

impl TeamRow {
    /// Convert the joined row into the populated API shape
    pub fn into_populated(self) -> PopulatedTeam {
        let league = match (self.league_id, self.league_nom, self.league_pays) {
            (Some(id), Some(name), Some(country)) => Some(League {
                id,
                name,
                country,
                team_count: self.league_nb_equipes,
                version: self.league_version.unwrap_or_default(),
            }),
            _ => None,
        };

        PopulatedTeam {
            id: self.id,
            name: self.nom,
            country: self.pays,
            stadium: self.stade_equipe,
            founded_on: self.date_creation,
            league,
        }
    }
}

/// League fields supplied by a create or replace request
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueFields {
    pub name: String,
    pub country: String,
    pub team_count: Option<i64>,
}

/// Team fields supplied by a create or replace request
#[derive(Debug, Clone, PartialEq)]
pub struct TeamFields {
    pub name: String,
    pub country: String,
    pub stadium: String,
    pub founded_on: NaiveDate,
    pub league_id: i64,
}

mod creation_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
