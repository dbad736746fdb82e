use crate::models::{LeagueFields, TeamFields};

use super::rules::{body_id_rule, league_rules, param_id_rule, team_rules};
use super::{FieldError, FieldRule, Input, Location, Validate};

/// `id` path parameter of read, replace and delete requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl Validate for RecordId {
    fn rules() -> Vec<FieldRule> {
        param_id_rule()
    }

    fn from_input(input: &Input) -> Result<Self, FieldError> {
        input.integer(Location::Param, "id").map(RecordId)
    }
}

/// POST /leagues body
#[derive(Debug, Clone, PartialEq)]
pub struct NewLeague {
    pub id: i64,
    pub league: LeagueFields,
}

impl Validate for NewLeague {
    fn rules() -> Vec<FieldRule> {
        [body_id_rule(), league_rules()].concat()
    }

    fn from_input(input: &Input) -> Result<Self, FieldError> {
        Ok(Self {
            id: input.integer(Location::Body, "id")?,
            league: league_fields(input)?,
        })
    }
}

/// PUT /leagues/{id} path and body
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueUpdate {
    pub id: i64,
    pub league: LeagueFields,
}

impl Validate for LeagueUpdate {
    fn rules() -> Vec<FieldRule> {
        [param_id_rule(), league_rules()].concat()
    }

    fn from_input(input: &Input) -> Result<Self, FieldError> {
        Ok(Self {
            id: input.integer(Location::Param, "id")?,
            league: league_fields(input)?,
        })
    }
}

/// POST /teams body
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeam {
    pub id: i64,
    pub team: TeamFields,
}

impl Validate for NewTeam {
    fn rules() -> Vec<FieldRule> {
        [body_id_rule(), team_rules()].concat()
    }

    fn from_input(input: &Input) -> Result<Self, FieldError> {
        Ok(Self {
            id: input.integer(Location::Body, "id")?,
            team: team_fields(input)?,
        })
    }
}

/// PUT /teams/{id} path and body
#[derive(Debug, Clone, PartialEq)]
pub struct TeamUpdate {
    pub id: i64,
    pub team: TeamFields,
}

impl Validate for TeamUpdate {
    fn rules() -> Vec<FieldRule> {
        [param_id_rule(), team_rules()].concat()
    }

    fn from_input(input: &Input) -> Result<Self, FieldError> {
        Ok(Self {
            id: input.integer(Location::Param, "id")?,
            team: team_fields(input)?,
        })
    }
}

fn league_fields(input: &Input) -> Result<LeagueFields, FieldError> {
    Ok(LeagueFields {
        name: input.text(Location::Body, "nom"),
        country: input.text(Location::Body, "pays"),
        team_count: Some(input.integer(Location::Body, "nbEquipes")?),
    })
}

fn team_fields(input: &Input) -> Result<TeamFields, FieldError> {
    Ok(TeamFields {
        name: input.text(Location::Body, "nom"),
        country: input.text(Location::Body, "pays"),
        stadium: input.text(Location::Body, "stadeEquipe"),
        founded_on: input.date(Location::Body, "dateCreation")?,
        league_id: input.integer(Location::Body, "ligue")?,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::validation::run;

    #[test]
    fn team_update_takes_id_from_path_and_keeps_stadium() {
        let mut input = Input::new(
            HashMap::from([("id".to_string(), "5".to_string())]),
            json!({
                "id": 99,
                "nom": " Lens ",
                "pays": "France",
                "stadeEquipe": "Bollaert",
                "dateCreation": "01-01-1906",
                "ligue": 1,
            }),
        );

        run(&TeamUpdate::rules(), &mut input).unwrap();
        let update = TeamUpdate::from_input(&input).unwrap();

        assert_eq!(update.id, 5);
        assert_eq!(
            update.team,
            TeamFields {
                name: "Lens".to_string(),
                country: "France".to_string(),
                stadium: "Bollaert".to_string(),
                founded_on: NaiveDate::from_ymd_opt(1906, 1, 1).unwrap(),
                league_id: 1,
            }
        );
    }

    #[test]
    fn path_id_errors_come_before_body_errors() {
        let mut input = Input::new(
            HashMap::from([("id".to_string(), "abc".to_string())]),
            json!({ "nom": "Ligue1", "pays": "France" }),
        );

        let errors = run(&LeagueUpdate::rules(), &mut input).unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["id", "nbEquipes", "nbEquipes"]);
    }
}
