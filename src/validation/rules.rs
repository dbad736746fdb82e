use chrono::NaiveDate;

use super::{body, param, FieldRule};

/// Earliest accepted team creation date
pub const OLDEST_CREATION_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1800, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// Latest accepted team creation date
pub const NEWEST_CREATION_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2100, 12, 31) {
    Some(date) => date,
    None => NaiveDate::MAX,
};

// Full league document (create and replace)
pub fn league_rules() -> Vec<FieldRule> {
    vec![
        body("nom")
            .trim()
            .not_empty("Un nom de ligue doit être spécifié")
            .escape()
            .alphanumeric("Cette ligue ne doit pas contenir des caractères spéciaux"),
        body("pays")
            .trim()
            .not_empty("Un pays doit être spécifié pour cette ligue")
            .escape()
            .alphanumeric("Le pays ne doit pas contenir de caractère spéciaux."),
        body("nbEquipes")
            .trim()
            .not_empty("Un nombre d'equipes doit être spécifié pour cette ligue")
            .escape()
            .numeric("Le nombre d'equipes doit être un chiffre."),
    ]
}

// Full team document (create and replace)
pub fn team_rules() -> Vec<FieldRule> {
    vec![
        body("nom")
            .trim()
            .not_empty("Un nom d'équipe doit être spécifié")
            .escape()
            .alphanumeric("Cette équipe ne doit pas contenir des caractères spéciaux"),
        body("pays")
            .trim()
            .not_empty("Un pays doit être spécifié pour cette equipe")
            .escape()
            .alphanumeric("Le pays ne doit pas contenir de caractère spéciaux."),
        body("stadeEquipe")
            .trim()
            .not_empty("Un stade doit être spécifié pour cette equipe")
            .escape()
            .alphanumeric("Le stade ne doit pas contenir de caractère spéciaux."),
        body("dateCreation")
            .date("La date de création doit être au format DD-MM-YYYY")
            .date_between(
                OLDEST_CREATION_DATE,
                NEWEST_CREATION_DATE,
                "La date de création doit être comprise entre 1800 et 2100",
            ),
        body("ligue")
            .trim()
            .not_empty("Une ligue doit être spécifiée")
            .escape()
            .alphanumeric("La ligue ne doit pas contenir des caractères spéciaux")
            .numeric("La ligue doit être l'id d'une ligue."),
    ]
}

pub fn param_id_rule() -> Vec<FieldRule> {
    vec![id_rule(param("id"))]
}

pub fn body_id_rule() -> Vec<FieldRule> {
    vec![id_rule(body("id"))]
}

fn id_rule(rule: FieldRule) -> FieldRule {
    rule.trim()
        .not_empty("L'id doit être spécifié.")
        .escape()
        .numeric("L'id doit être un chiffre.")
}
