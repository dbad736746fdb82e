mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{count, field_errors, send, test_app};

fn lens(date: &str) -> Value {
    json!({
        "id": 10,
        "nom": "Lens",
        "pays": "France",
        "stadeEquipe": "Bollaert",
        "dateCreation": date,
        "ligue": 1,
    })
}

async fn seed_league(app: &axum::Router) {
    let (status, _) = send(
        app,
        Method::POST,
        "/leagues",
        Some(json!({ "id": 1, "nom": "Ligue1", "pays": "France", "nbEquipes": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn creation_date_bounds() {
    let (app, pool) = test_app().await;

    for (id, date) in [(1, "01-01-1800"), (2, "31-12-2100")] {
        let mut team = lens(date);
        team["id"] = json!(id);
        let (status, body) = send(&app, Method::POST, "/teams", Some(team)).await;
        assert_eq!(status, StatusCode::CREATED, "{date}");
        assert_eq!(body, json!("L'équipe a bien été crée!"));
    }

    for date in ["01-01-1799", "01-01-2101"] {
        let (status, body) = send(&app, Method::POST, "/teams", Some(lens(date))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{date}");
        assert_eq!(
            field_errors(&body),
            vec![(
                "dateCreation".to_string(),
                "La date de création doit être comprise entre 1800 et 2100".to_string()
            )]
        );
    }

    assert_eq!(count(&pool, "teams").await, 2);
}

#[tokio::test]
async fn malformed_creation_date_is_rejected() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, Method::POST, "/teams", Some(lens("1906-01-01"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        field_errors(&body),
        vec![(
            "dateCreation".to_string(),
            "La date de création doit être au format DD-MM-YYYY".to_string()
        )]
    );
}

#[tokio::test]
async fn non_alphanumeric_fields_are_rejected() {
    let (app, pool) = test_app().await;
    let mut team = lens("01-01-1906");
    team["nom"] = json!("RC Lens");
    team["stadeEquipe"] = json!("<b>Bollaert</b>");

    let (status, body) = send(&app, Method::POST, "/teams", Some(team)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = field_errors(&body).into_iter().map(|(field, _)| field).collect();
    assert_eq!(fields, ["nom", "stadeEquipe"]);
    assert_eq!(count(&pool, "teams").await, 0);
}

#[tokio::test]
async fn read_populates_the_league() {
    let (app, _pool) = test_app().await;
    seed_league(&app).await;
    send(&app, Method::POST, "/teams", Some(lens("01-01-1906"))).await;

    let (status, body) = send(&app, Method::GET, "/teams/10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 10,
            "nom": "Lens",
            "pays": "France",
            "stadeEquipe": "Bollaert",
            "dateCreation": "01-01-1906",
            "ligue": { "id": 1, "nom": "Ligue1", "pays": "France", "nbEquipes": 20 },
        })
    );
}

#[tokio::test]
async fn dangling_league_reference_is_accepted_and_reads_as_null() {
    let (app, _pool) = test_app().await;
    let mut team = lens("01-01-1906");
    team["ligue"] = json!("77");

    let (status, _) = send(&app, Method::POST, "/teams", Some(team)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/teams", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["ligue"], Value::Null);
}

#[tokio::test]
async fn update_carries_every_field() {
    let (app, _pool) = test_app().await;
    seed_league(&app).await;
    send(&app, Method::POST, "/teams", Some(lens("01-01-1906"))).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/teams/10",
        Some(json!({
            "nom": "RCLens",
            "pays": "France",
            "stadeEquipe": "FelixBollaert",
            "dateCreation": "15-03-1906",
            "ligue": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!("equipes updated successfully !"));

    let (_, body) = send(&app, Method::GET, "/teams/10", None).await;
    assert_eq!(body["nom"], "RCLens");
    assert_eq!(body["stadeEquipe"], "FelixBollaert");
    assert_eq!(body["dateCreation"], "15-03-1906");
}

#[tokio::test]
async fn update_of_missing_team_is_404() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, Method::PUT, "/teams/5", Some(lens("01-01-1906"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!("equipes with id 5 is not found !"));
}

#[tokio::test]
async fn delete_of_missing_team_leaves_collection_unchanged() {
    let (app, pool) = test_app().await;
    send(&app, Method::POST, "/teams", Some(lens("01-01-1906"))).await;

    let (status, body) = send(&app, Method::DELETE, "/teams/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!("equipes with id 999 is not found !"));
    assert_eq!(count(&pool, "teams").await, 1);
}

#[tokio::test]
async fn delete_removes_the_team() {
    let (app, pool) = test_app().await;
    send(&app, Method::POST, "/teams", Some(lens("01-01-1906"))).await;

    let (status, body) = send(&app, Method::DELETE, "/teams/10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("equipes deleted successfully !"));
    assert_eq!(count(&pool, "teams").await, 0);
}

#[tokio::test]
async fn missing_team_reads_as_null() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/teams/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}
