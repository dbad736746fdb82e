use axum::{routing::get, Router};
use sqlx::sqlite::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod health;
pub mod leagues;
pub mod teams;

/// Full route table: service endpoints plus both entity slices
pub fn app(pool: SqlitePool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { concat!("Leagues API - v", env!("CARGO_PKG_VERSION")) }))
        .route("/health", get(health::health_check))

        .merge(leagues::routes())
        .merge(teams::routes())

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(pool)
}
