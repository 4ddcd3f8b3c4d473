//! Liveness and readiness checks.

use axum::{Router, extract::State, http::StatusCode, routing::get};
use sqlx::PgPool;

/// Liveness: the process is up. Checks no dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness: 503 until Postgres (the session store) answers.
pub async fn ready(State(pool): State<PgPool>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(&pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// `GET /health/ready`, carrying its own pool.
pub fn ready_router(pool: PgPool) -> Router {
    Router::new()
        .route("/health/ready", get(ready))
        .with_state(pool)
}
