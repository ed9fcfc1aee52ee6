use axum::extract::State;
use axum::{routing::get, Json, Router};
use popdash_db::repositories::PopulationRepo;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Window applied when a request omits `hours`.
    pub default_window_hours: u32,
    /// Rows currently in `current_population`; `None` when the query fails.
    pub population_rows: Option<i64>,
}

/// GET /health -- service and database health plus how much population
/// data the dashboard has to work with.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = popdash_db::health_check(&state.pool).await.is_ok();
    let population_rows = if db_healthy {
        PopulationRepo::count(&state.pool)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Population row count failed"))
            .ok()
    } else {
        None
    };

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        default_window_hours: state.config.default_window_hours,
        population_rows,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
