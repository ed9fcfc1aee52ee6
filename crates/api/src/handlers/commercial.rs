//! Handlers for commercial payment data.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use popdash_core::rows::{AllData, CategoryPeakRow, CommercialSample};
use popdash_db::repositories::{CommercialRepo, PopulationRepo, LATEST_ROWS_LIMIT};

use crate::error::AppResult;
use crate::query::{Query, WindowParams};
use crate::state::AppState;

/// GET /api/data
///
/// Peak payment per (bucket, category) over the population/commercial join.
/// Accepts `?hours=`, `?area=` and `?category=`.
pub async fn category_peaks(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> AppResult<Json<Vec<CategoryPeakRow>>> {
    let window = params.window(state.config.default_window_hours)?;
    let rows =
        CommercialRepo::category_peaks(&state.pool, window.cutoff(Utc::now()), &params.filters())
            .await?;

    tracing::debug!(hours = window.hours(), rows = rows.len(), "Category peaks fetched");
    Ok(Json(rows))
}

/// GET /api/commercial
///
/// The latest commercial rows.
pub async fn latest_commercial(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CommercialSample>>> {
    let rows = CommercialRepo::latest(&state.pool, LATEST_ROWS_LIMIT).await?;
    Ok(Json(rows))
}

/// GET /api/all-data
///
/// The latest population and commercial rows side by side.
pub async fn all_data(State(state): State<AppState>) -> AppResult<Json<AllData>> {
    let (population, commercial) = tokio::try_join!(
        PopulationRepo::latest(&state.pool, LATEST_ROWS_LIMIT),
        CommercialRepo::latest(&state.pool, LATEST_ROWS_LIMIT),
    )?;
    Ok(Json(AllData {
        population,
        commercial,
    }))
}
