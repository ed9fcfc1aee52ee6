//! Handlers for population aggregations.
//!
//! Windowed endpoints accept `?hours=` (default from config) and `?area=`
//! (comma-separated). Responses are bare JSON arrays or objects; failures
//! go through [`AppError`](crate::error::AppError).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use popdash_core::change::{summarize_hourly, PopulationSummary};
use popdash_core::placeholder::{self, AgeGroupCount, GenderCount};
use popdash_core::rows::{AreaNowRow, AreaPopulationRow, HourlyPopulationRow, PopulationDetail};
use popdash_db::query::QueryFilters;
use popdash_db::repositories::PopulationRepo;

use crate::error::AppResult;
use crate::query::{Query, WindowParams};
use crate::state::AppState;

/// Hours compared by the summary card: the latest hour and the one before.
const SUMMARY_WINDOW_HOURS: u32 = 3;

// ---------------------------------------------------------------------------
// Hourly averages
// ---------------------------------------------------------------------------

/// GET /api/population
/// GET /api/main-page-hourly-population
///
/// Average population per hour, most recent hour first.
pub async fn hourly_population(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> AppResult<Json<Vec<HourlyPopulationRow>>> {
    let window = params.window(state.config.default_window_hours)?;
    let rows =
        PopulationRepo::hourly_average(&state.pool, window.cutoff(Utc::now()), &params.filters())
            .await?;

    tracing::debug!(hours = window.hours(), rows = rows.len(), "Hourly population fetched");
    Ok(Json(rows))
}

// ---------------------------------------------------------------------------
// Per-area samples
// ---------------------------------------------------------------------------

/// GET /api/population/by-area
///
/// Un-aggregated per-area samples for client-side regrouping.
/// `?granularity=minute` keeps sub-hour buckets.
pub async fn population_by_area(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> AppResult<Json<Vec<AreaPopulationRow>>> {
    let window = params.window(state.config.default_window_hours)?;
    let rows = PopulationRepo::area_samples(
        &state.pool,
        window.cutoff(Utc::now()),
        &params.filters(),
        params.granularity(),
    )
    .await?;

    tracing::debug!(hours = window.hours(), rows = rows.len(), "Area population fetched");
    Ok(Json(rows))
}

/// GET /api/population/area-now
///
/// Average population per area in the most recently ingested bucket.
pub async fn area_now(State(state): State<AppState>) -> AppResult<Json<Vec<AreaNowRow>>> {
    let rows = PopulationRepo::area_now(&state.pool).await?;
    tracing::debug!(areas = rows.len(), "Current area population fetched");
    Ok(Json(rows))
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// GET /api/population/detail
///
/// Runs the three detail queries concurrently. Any failure fails the whole
/// response; partial results are never returned.
pub async fn population_detail(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> AppResult<Json<PopulationDetail>> {
    let window = params.window(state.config.default_window_hours)?;
    let cutoff = window.cutoff(Utc::now());
    let filters = params.filters();

    let (total_data, area_data, hourly_avg) = tokio::try_join!(
        PopulationRepo::bucket_detail(&state.pool, cutoff, &filters),
        PopulationRepo::latest_bucket_per_area(&state.pool, cutoff, &filters),
        PopulationRepo::hourly_average(&state.pool, cutoff, &filters),
    )?;

    tracing::debug!(
        hours = window.hours(),
        total = total_data.len(),
        areas = area_data.len(),
        hourly = hourly_avg.len(),
        "Population detail fetched",
    );

    Ok(Json(PopulationDetail {
        total_data,
        area_data,
        hourly_avg,
    }))
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// GET /api/population/summary
///
/// Latest hourly average against the previous hour.
pub async fn population_summary(
    State(state): State<AppState>,
) -> AppResult<Json<PopulationSummary>> {
    let cutoff = Utc::now() - chrono::Duration::hours(i64::from(SUMMARY_WINDOW_HOURS));
    let rows = PopulationRepo::hourly_average(&state.pool, cutoff, &QueryFilters::default()).await?;
    Ok(Json(summarize_hourly(&rows)))
}

// ---------------------------------------------------------------------------
// Placeholder demographics
// ---------------------------------------------------------------------------

/// GET /api/population/gender-ratio
///
/// Random placeholder counts; there is no gender column.
pub async fn gender_ratio() -> Json<Vec<GenderCount>> {
    Json(placeholder::gender_ratio())
}

/// GET /api/population/age-distribution
///
/// Random placeholder counts; there is no age column.
pub async fn age_distribution() -> Json<Vec<AgeGroupCount>> {
    Json(placeholder::age_distribution())
}
