//! Route definitions for population aggregations.

use axum::routing::get;
use axum::Router;

use crate::handlers::population;
use crate::state::AppState;

/// Population routes mounted at `/population`.
///
/// ```text
/// GET  /                   -> hourly_population
/// GET  /by-area            -> population_by_area
/// GET  /area-now           -> area_now
/// GET  /detail             -> population_detail
/// GET  /summary            -> population_summary
/// GET  /gender-ratio       -> gender_ratio
/// GET  /age-distribution   -> age_distribution
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(population::hourly_population))
        .route("/by-area", get(population::population_by_area))
        .route("/area-now", get(population::area_now))
        .route("/detail", get(population::population_detail))
        .route("/summary", get(population::population_summary))
        .route("/gender-ratio", get(population::gender_ratio))
        .route("/age-distribution", get(population::age_distribution))
}
