pub mod commercial;
pub mod health;
pub mod population;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /areas                                   static area list
/// /data                                    peak payment per bucket and category
/// /commercial                              latest commercial rows
/// /all-data                                latest population + commercial rows
/// /main-page-hourly-population             hourly average (main page)
///
/// /population                              hourly average
/// /population/by-area                      per-area samples
/// /population/area-now                     latest bucket, all areas
/// /population/detail                       totalData / areaData / hourlyAvg
/// /population/summary                      latest hour vs previous
/// /population/gender-ratio                 placeholder
/// /population/age-distribution             placeholder
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/areas", get(handlers::areas::list_areas))
        .route(
            "/main-page-hourly-population",
            get(handlers::population::hourly_population),
        )
        .nest("/population", population::router())
        .merge(commercial::router())
}
