//! Route definitions for commercial payment data.

use axum::routing::get;
use axum::Router;

use crate::handlers::commercial;
use crate::state::AppState;

/// Commercial routes, merged at the `/api` root.
///
/// ```text
/// GET  /data         -> category_peaks
/// GET  /commercial   -> latest_commercial
/// GET  /all-data     -> all_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data", get(commercial::category_peaks))
        .route("/commercial", get(commercial::latest_commercial))
        .route("/all-data", get(commercial::all_data))
}
