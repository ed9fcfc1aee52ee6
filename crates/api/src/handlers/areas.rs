//! Handler for the static area list.

use axum::Json;
use popdash_core::areas::AREA_NAMES;
use popdash_core::rows::AreaName;

/// GET /api/areas
///
/// Returns the fixed list of monitored areas.
pub async fn list_areas() -> Json<Vec<AreaName>> {
    Json(
        AREA_NAMES
            .iter()
            .map(|name| AreaName {
                area_nm: name.to_string(),
            })
            .collect(),
    )
}
