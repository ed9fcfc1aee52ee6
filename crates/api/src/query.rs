//! Shared query parameter types for API handlers.

use axum::extract::FromRequestParts;
use popdash_core::window::TimeWindow;
use popdash_db::query::{Granularity, QueryFilters};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `Query` extractor whose rejection goes through [`AppError`], so a
/// malformed query string gets the same `{error, code}` body as every other
/// failure.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Window and filter parameters (`?hours=&area=&category=&granularity=`).
///
/// `area` is a comma-separated list. Parameters a route does not use are
/// accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
    pub hours: Option<u32>,
    pub area: Option<String>,
    pub category: Option<String>,
    pub granularity: Option<Granularity>,
}

impl WindowParams {
    /// Resolve the requested window, falling back to `default_hours`.
    pub fn window(&self, default_hours: u32) -> AppResult<TimeWindow> {
        Ok(TimeWindow::from_param(self.hours, default_hours)?)
    }

    pub fn filters(&self) -> QueryFilters {
        QueryFilters::from_params(self.area.as_deref(), self.category.as_deref())
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity.unwrap_or_default()
    }
}
