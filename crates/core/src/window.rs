//! Trailing time windows.
//!
//! Every windowed query filters on the ingestion timestamp (`reg_sysdate`),
//! not on the logical sample time. The cutoff is inclusive: a row ingested
//! exactly `hours` before `now` is inside the window. The db layer binds
//! [`TimeWindow::cutoff`] as a parameter and compares with `>=`, so SQL and
//! [`TimeWindow::contains`] agree.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default window length when the caller does not ask for one.
pub const DEFAULT_WINDOW_HOURS: u32 = 24;

/// Longest window a caller may request (one week).
pub const MAX_WINDOW_HOURS: u32 = 168;

/// A trailing window of whole hours ending at query execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    hours: u32,
}

impl TimeWindow {
    pub fn new(hours: u32) -> Result<Self, CoreError> {
        if hours == 0 || hours > MAX_WINDOW_HOURS {
            return Err(CoreError::Validation(format!(
                "window must be between 1 and {MAX_WINDOW_HOURS} hours, got {hours}"
            )));
        }
        Ok(Self { hours })
    }

    /// Resolve an optional request parameter against a configured default.
    pub fn from_param(hours: Option<u32>, default_hours: u32) -> Result<Self, CoreError> {
        Self::new(hours.unwrap_or(default_hours))
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Earliest ingestion timestamp still inside the window.
    pub fn cutoff(&self, now: Timestamp) -> Timestamp {
        now - Duration::hours(i64::from(self.hours))
    }

    /// Whether a row ingested at `ingested_at` falls inside the window.
    pub fn contains(&self, now: Timestamp, ingested_at: Timestamp) -> bool {
        ingested_at >= self.cutoff(now)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            hours: DEFAULT_WINDOW_HOURS,
        }
    }
}
