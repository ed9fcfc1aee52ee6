//! Change-percentage helpers for the summary cards.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::rows::HourlyPopulationRow;

/// Reported change when the previous value is zero and the current is not.
pub const ZERO_BASELINE_CHANGE_PCT: f64 = 100.0;

/// Label shown when no change can be computed.
pub const UNAVAILABLE_LABEL: &str = "N/A";

/// Result of comparing two observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    Value(f64),
    Unavailable,
}

impl PercentChange {
    pub fn as_option(self) -> Option<f64> {
        match self {
            Self::Value(pct) => Some(pct),
            Self::Unavailable => None,
        }
    }

    /// Signed one-decimal label, e.g. `+12.5%`.
    pub fn label(self) -> String {
        match self {
            Self::Value(pct) => format!("{pct:+.1}%"),
            Self::Unavailable => UNAVAILABLE_LABEL.to_string(),
        }
    }
}

/// Percentage change from `previous` to `current`.
///
/// Never yields infinity or NaN: a zero baseline gives `0` when nothing
/// changed and [`ZERO_BASELINE_CHANGE_PCT`] otherwise.
pub fn percentage_change(previous: Option<f64>, current: Option<f64>) -> PercentChange {
    let (Some(previous), Some(current)) = (previous, current) else {
        return PercentChange::Unavailable;
    };
    if !previous.is_finite() || !current.is_finite() {
        return PercentChange::Unavailable;
    }
    if previous == 0.0 {
        return if current == 0.0 {
            PercentChange::Value(0.0)
        } else {
            PercentChange::Value(ZERO_BASELINE_CHANGE_PCT)
        };
    }
    PercentChange::Value((current - previous) / previous * 100.0)
}

/// `GET /api/population/summary` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSummary {
    /// Average population in the latest hour.
    pub current: Option<f64>,
    /// Average population in the hour immediately before it; `None` when
    /// that hour has no samples.
    pub previous: Option<f64>,
    pub change_pct: Option<f64>,
    pub change_label: String,
}

/// Compare the most recent hour in `rows` with the hour directly before it,
/// whatever order the rows are in. A gap between the two latest hours makes
/// the change unavailable.
pub fn summarize_hourly(rows: &[HourlyPopulationRow]) -> PopulationSummary {
    let mut latest: Vec<&HourlyPopulationRow> = rows.iter().collect();
    latest.sort_by(|a, b| (b.reg_date, b.reg_date_hour).cmp(&(a.reg_date, a.reg_date_hour)));

    let current_row = latest.first();
    let current = current_row.and_then(|r| r.cnt);
    let previous = match (current_row, latest.get(1)) {
        (Some(cur), Some(prev)) if is_previous_hour(prev, cur) => prev.cnt,
        _ => None,
    };
    let change = percentage_change(previous, current);

    PopulationSummary {
        current,
        previous,
        change_pct: change.as_option(),
        change_label: change.label(),
    }
}

fn hour_start(row: &HourlyPopulationRow) -> Option<NaiveDateTime> {
    let hour = u32::try_from(row.reg_date_hour).ok()?;
    row.reg_date.and_hms_opt(hour, 0, 0)
}

fn is_previous_hour(prev: &HourlyPopulationRow, cur: &HourlyPopulationRow) -> bool {
    match (hour_start(prev), hour_start(cur)) {
        (Some(prev), Some(cur)) => cur - prev == Duration::hours(1),
        _ => false,
    }
}
