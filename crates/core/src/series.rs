//! Regrouping of flat aggregation rows into chart series.
//!
//! Rows are regrouped by a secondary key (area or category) crossed with
//! their time bucket in one pass, building `key -> bucket -> values` before
//! any aligned array is emitted. Each output series has exactly one cell per
//! distinct bucket label; cells without an observation are `None`.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::areas::AREA_NAMES;
use crate::bucket::TimeBucket;
use crate::error::CoreError;
use crate::palette::{color_for, SeriesColor};

/// A row that can be placed on a chart.
pub trait SeriesRow {
    /// Name of the series this row belongs to.
    fn series_key(&self) -> &str;

    /// Time bucket the row describes.
    fn bucket(&self) -> Result<TimeBucket, CoreError>;

    /// Observed value; `None` marks a row that exists but carries no number.
    fn value(&self) -> Option<f64>;
}

/// One named, time-aligned array of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub color: SeriesColor,
}

/// Labels plus the series aligned to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Sorted `YYYY-MM-DD HH:MM` bucket labels, or the single label of a
    /// [`snapshot`].
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Regroup `rows` into label-aligned series.
///
/// Duplicate rows for the same (key, bucket) are averaged. Keys whose cells
/// are all `None` produce no series. Fails only if a row carries an
/// out-of-range hour or minute.
pub fn regroup<R: SeriesRow>(rows: &[R]) -> Result<ChartData, CoreError> {
    let mut buckets: BTreeSet<TimeBucket> = BTreeSet::new();
    let mut cells: HashMap<&str, HashMap<TimeBucket, Vec<f64>>> = HashMap::new();

    for row in rows {
        let bucket = row.bucket()?;
        buckets.insert(bucket);

        let cell = cells
            .entry(row.series_key())
            .or_default()
            .entry(bucket)
            .or_default();
        if let Some(value) = row.value().filter(|v| v.is_finite()) {
            cell.push(value);
        }
    }

    let buckets: Vec<TimeBucket> = buckets.into_iter().collect();

    let mut keys: Vec<&str> = cells.keys().copied().collect();
    keys.sort_by(|a, b| series_rank(a).cmp(&series_rank(b)));

    let series = keys
        .into_iter()
        .filter_map(|key| {
            let by_bucket = &cells[key];
            let values: Vec<Option<f64>> = buckets
                .iter()
                .map(|bucket| by_bucket.get(bucket).and_then(|v| average(v)))
                .collect();

            values.iter().any(Option::is_some).then(|| Series {
                name: key.to_string(),
                color: color_for(key),
                values,
            })
        })
        .collect();

    Ok(ChartData {
        labels: buckets.iter().map(TimeBucket::label).collect(),
        series,
    })
}

/// Chart with one label and a single-value series per key, for views that
/// have no time axis.
///
/// Repeated keys are averaged and keys without a finite value are dropped,
/// the same as [`regroup`] does per bucket. An empty chart has no label.
pub fn snapshot<'a, I>(label: &str, points: I) -> ChartData
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut cells: HashMap<&str, Vec<f64>> = HashMap::new();
    for (key, value) in points {
        let cell = cells.entry(key).or_default();
        if let Some(value) = value.filter(|v| v.is_finite()) {
            cell.push(value);
        }
    }

    let mut keys: Vec<&str> = cells.keys().copied().collect();
    keys.sort_by(|a, b| series_rank(a).cmp(&series_rank(b)));

    let series: Vec<Series> = keys
        .into_iter()
        .filter_map(|key| {
            average(&cells[key]).map(|value| Series {
                name: key.to_string(),
                color: color_for(key),
                values: vec![Some(value)],
            })
        })
        .collect();

    let labels = if series.is_empty() {
        Vec::new()
    } else {
        vec![label.to_string()]
    };
    ChartData { labels, series }
}

/// Known areas first in their display order, then everything else by name.
fn series_rank(key: &str) -> (usize, &str) {
    let position = AREA_NAMES
        .iter()
        .position(|name| *name == key)
        .unwrap_or(usize::MAX);
    (position, key)
}

/// Mean of `values`, summed in ascending order so the result does not
/// depend on the order rows arrived in.
fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted.iter().sum::<f64>() / sorted.len() as f64)
}
