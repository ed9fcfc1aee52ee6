//! Wire row types.
//!
//! Each struct is both the decoded shape of an aggregation query (behind the
//! `sqlx` feature) and the JSON shape served to clients. Rust fields follow
//! the lowercase column names; JSON keys keep the upper-case names the
//! dashboard front end has always read.

use serde::{Deserialize, Serialize};

use crate::bucket::TimeBucket;
use crate::error::CoreError;
use crate::series::SeriesRow;
use crate::types::{SampleDate, Timestamp};

// ---------------------------------------------------------------------------
// Stored samples
// ---------------------------------------------------------------------------

/// One row of `current_population`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PopulationSample {
    #[serde(rename = "AREA_NM")]
    pub area_nm: String,
    #[serde(rename = "REG_DATE")]
    pub reg_date: SampleDate,
    #[serde(rename = "REG_DATE_HOUR")]
    pub reg_date_hour: i16,
    #[serde(rename = "REG_DATE_MINUTE")]
    pub reg_date_minute: i16,
    #[serde(rename = "PPLTN_MIN")]
    pub ppltn_min: f64,
    #[serde(rename = "PPLTN_MAX")]
    pub ppltn_max: f64,
    /// Ingestion timestamp, distinct from the logical sample time.
    #[serde(rename = "REG_SYSDATE")]
    pub reg_sysdate: Timestamp,
}

/// One row of `commercial_rsb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CommercialSample {
    #[serde(rename = "AREA_NM")]
    pub area_nm: String,
    #[serde(rename = "REG_DATE")]
    pub reg_date: SampleDate,
    #[serde(rename = "REG_HOUR")]
    pub reg_hour: i16,
    #[serde(rename = "REG_DATE_MINUTE")]
    pub reg_date_minute: i16,
    #[serde(rename = "RSB_LRG_CTGR")]
    pub rsb_lrg_ctgr: String,
    #[serde(rename = "RSB_SH_PAYMENT_AMT_MAX")]
    pub rsb_sh_payment_amt_max: f64,
    #[serde(rename = "REG_SYSDATE")]
    pub reg_sysdate: Timestamp,
}

// ---------------------------------------------------------------------------
// Aggregation rows
// ---------------------------------------------------------------------------

/// Peak payment per (bucket, category), from the population/commercial join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CategoryPeakRow {
    #[serde(rename = "REG_DATE")]
    pub reg_date: SampleDate,
    #[serde(rename = "REG_DATE_HOUR")]
    pub reg_date_hour: i16,
    #[serde(rename = "REG_DATE_MINUTE")]
    pub reg_date_minute: i16,
    #[serde(rename = "RSB_LRG_CTGR")]
    pub rsb_lrg_ctgr: String,
    #[serde(rename = "MAX_AMT")]
    pub max_amt: Option<f64>,
}

/// Average population per hour across all areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HourlyPopulationRow {
    #[serde(rename = "REG_DATE")]
    pub reg_date: SampleDate,
    #[serde(rename = "REG_DATE_HOUR")]
    pub reg_date_hour: i16,
    #[serde(rename = "CNT")]
    pub cnt: Option<f64>,
}

/// A single population observation for one area, un-aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AreaPopulationRow {
    #[serde(rename = "REG_DATE")]
    pub reg_date: SampleDate,
    #[serde(rename = "REG_DATE_HOUR")]
    pub reg_date_hour: i16,
    #[serde(rename = "REG_DATE_MINUTE")]
    pub reg_date_minute: i16,
    #[serde(rename = "AREA_NM")]
    pub area_nm: String,
    #[serde(rename = "PPLTN_MAX")]
    pub ppltn_max: Option<f64>,
}

/// Average population per area in the latest ingested bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AreaNowRow {
    #[serde(rename = "AREA_NM")]
    pub area_nm: String,
    #[serde(rename = "CNT")]
    pub cnt: Option<f64>,
}

/// Min/max population averages per (bucket, area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PopulationDetailRow {
    #[serde(rename = "DATE")]
    pub reg_date: SampleDate,
    #[serde(rename = "HOUR")]
    pub reg_date_hour: i16,
    #[serde(rename = "MINUTE")]
    pub reg_date_minute: i16,
    #[serde(rename = "AREA_NM")]
    pub area_nm: String,
    #[serde(rename = "AVG_PPLTN_MIN")]
    pub avg_ppltn_min: Option<f64>,
    #[serde(rename = "AVG_PPLTN_MAX")]
    pub avg_ppltn_max: Option<f64>,
}

impl PopulationDetailRow {
    /// Midpoint of the min/max estimates, or whichever one is present.
    pub fn midpoint(&self) -> Option<f64> {
        match (self.avg_ppltn_min, self.avg_ppltn_max) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// `GET /api/population/detail` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationDetail {
    /// Every (bucket, area) in the window.
    pub total_data: Vec<PopulationDetailRow>,
    /// Latest bucket per area.
    pub area_data: Vec<PopulationDetailRow>,
    pub hourly_avg: Vec<HourlyPopulationRow>,
}

/// `GET /api/all-data` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllData {
    pub population: Vec<PopulationSample>,
    pub commercial: Vec<CommercialSample>,
}

/// One entry of `GET /api/areas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaName {
    #[serde(rename = "AREA_NM")]
    pub area_nm: String,
}

// ---------------------------------------------------------------------------
// Series adapters
// ---------------------------------------------------------------------------

impl SeriesRow for CategoryPeakRow {
    fn series_key(&self) -> &str {
        &self.rsb_lrg_ctgr
    }

    fn bucket(&self) -> Result<TimeBucket, CoreError> {
        TimeBucket::new(self.reg_date, self.reg_date_hour, self.reg_date_minute)
    }

    fn value(&self) -> Option<f64> {
        self.max_amt
    }
}

impl SeriesRow for AreaPopulationRow {
    fn series_key(&self) -> &str {
        &self.area_nm
    }

    fn bucket(&self) -> Result<TimeBucket, CoreError> {
        TimeBucket::new(self.reg_date, self.reg_date_hour, self.reg_date_minute)
    }

    fn value(&self) -> Option<f64> {
        self.ppltn_max
    }
}

impl SeriesRow for PopulationDetailRow {
    fn series_key(&self) -> &str {
        &self.area_nm
    }

    fn bucket(&self) -> Result<TimeBucket, CoreError> {
        TimeBucket::new(self.reg_date, self.reg_date_hour, self.reg_date_minute)
    }

    fn value(&self) -> Option<f64> {
        self.midpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(min: Option<f64>, max: Option<f64>) -> PopulationDetailRow {
        PopulationDetailRow {
            reg_date: SampleDate::from_ymd_opt(2025, 5, 13).unwrap(),
            reg_date_hour: 9,
            reg_date_minute: 0,
            area_nm: "명동 관광특구".into(),
            avg_ppltn_min: min,
            avg_ppltn_max: max,
        }
    }

    #[test]
    fn midpoint_averages_min_and_max() {
        assert_eq!(detail(Some(100.0), Some(300.0)).midpoint(), Some(200.0));
    }

    #[test]
    fn midpoint_uses_the_single_present_estimate() {
        assert_eq!(detail(None, Some(300.0)).midpoint(), Some(300.0));
        assert_eq!(detail(Some(100.0), None).midpoint(), Some(100.0));
        assert_eq!(detail(None, None).midpoint(), None);
    }

    #[test]
    fn category_peak_serializes_with_upper_case_keys() {
        let row = CategoryPeakRow {
            reg_date: SampleDate::from_ymd_opt(2025, 5, 13).unwrap(),
            reg_date_hour: 14,
            reg_date_minute: 0,
            rsb_lrg_ctgr: "음식·음료".into(),
            max_amt: Some(1500.0),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["REG_DATE"], "2025-05-13");
        assert_eq!(json["REG_DATE_HOUR"], 14);
        assert_eq!(json["RSB_LRG_CTGR"], "음식·음료");
        assert_eq!(json["MAX_AMT"], 1500.0);
    }

    #[test]
    fn detail_envelope_uses_camel_case_keys() {
        let detail = PopulationDetail {
            total_data: vec![],
            area_data: vec![],
            hourly_avg: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("totalData").is_some());
        assert!(json.get("areaData").is_some());
        assert!(json.get("hourlyAvg").is_some());
    }
}
