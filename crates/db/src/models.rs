//! Insert DTOs for the sample tables.
//!
//! Read-side row types live in `popdash_core::rows`; ingestion normally
//! happens outside this service, so these exist for seeding and tests.

use popdash_core::types::{SampleDate, Timestamp};
use serde::Deserialize;

/// DTO for inserting a `current_population` row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePopulationSample {
    pub area_nm: String,
    pub reg_date: SampleDate,
    pub reg_date_hour: i16,
    pub reg_date_minute: i16,
    pub ppltn_min: f64,
    pub ppltn_max: f64,
    /// Ingestion time; the database default (`NOW()`) applies when `None`.
    pub reg_sysdate: Option<Timestamp>,
}

/// DTO for inserting a `commercial_rsb` row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommercialSample {
    pub area_nm: String,
    pub reg_date: SampleDate,
    pub reg_hour: i16,
    pub reg_date_minute: i16,
    pub rsb_lrg_ctgr: String,
    pub rsb_sh_payment_amt_max: f64,
    pub reg_sysdate: Option<Timestamp>,
}
