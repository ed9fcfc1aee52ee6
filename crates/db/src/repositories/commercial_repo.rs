//! Repository for the `commercial_rsb` table and its join with population.

use popdash_core::rows::{CategoryPeakRow, CommercialSample};
use popdash_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::CreateCommercialSample;
use crate::query::{AggregationQuery, QueryFilters};

/// Column list for `commercial_rsb` SELECT queries.
const COLUMNS: &str = "\
    area_nm, reg_date, reg_hour, reg_date_minute, \
    rsb_lrg_ctgr, rsb_sh_payment_amt_max, reg_sysdate";

/// Provides queries over commercial payment samples.
pub struct CommercialRepo;

impl CommercialRepo {
    /// Insert one sample and return it as stored.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateCommercialSample,
    ) -> Result<CommercialSample, sqlx::Error> {
        let query = format!(
            "INSERT INTO commercial_rsb \
                 (area_nm, reg_date, reg_hour, reg_date_minute, \
                  rsb_lrg_ctgr, rsb_sh_payment_amt_max, reg_sysdate) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommercialSample>(&query)
            .bind(&input.area_nm)
            .bind(input.reg_date)
            .bind(input.reg_hour)
            .bind(input.reg_date_minute)
            .bind(&input.rsb_lrg_ctgr)
            .bind(input.rsb_sh_payment_amt_max)
            .bind(input.reg_sysdate)
            .fetch_one(pool)
            .await
    }

    /// Peak payment per (bucket, category) for top-of-hour buckets that
    /// have a matching population sample, most recent first.
    pub async fn category_peaks(
        pool: &PgPool,
        cutoff: Timestamp,
        filters: &QueryFilters,
    ) -> Result<Vec<CategoryPeakRow>, sqlx::Error> {
        AggregationQuery::category_peaks(cutoff, filters)
            .fetch_all(pool)
            .await
    }

    /// The most recently ingested samples.
    pub async fn latest(pool: &PgPool, limit: i64) -> Result<Vec<CommercialSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM commercial_rsb \
             ORDER BY reg_sysdate DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, CommercialSample>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
