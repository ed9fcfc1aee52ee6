//! Repository for the `current_population` table.

use popdash_core::rows::{
    AreaNowRow, AreaPopulationRow, HourlyPopulationRow, PopulationDetailRow, PopulationSample,
};
use popdash_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::CreatePopulationSample;
use crate::query::{AggregationQuery, Granularity, QueryFilters};

/// Column list for `current_population` SELECT queries.
const COLUMNS: &str = "\
    area_nm, reg_date, reg_date_hour, reg_date_minute, \
    ppltn_min, ppltn_max, reg_sysdate";

/// Provides aggregation queries over population samples.
pub struct PopulationRepo;

impl PopulationRepo {
    /// Insert one sample and return it as stored.
    pub async fn insert(
        pool: &PgPool,
        input: &CreatePopulationSample,
    ) -> Result<PopulationSample, sqlx::Error> {
        let query = format!(
            "INSERT INTO current_population \
                 (area_nm, reg_date, reg_date_hour, reg_date_minute, ppltn_min, ppltn_max, reg_sysdate) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PopulationSample>(&query)
            .bind(&input.area_nm)
            .bind(input.reg_date)
            .bind(input.reg_date_hour)
            .bind(input.reg_date_minute)
            .bind(input.ppltn_min)
            .bind(input.ppltn_max)
            .bind(input.reg_sysdate)
            .fetch_one(pool)
            .await
    }

    /// Hourly average population, most recent hour first.
    pub async fn hourly_average(
        pool: &PgPool,
        cutoff: Timestamp,
        filters: &QueryFilters,
    ) -> Result<Vec<HourlyPopulationRow>, sqlx::Error> {
        AggregationQuery::hourly_average(cutoff, filters)
            .fetch_all(pool)
            .await
    }

    /// Un-aggregated per-area samples, most recent bucket first.
    pub async fn area_samples(
        pool: &PgPool,
        cutoff: Timestamp,
        filters: &QueryFilters,
        granularity: Granularity,
    ) -> Result<Vec<AreaPopulationRow>, sqlx::Error> {
        AggregationQuery::area_samples(cutoff, filters, granularity)
            .fetch_all(pool)
            .await
    }

    /// Min/max averages for every (bucket, area) in the window.
    pub async fn bucket_detail(
        pool: &PgPool,
        cutoff: Timestamp,
        filters: &QueryFilters,
    ) -> Result<Vec<PopulationDetailRow>, sqlx::Error> {
        AggregationQuery::bucket_detail(cutoff, filters)
            .fetch_all(pool)
            .await
    }

    /// The latest (bucket, area) detail row per area.
    pub async fn latest_bucket_per_area(
        pool: &PgPool,
        cutoff: Timestamp,
        filters: &QueryFilters,
    ) -> Result<Vec<PopulationDetailRow>, sqlx::Error> {
        AggregationQuery::latest_bucket_per_area(cutoff, filters)
            .fetch_all(pool)
            .await
    }

    /// Average population per area in the most recently ingested bucket.
    pub async fn area_now(pool: &PgPool) -> Result<Vec<AreaNowRow>, sqlx::Error> {
        AggregationQuery::area_now().fetch_all(pool).await
    }

    /// The most recently ingested samples.
    pub async fn latest(pool: &PgPool, limit: i64) -> Result<Vec<PopulationSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM current_population \
             ORDER BY reg_sysdate DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, PopulationSample>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total number of stored samples.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM current_population")
            .fetch_one(pool)
            .await
    }
}
