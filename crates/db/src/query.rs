//! Parameterized aggregation query builder.
//!
//! Every dashboard query is built here from the same three inputs: the
//! window cutoff, the caller's filters and the grouping granularity. The
//! builder emits SQL with positional `$n` placeholders plus the bind values
//! in placeholder order.
//!
//! Window filtering always compares the ingestion timestamp `reg_sysdate`
//! against the cutoff with `>=`, matching `TimeWindow::contains`.

use popdash_core::types::Timestamp;
use serde::Deserialize;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// How finely population samples are bucketed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Top-of-hour samples only (`minute = 0`).
    #[default]
    Hour,
    /// Every sub-hour bucket.
    Minute,
}

/// Optional row filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    /// Restrict to these areas. Empty means all areas.
    pub areas: Vec<String>,
    /// Restrict to one large category. Only applies to commercial queries.
    pub category: Option<String>,
}

impl QueryFilters {
    /// Build filters from raw query-string values.
    ///
    /// `areas` is a comma-separated list. Blank entries and a blank category
    /// are treated as absent.
    pub fn from_params(areas: Option<&str>, category: Option<&str>) -> Self {
        let areas = areas
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from);
        Self { areas, category }
    }
}

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Timestamp(Timestamp),
    Text(String),
    TextList(Vec<String>),
}

// ---------------------------------------------------------------------------
// WHERE clause assembly
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct WhereClause {
    conditions: Vec<String>,
    binds: Vec<BindValue>,
}

impl WhereClause {
    fn raw(&mut self, condition: &str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// Add a condition whose `{}` is replaced by the next placeholder.
    fn bound(&mut self, template: &str, value: BindValue) -> &mut Self {
        let placeholder = format!("${}", self.binds.len() + 1);
        self.conditions.push(template.replace("{}", &placeholder));
        self.binds.push(value);
        self
    }

    fn window(&mut self, column: &str, cutoff: Timestamp) -> &mut Self {
        self.bound(&format!("{column} >= {{}}"), BindValue::Timestamp(cutoff))
    }

    fn areas(&mut self, column: &str, filters: &QueryFilters) -> &mut Self {
        if !filters.areas.is_empty() {
            self.bound(
                &format!("{column} = ANY({{}})"),
                BindValue::TextList(filters.areas.clone()),
            );
        }
        self
    }

    fn category(&mut self, column: &str, filters: &QueryFilters) -> &mut Self {
        if let Some(category) = &filters.category {
            self.bound(&format!("{column} = {{}}"), BindValue::Text(category.clone()));
        }
        self
    }

    fn render(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A ready-to-run aggregation query.
#[derive(Debug, Clone)]
pub struct AggregationQuery {
    sql: String,
    binds: Vec<BindValue>,
}

impl AggregationQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }

    /// Peak payment per (bucket, category) over the population/commercial
    /// join. Only top-of-hour buckets join.
    pub fn category_peaks(cutoff: Timestamp, filters: &QueryFilters) -> Self {
        let mut clause = WhereClause::default();
        clause
            .raw("p.reg_date_minute = 0")
            .window("p.reg_sysdate", cutoff)
            .areas("p.area_nm", filters)
            .category("r.rsb_lrg_ctgr", filters);

        let sql = format!(
            "SELECT p.reg_date, p.reg_date_hour, p.reg_date_minute, r.rsb_lrg_ctgr, \
                    MAX(r.rsb_sh_payment_amt_max) AS max_amt \
             FROM current_population p \
             INNER JOIN commercial_rsb r \
                 ON p.area_nm = r.area_nm \
                 AND p.reg_date = r.reg_date \
                 AND p.reg_date_hour = r.reg_hour \
                 AND p.reg_date_minute = r.reg_date_minute \
             {} \
             GROUP BY p.reg_date, p.reg_date_hour, p.reg_date_minute, r.rsb_lrg_ctgr \
             ORDER BY p.reg_date DESC, p.reg_date_hour DESC, p.reg_date_minute DESC, \
                      r.rsb_lrg_ctgr",
            clause.render()
        );
        Self {
            sql,
            binds: clause.binds,
        }
    }

    /// Average population per hour across the selected areas.
    pub fn hourly_average(cutoff: Timestamp, filters: &QueryFilters) -> Self {
        let mut clause = WhereClause::default();
        clause.window("reg_sysdate", cutoff).areas("area_nm", filters);

        let sql = format!(
            "SELECT reg_date, reg_date_hour, AVG(ppltn_max) AS cnt \
             FROM current_population \
             {} \
             GROUP BY reg_date, reg_date_hour \
             ORDER BY reg_date DESC, reg_date_hour DESC",
            clause.render()
        );
        Self {
            sql,
            binds: clause.binds,
        }
    }

    /// Raw per-area samples; duplicates are left for the client to average.
    pub fn area_samples(
        cutoff: Timestamp,
        filters: &QueryFilters,
        granularity: Granularity,
    ) -> Self {
        let mut clause = WhereClause::default();
        clause.window("reg_sysdate", cutoff);
        if granularity == Granularity::Hour {
            clause.raw("reg_date_minute = 0");
        }
        clause.areas("area_nm", filters);

        let sql = format!(
            "SELECT reg_date, reg_date_hour, reg_date_minute, area_nm, ppltn_max \
             FROM current_population \
             {} \
             ORDER BY reg_date DESC, reg_date_hour DESC, reg_date_minute DESC, area_nm",
            clause.render()
        );
        Self {
            sql,
            binds: clause.binds,
        }
    }

    /// Min/max averages per (bucket, area).
    pub fn bucket_detail(cutoff: Timestamp, filters: &QueryFilters) -> Self {
        let (inner, binds) = Self::bucket_detail_body(cutoff, filters);
        let sql = format!(
            "{inner} \
             ORDER BY reg_date DESC, reg_date_hour DESC, reg_date_minute DESC, area_nm"
        );
        Self { sql, binds }
    }

    /// The most recent (bucket, area) detail row for each area.
    pub fn latest_bucket_per_area(cutoff: Timestamp, filters: &QueryFilters) -> Self {
        let (inner, binds) = Self::bucket_detail_body(cutoff, filters);
        let sql = format!(
            "SELECT DISTINCT ON (area_nm) \
                    reg_date, reg_date_hour, reg_date_minute, area_nm, \
                    avg_ppltn_min, avg_ppltn_max \
             FROM ({inner}) t \
             ORDER BY area_nm, reg_date DESC, reg_date_hour DESC, reg_date_minute DESC"
        );
        Self { sql, binds }
    }

    /// Average population per area in the single most recently ingested
    /// bucket. Not windowed: the latest bucket is shown however old it is.
    pub fn area_now() -> Self {
        let sql = "\
            SELECT area_nm, AVG(ppltn_max) AS cnt \
            FROM current_population \
            WHERE (reg_date, reg_date_hour, reg_date_minute) = ( \
                SELECT reg_date, reg_date_hour, reg_date_minute \
                FROM current_population \
                ORDER BY reg_sysdate DESC, id DESC \
                LIMIT 1 \
            ) \
            GROUP BY area_nm \
            ORDER BY area_nm"
            .to_string();
        Self {
            sql,
            binds: Vec::new(),
        }
    }

    fn bucket_detail_body(cutoff: Timestamp, filters: &QueryFilters) -> (String, Vec<BindValue>) {
        let mut clause = WhereClause::default();
        clause.window("reg_sysdate", cutoff).areas("area_nm", filters);

        let sql = format!(
            "SELECT reg_date, reg_date_hour, reg_date_minute, area_nm, \
                    AVG(ppltn_min) AS avg_ppltn_min, AVG(ppltn_max) AS avg_ppltn_max \
             FROM current_population \
             {} \
             GROUP BY reg_date, reg_date_hour, reg_date_minute, area_nm",
            clause.render()
        );
        (sql, clause.binds)
    }

    /// Bind every value in order and fetch all rows.
    pub async fn fetch_all<T>(self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        let Self { sql, binds } = self;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for bind in binds {
            query = match bind {
                BindValue::Timestamp(ts) => query.bind(ts),
                BindValue::Text(text) => query.bind(text),
                BindValue::TextList(list) => query.bind(list),
            };
        }
        query.fetch_all(pool).await
    }
}
