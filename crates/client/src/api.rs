//! HTTP access to the popdash API.

use std::time::Duration;

use popdash_core::change::PopulationSummary;
use popdash_core::rows::{AreaNowRow, AreaPopulationRow, CategoryPeakRow, PopulationDetail};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::filter::DashboardFilter;

/// Thin wrapper around a pre-configured `reqwest` client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/population/by-area` with the current filter.
    pub async fn population_by_area(
        &self,
        filter: &DashboardFilter,
    ) -> Result<Vec<AreaPopulationRow>, ClientError> {
        self.get_json("/api/population/by-area", &filter.query_pairs())
            .await
    }

    /// `GET /api/data` with the current filter.
    pub async fn category_peaks(
        &self,
        filter: &DashboardFilter,
    ) -> Result<Vec<CategoryPeakRow>, ClientError> {
        self.get_json("/api/data", &filter.query_pairs()).await
    }

    /// `GET /api/population/detail` with the current filter.
    pub async fn population_detail(
        &self,
        filter: &DashboardFilter,
    ) -> Result<PopulationDetail, ClientError> {
        self.get_json("/api/population/detail", &filter.query_pairs())
            .await
    }

    /// `GET /api/population/area-now`. The endpoint takes no filter.
    pub async fn area_now(&self) -> Result<Vec<AreaNowRow>, ClientError> {
        self.get_json("/api/population/area-now", &[]).await
    }

    /// `GET /api/population/summary`.
    pub async fn population_summary(&self) -> Result<PopulationSummary, ClientError> {
        self.get_json("/api/population/summary", &[]).await
    }

    /// Execute a single GET, check the status and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}
