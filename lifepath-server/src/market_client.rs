//! Outbound client for the live labor-market source.
//!
//! One JSON POST per data kind. Any transport error or non-2xx response is
//! reported to the caller, which falls back to the static tables; the
//! client itself never substitutes data. No retries or explicit timeouts
//! beyond the reqwest defaults.

use serde_json::json;
use tracing::debug;

use lifepath_core::market::{CostOfLivingData, JobMarketData, SalaryData};

/// Error type for live market lookups
#[derive(Debug, thiserror::Error)]
pub enum MarketClientError {
    #[error("no live market source configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("market source returned status {0}")]
    Status(reqwest::StatusCode),
}

/// HTTP client for the configured live data source
pub struct MarketClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl MarketClient {
    /// Build from `MARKET_API_URL`; unset means every lookup reports
    /// `NotConfigured` and the caller falls straight back to the tables.
    pub fn from_env() -> Self {
        Self::new(std::env::var("MARKET_API_URL").ok())
    }

    pub fn new(base_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, MarketClientError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or(MarketClientError::NotConfigured)?;
        let url = format!("{}/{}", base.trim_end_matches('/'), path);
        debug!(%url, "live market lookup");

        let resp = self.http.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(MarketClientError::Status(resp.status()));
        }
        Ok(resp.json::<T>().await?)
    }

    pub async fn fetch_salary(
        &self,
        occupation: &str,
        location: &str,
    ) -> Result<SalaryData, MarketClientError> {
        self.post_json(
            "salary",
            json!({ "occupation": occupation, "location": location }),
        )
        .await
    }

    pub async fn fetch_cost_of_living(
        &self,
        city: &str,
        state: &str,
    ) -> Result<CostOfLivingData, MarketClientError> {
        self.post_json("cost-of-living", json!({ "city": city, "state": state }))
            .await
    }

    pub async fn fetch_job_market(
        &self,
        occupation: &str,
    ) -> Result<JobMarketData, MarketClientError> {
        self.post_json("job-market", json!({ "occupation": occupation }))
            .await
    }
}
