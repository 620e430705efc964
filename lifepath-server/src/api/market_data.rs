//! MarketDataService - labor-market data endpoints
//!
//! Endpoints:
//! - POST /lifepath.MarketDataService/GetSalaryData
//! - POST /lifepath.MarketDataService/GetCostOfLiving
//! - POST /lifepath.MarketDataService/GetJobMarket
//! - POST /lifepath.MarketDataService/GetScenarioData
//!
//! Every lookup tries the configured live source first; any transport
//! error or non-2xx response falls back to the static tables. A lookup
//! never fails outright.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use lifepath_core::market::{
    fallback_cost_of_living, fallback_job_market, fallback_salary, CostOfLivingData,
    JobMarketData, SalaryData,
};
use lifepath_core::scenario::{build_scenario, MarketSnapshot, QuestionnaireAnswers, Scenario};

use super::ApiState;

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/lifepath.MarketDataService/GetSalaryData", post(get_salary))
        .route(
            "/lifepath.MarketDataService/GetCostOfLiving",
            post(get_cost_of_living),
        )
        .route("/lifepath.MarketDataService/GetJobMarket", post(get_job_market))
        .route(
            "/lifepath.MarketDataService/GetScenarioData",
            post(get_scenario_data),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct SalaryRequest {
    pub occupation: String,
    pub location: String,
}

#[derive(Serialize)]
pub struct SalaryResponse {
    pub data: SalaryData,
    /// "live" or "fallback"
    pub source: &'static str,
}

#[derive(Deserialize)]
pub struct CostOfLivingRequest {
    pub city: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Serialize)]
pub struct CostOfLivingResponse {
    pub data: CostOfLivingData,
    pub source: &'static str,
}

#[derive(Deserialize)]
pub struct JobMarketRequest {
    pub occupation: String,
}

#[derive(Serialize)]
pub struct JobMarketResponse {
    pub data: JobMarketData,
    pub source: &'static str,
}

#[derive(Deserialize)]
pub struct ScenarioDataRequest {
    pub occupation: String,
    pub location: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub priorities: Vec<String>,
}

#[derive(Serialize)]
pub struct ScenarioDataResponse {
    pub salary: SalaryData,
    pub cost_of_living: CostOfLivingData,
    pub job_market: JobMarketData,
    pub scenario: Scenario,
    /// True only when all three lookups fell back to the static tables
    pub live_data_unavailable: bool,
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_salary(
    State(state): State<ApiState>,
    Json(req): Json<SalaryRequest>,
) -> Json<SalaryResponse> {
    match state.market.fetch_salary(&req.occupation, &req.location).await {
        Ok(data) => Json(SalaryResponse {
            data,
            source: "live",
        }),
        Err(e) => {
            warn!(occupation = %req.occupation, location = %req.location,
                  "live salary lookup failed, using fallback: {e}");
            state.metrics.record_fallback();
            Json(SalaryResponse {
                data: fallback_salary(&req.occupation, &req.location),
                source: "fallback",
            })
        }
    }
}

async fn get_cost_of_living(
    State(state): State<ApiState>,
    Json(req): Json<CostOfLivingRequest>,
) -> Json<CostOfLivingResponse> {
    match state.market.fetch_cost_of_living(&req.city, &req.state).await {
        Ok(data) => Json(CostOfLivingResponse {
            data,
            source: "live",
        }),
        Err(e) => {
            warn!(city = %req.city, "live cost-of-living lookup failed, using fallback: {e}");
            state.metrics.record_fallback();
            Json(CostOfLivingResponse {
                data: fallback_cost_of_living(&req.city, &req.state),
                source: "fallback",
            })
        }
    }
}

async fn get_job_market(
    State(state): State<ApiState>,
    Json(req): Json<JobMarketRequest>,
) -> Json<JobMarketResponse> {
    match state.market.fetch_job_market(&req.occupation).await {
        Ok(data) => Json(JobMarketResponse {
            data,
            source: "live",
        }),
        Err(e) => {
            warn!(occupation = %req.occupation, "live job-market lookup failed, using fallback: {e}");
            state.metrics.record_fallback();
            Json(JobMarketResponse {
                data: fallback_job_market(&req.occupation),
                source: "fallback",
            })
        }
    }
}

/// All three lookups issued concurrently; results merge by field
/// assignment with no ordering dependency between them. Each falls back
/// on its own failure.
async fn get_scenario_data(
    State(state): State<ApiState>,
    Json(req): Json<ScenarioDataRequest>,
) -> Json<ScenarioDataResponse> {
    let (salary_res, col_res, job_res) = tokio::join!(
        state.market.fetch_salary(&req.occupation, &req.location),
        state.market.fetch_cost_of_living(&req.location, &req.state),
        state.market.fetch_job_market(&req.occupation),
    );

    let mut fallbacks = 0;
    let salary = salary_res.unwrap_or_else(|e| {
        warn!("live salary lookup failed, using fallback: {e}");
        fallbacks += 1;
        fallback_salary(&req.occupation, &req.location)
    });
    let cost_of_living = col_res.unwrap_or_else(|e| {
        warn!("live cost-of-living lookup failed, using fallback: {e}");
        fallbacks += 1;
        fallback_cost_of_living(&req.location, &req.state)
    });
    let job_market = job_res.unwrap_or_else(|e| {
        warn!("live job-market lookup failed, using fallback: {e}");
        fallbacks += 1;
        fallback_job_market(&req.occupation)
    });

    for _ in 0..fallbacks {
        state.metrics.record_fallback();
    }

    let answers = QuestionnaireAnswers {
        occupation: req.occupation.clone(),
        location: req.location.clone(),
        priorities: req.priorities.clone(),
    };
    let snapshot = MarketSnapshot {
        salary,
        cost_of_living,
        job_market,
    };
    let scenario = build_scenario(&answers, &snapshot);

    Json(ScenarioDataResponse {
        salary: snapshot.salary,
        cost_of_living: snapshot.cost_of_living,
        job_market: snapshot.job_market,
        scenario,
        live_data_unavailable: fallbacks == 3,
    })
}
