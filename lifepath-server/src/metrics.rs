//! Server Metrics - lightweight request metrics with Prometheus + JSON export
//!
//! Uses lock-free atomics for all counters. No external metrics crate needed.
//!
//! ## Endpoints
//! - `GET /metrics` - Prometheus text format
//! - `GET /metrics/json` - JSON format

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::api::ApiState;

/// Shared metrics state (all lock-free atomics)
#[derive(Debug)]
pub struct ServerMetrics {
    /// Total HTTP requests served
    pub total_requests: AtomicU64,
    /// Total request errors (4xx + 5xx)
    pub total_errors: AtomicU64,
    /// Cumulative request duration in microseconds
    pub total_duration_us: AtomicU64,
    /// Market lookups answered from the static fallback tables
    pub fallback_lookups: AtomicU64,
    /// Server start time (for uptime calculation)
    pub start_time: Instant,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
            total_duration_us: AtomicU64::new(0),
            fallback_lookups: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }
}

impl ServerMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_request(&self, duration_us: u64, is_error: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_duration_us
            .fetch_add(duration_us, Ordering::Relaxed);
        if is_error {
            self.total_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_fallback(&self) {
        self.fallback_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    pub fn requests_per_second(&self) -> f64 {
        let total = self.total_requests.load(Ordering::Relaxed) as f64;
        let uptime = self.uptime_secs();
        if uptime > 0.0 {
            total / uptime
        } else {
            0.0
        }
    }

    pub fn avg_duration_ms(&self) -> f64 {
        let total = self.total_requests.load(Ordering::Relaxed);
        let dur_us = self.total_duration_us.load(Ordering::Relaxed);
        if total > 0 {
            (dur_us as f64 / total as f64) / 1000.0
        } else {
            0.0
        }
    }
}

// ============================================================================
// Axum Middleware - automatic request tracking
// ============================================================================

/// Records request count and duration for every HTTP request.
pub async fn metrics_middleware(
    State(state): State<ApiState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let resp = next.run(req).await;
    let duration_us = start.elapsed().as_micros() as u64;
    let is_error = resp.status().is_client_error() || resp.status().is_server_error();

    state.metrics.record_request(duration_us, is_error);
    resp
}

// ============================================================================
// GET /metrics - Prometheus text exposition format
// ============================================================================

pub async fn prometheus_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let m = &state.metrics;
    let total_requests = m.total_requests.load(Ordering::Relaxed);
    let total_errors = m.total_errors.load(Ordering::Relaxed);
    let fallback_lookups = m.fallback_lookups.load(Ordering::Relaxed);
    let uptime = m.uptime_secs();
    let rps = m.requests_per_second();
    let avg_req_duration_s = m.avg_duration_ms() / 1000.0;

    let body = format!(
        "# HELP lifepath_requests_total Total HTTP requests served\n\
         # TYPE lifepath_requests_total counter\n\
         lifepath_requests_total {total_requests}\n\
         \n\
         # HELP lifepath_request_errors_total Total HTTP request errors (4xx/5xx)\n\
         # TYPE lifepath_request_errors_total counter\n\
         lifepath_request_errors_total {total_errors}\n\
         \n\
         # HELP lifepath_fallback_lookups_total Market lookups served from static tables\n\
         # TYPE lifepath_fallback_lookups_total counter\n\
         lifepath_fallback_lookups_total {fallback_lookups}\n\
         \n\
         # HELP lifepath_request_duration_seconds Average request duration\n\
         # TYPE lifepath_request_duration_seconds gauge\n\
         lifepath_request_duration_seconds {avg_req_duration_s:.6}\n\
         \n\
         # HELP lifepath_requests_per_second Current request throughput\n\
         # TYPE lifepath_requests_per_second gauge\n\
         lifepath_requests_per_second {rps:.2}\n\
         \n\
         # HELP lifepath_uptime_seconds Server uptime\n\
         # TYPE lifepath_uptime_seconds gauge\n\
         lifepath_uptime_seconds {uptime:.1}\n",
    );

    ([("content-type", "text/plain; version=0.0.4")], body)
}

// ============================================================================
// GET /metrics/json - JSON format
// ============================================================================

#[derive(Serialize)]
pub struct MetricsJson {
    pub total_requests: u64,
    pub total_errors: u64,
    pub fallback_lookups: u64,
    pub avg_duration_ms: f64,
    pub requests_per_second: f64,
    pub uptime_secs: f64,
}

pub async fn json_metrics_handler(State(state): State<ApiState>) -> Json<MetricsJson> {
    let m = &state.metrics;
    Json(MetricsJson {
        total_requests: m.total_requests.load(Ordering::Relaxed),
        total_errors: m.total_errors.load(Ordering::Relaxed),
        fallback_lookups: m.fallback_lookups.load(Ordering::Relaxed),
        avg_duration_ms: m.avg_duration_ms(),
        requests_per_second: m.requests_per_second(),
        uptime_secs: m.uptime_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_request_accumulates() {
        let m = ServerMetrics::default();
        m.record_request(1_000, false);
        m.record_request(3_000, true);

        assert_eq!(m.total_requests.load(Ordering::Relaxed), 2);
        assert_eq!(m.total_errors.load(Ordering::Relaxed), 1);
        assert!((m.avg_duration_ms() - 2.0).abs() < f64::EPSILON);
    }
}
