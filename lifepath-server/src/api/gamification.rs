//! GamificationService endpoints - action tracking, milestones, stats
//!
//! Endpoints:
//! - POST /lifepath.GamificationService/TrackAction
//! - POST /lifepath.GamificationService/AddMilestone
//! - POST /lifepath.GamificationService/CompleteMilestone
//! - POST /lifepath.GamificationService/GetStats
//!
//! State is one document per user, loaded and written wholesale. Unlock
//! notices ride back in the response; the client owns the toast.

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use lifepath_core::achievements::{Achievement, Unlock, UserStats};
use lifepath_core::gamification::GamificationService;
use lifepath_core::milestones::{Milestone, NewMilestone};

use super::ApiState;

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/lifepath.GamificationService/TrackAction", post(track_action))
        .route(
            "/lifepath.GamificationService/AddMilestone",
            post(add_milestone),
        )
        .route(
            "/lifepath.GamificationService/CompleteMilestone",
            post(complete_milestone),
        )
        .route("/lifepath.GamificationService/GetStats", post(get_stats))
}

// ============================================================================
// Request/Response Types
// ============================================================================

fn default_value() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct TrackActionRequest {
    pub user_id: String,
    pub action_type: String,
    #[serde(default = "default_value")]
    pub value: u32,
}

#[derive(Deserialize)]
pub struct AddMilestoneRequest {
    pub user_id: String,
    pub milestone: NewMilestone,
}

#[derive(Deserialize)]
pub struct CompleteMilestoneRequest {
    pub user_id: String,
    pub milestone_id: String,
}

#[derive(Deserialize)]
pub struct GetStatsRequest {
    pub user_id: String,
}

#[derive(Serialize)]
pub struct GamificationResponse {
    pub success: bool,
    pub failure_reason: String,
    /// Id of the milestone this call created, when it created one
    pub milestone_id: Option<String>,
    pub unlocks: Vec<Unlock>,
    pub stats: UserStats,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub failure_reason: String,
    pub stats: UserStats,
    pub achievements: Vec<Achievement>,
    pub milestones: Vec<Milestone>,
}

impl GamificationResponse {
    fn failed(reason: String) -> Self {
        Self {
            success: false,
            failure_reason: reason,
            milestone_id: None,
            unlocks: Vec::new(),
            stats: UserStats::new(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn load_state(state: &ApiState, user_id: &str) -> Result<GamificationService, String> {
    match state.gamification.load(user_id).await {
        Ok(svc) => Ok(svc.unwrap_or_default()),
        Err(e) => {
            error!(user_id, "failed to load gamification state: {e}");
            Err(format!("failed to load gamification state: {e}"))
        }
    }
}

async fn store_state(
    state: &ApiState,
    user_id: &str,
    svc: &GamificationService,
) -> Result<(), String> {
    match state.gamification.save(user_id, svc).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(user_id, "failed to persist gamification state: {e}");
            Err(format!("failed to persist gamification state: {e}"))
        }
    }
}

async fn track_action(
    State(state): State<ApiState>,
    Json(req): Json<TrackActionRequest>,
) -> Json<GamificationResponse> {
    let mut svc = match load_state(&state, &req.user_id).await {
        Ok(s) => s,
        Err(reason) => return Json(GamificationResponse::failed(reason)),
    };

    let unlocks = svc.track_action(&req.action_type, req.value, Utc::now());
    if let Err(reason) = store_state(&state, &req.user_id, &svc).await {
        return Json(GamificationResponse::failed(reason));
    }

    Json(GamificationResponse {
        success: true,
        failure_reason: String::new(),
        milestone_id: None,
        unlocks,
        stats: svc.stats,
    })
}

async fn add_milestone(
    State(state): State<ApiState>,
    Json(req): Json<AddMilestoneRequest>,
) -> Json<GamificationResponse> {
    let mut svc = match load_state(&state, &req.user_id).await {
        Ok(s) => s,
        Err(reason) => return Json(GamificationResponse::failed(reason)),
    };

    let (milestone_id, unlocks) = svc.add_milestone(req.milestone, Utc::now());
    if let Err(reason) = store_state(&state, &req.user_id, &svc).await {
        return Json(GamificationResponse::failed(reason));
    }

    Json(GamificationResponse {
        success: true,
        failure_reason: String::new(),
        milestone_id: Some(milestone_id),
        unlocks,
        stats: svc.stats,
    })
}

async fn complete_milestone(
    State(state): State<ApiState>,
    Json(req): Json<CompleteMilestoneRequest>,
) -> Json<GamificationResponse> {
    let mut svc = match load_state(&state, &req.user_id).await {
        Ok(s) => s,
        Err(reason) => return Json(GamificationResponse::failed(reason)),
    };

    let unlocks = svc.complete_milestone(&req.milestone_id, Utc::now());
    if let Err(reason) = store_state(&state, &req.user_id, &svc).await {
        return Json(GamificationResponse::failed(reason));
    }

    Json(GamificationResponse {
        success: true,
        failure_reason: String::new(),
        milestone_id: None,
        unlocks,
        stats: svc.stats,
    })
}

async fn get_stats(
    State(state): State<ApiState>,
    Json(req): Json<GetStatsRequest>,
) -> Json<StatsResponse> {
    match load_state(&state, &req.user_id).await {
        Ok(svc) => Json(StatsResponse {
            success: true,
            failure_reason: String::new(),
            stats: svc.stats,
            achievements: svc.tracker.achievements,
            milestones: svc.milestones.milestones,
        }),
        Err(reason) => Json(StatsResponse {
            success: false,
            failure_reason: reason,
            stats: UserStats::new(),
            achievements: Vec::new(),
            milestones: Vec::new(),
        }),
    }
}
