//! ProfileService - personalization profile and recommendations
//!
//! Endpoints:
//! - POST /lifepath.ProfileService/UpsertProfile
//! - POST /lifepath.ProfileService/GetProfile
//! - POST /lifepath.ProfileService/GetRecommendations
//!
//! Upserts merge a partial update into the stored profile (or a fresh
//! default) and write the whole row back. Recommendations are pure
//! threshold rules over the stored profile; users with no stored profile
//! get the default-profile recommendations.

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use lifepath_core::profile::{
    recommendations_for, PersonalizationProfile, ProfileUpdate, Recommendation,
};

use super::ApiState;

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/lifepath.ProfileService/UpsertProfile", post(upsert_profile))
        .route("/lifepath.ProfileService/GetProfile", post(get_profile))
        .route(
            "/lifepath.ProfileService/GetRecommendations",
            post(get_recommendations),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct UpsertProfileRequest {
    pub user_id: String,
    pub update: ProfileUpdate,
}

#[derive(Deserialize)]
pub struct ProfileRequest {
    pub user_id: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub failure_reason: String,
    pub profile: Option<PersonalizationProfile>,
}

#[derive(Serialize)]
pub struct RecommendationsResponse {
    pub success: bool,
    pub failure_reason: String,
    pub recommendations: Vec<Recommendation>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn upsert_profile(
    State(state): State<ApiState>,
    Json(req): Json<UpsertProfileRequest>,
) -> Json<ProfileResponse> {
    let now = Utc::now();
    let mut profile = match state.profiles.get(&req.user_id).await {
        Ok(Some(p)) => p,
        Ok(None) => PersonalizationProfile::new(&req.user_id, now),
        Err(e) => {
            error!(user_id = %req.user_id, "failed to load profile: {e}");
            return Json(ProfileResponse {
                success: false,
                failure_reason: format!("failed to load profile: {e}"),
                profile: None,
            });
        }
    };

    profile.merge(req.update, now);

    match state.profiles.upsert(&profile).await {
        Ok(()) => Json(ProfileResponse {
            success: true,
            failure_reason: String::new(),
            profile: Some(profile),
        }),
        Err(e) => {
            error!(user_id = %req.user_id, "failed to persist profile: {e}");
            Json(ProfileResponse {
                success: false,
                failure_reason: format!("failed to persist profile: {e}"),
                profile: None,
            })
        }
    }
}

async fn get_profile(
    State(state): State<ApiState>,
    Json(req): Json<ProfileRequest>,
) -> Json<ProfileResponse> {
    match state.profiles.get(&req.user_id).await {
        Ok(profile) => Json(ProfileResponse {
            success: true,
            failure_reason: String::new(),
            profile,
        }),
        Err(e) => {
            error!(user_id = %req.user_id, "failed to load profile: {e}");
            Json(ProfileResponse {
                success: false,
                failure_reason: format!("failed to load profile: {e}"),
                profile: None,
            })
        }
    }
}

async fn get_recommendations(
    State(state): State<ApiState>,
    Json(req): Json<ProfileRequest>,
) -> Json<RecommendationsResponse> {
    let profile = match state.profiles.get(&req.user_id).await {
        Ok(Some(p)) => p,
        Ok(None) => PersonalizationProfile::new(&req.user_id, Utc::now()),
        Err(e) => {
            error!(user_id = %req.user_id, "failed to load profile: {e}");
            return Json(RecommendationsResponse {
                success: false,
                failure_reason: format!("failed to load profile: {e}"),
                recommendations: Vec::new(),
            });
        }
    };

    Json(RecommendationsResponse {
        success: true,
        failure_reason: String::new(),
        recommendations: recommendations_for(&profile),
    })
}
