//! CanvasService - life-canvas event endpoints
//!
//! Endpoints:
//! - POST /lifepath.CanvasService/AddEvent
//! - POST /lifepath.CanvasService/UpdateEvent
//! - POST /lifepath.CanvasService/DeleteEvent
//! - POST /lifepath.CanvasService/ConnectEvents
//! - POST /lifepath.CanvasService/GetCanvas
//!
//! Each user's collection is loaded wholesale, mutated via the core, and
//! written back wholesale (last writer wins). Insights are regenerated
//! from the full collection on every response and never persisted.

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use lifepath_core::canvas::{EventCanvas, EventPatch, LifeEvent, NewEvent};
use lifepath_core::insights::{generate_insights, LifeInsight};

use super::ApiState;

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/lifepath.CanvasService/AddEvent", post(add_event))
        .route("/lifepath.CanvasService/UpdateEvent", post(update_event))
        .route("/lifepath.CanvasService/DeleteEvent", post(delete_event))
        .route("/lifepath.CanvasService/ConnectEvents", post(connect_events))
        .route("/lifepath.CanvasService/GetCanvas", post(get_canvas))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct AddEventRequest {
    pub user_id: String,
    pub event: NewEvent,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub user_id: String,
    pub event_id: String,
    pub patch: EventPatch,
}

#[derive(Deserialize)]
pub struct DeleteEventRequest {
    pub user_id: String,
    pub event_id: String,
}

#[derive(Deserialize)]
pub struct ConnectEventsRequest {
    pub user_id: String,
    pub event_id_a: String,
    pub event_id_b: String,
}

#[derive(Deserialize)]
pub struct GetCanvasRequest {
    pub user_id: String,
}

/// Common response: the full event collection plus freshly derived
/// insights. A persistence failure is reported as non-fatal.
#[derive(Serialize)]
pub struct CanvasResponse {
    pub success: bool,
    pub failure_reason: String,
    /// Id of the event this call created, when it created one
    pub event_id: Option<String>,
    pub events: Vec<LifeEvent>,
    pub insights: Vec<LifeInsight>,
}

impl CanvasResponse {
    fn ok(canvas: EventCanvas, event_id: Option<String>) -> Self {
        let insights = generate_insights(&canvas.events, Utc::now());
        Self {
            success: true,
            failure_reason: String::new(),
            event_id,
            events: canvas.events,
            insights,
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            success: false,
            failure_reason: reason,
            event_id: None,
            events: Vec::new(),
            insights: Vec::new(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn load_canvas(state: &ApiState, user_id: &str) -> Result<EventCanvas, String> {
    match state.canvas.load(user_id).await {
        Ok(canvas) => Ok(canvas.unwrap_or_default()),
        Err(e) => {
            error!(user_id, "failed to load canvas: {e}");
            Err(format!("failed to load canvas: {e}"))
        }
    }
}

async fn store_canvas(state: &ApiState, user_id: &str, canvas: &EventCanvas) -> Result<(), String> {
    match state.canvas.save(user_id, canvas).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(user_id, "failed to persist canvas: {e}");
            Err(format!("failed to persist canvas: {e}"))
        }
    }
}

async fn add_event(
    State(state): State<ApiState>,
    Json(req): Json<AddEventRequest>,
) -> Json<CanvasResponse> {
    let mut canvas = match load_canvas(&state, &req.user_id).await {
        Ok(c) => c,
        Err(reason) => return Json(CanvasResponse::failed(reason)),
    };

    let event_id = canvas.add_event(req.event, Utc::now()).id.clone();
    if let Err(reason) = store_canvas(&state, &req.user_id, &canvas).await {
        return Json(CanvasResponse::failed(reason));
    }
    Json(CanvasResponse::ok(canvas, Some(event_id)))
}

async fn update_event(
    State(state): State<ApiState>,
    Json(req): Json<UpdateEventRequest>,
) -> Json<CanvasResponse> {
    let mut canvas = match load_canvas(&state, &req.user_id).await {
        Ok(c) => c,
        Err(reason) => return Json(CanvasResponse::failed(reason)),
    };

    if canvas.update_event(&req.event_id, req.patch, Utc::now()) {
        if let Err(reason) = store_canvas(&state, &req.user_id, &canvas).await {
            return Json(CanvasResponse::failed(reason));
        }
    }
    Json(CanvasResponse::ok(canvas, None))
}

async fn delete_event(
    State(state): State<ApiState>,
    Json(req): Json<DeleteEventRequest>,
) -> Json<CanvasResponse> {
    let mut canvas = match load_canvas(&state, &req.user_id).await {
        Ok(c) => c,
        Err(reason) => return Json(CanvasResponse::failed(reason)),
    };

    if canvas.delete_event(&req.event_id) {
        if let Err(reason) = store_canvas(&state, &req.user_id, &canvas).await {
            return Json(CanvasResponse::failed(reason));
        }
    }
    Json(CanvasResponse::ok(canvas, None))
}

async fn connect_events(
    State(state): State<ApiState>,
    Json(req): Json<ConnectEventsRequest>,
) -> Json<CanvasResponse> {
    let mut canvas = match load_canvas(&state, &req.user_id).await {
        Ok(c) => c,
        Err(reason) => return Json(CanvasResponse::failed(reason)),
    };

    // Missing ids are a silent no-op; state is never corrupted
    if canvas.connect_events(&req.event_id_a, &req.event_id_b) {
        if let Err(reason) = store_canvas(&state, &req.user_id, &canvas).await {
            return Json(CanvasResponse::failed(reason));
        }
    }
    Json(CanvasResponse::ok(canvas, None))
}

async fn get_canvas(
    State(state): State<ApiState>,
    Json(req): Json<GetCanvasRequest>,
) -> Json<CanvasResponse> {
    match load_canvas(&state, &req.user_id).await {
        Ok(canvas) => Json(CanvasResponse::ok(canvas, None)),
        Err(reason) => Json(CanvasResponse::failed(reason)),
    }
}
