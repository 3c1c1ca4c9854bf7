//! Dashboard REST API handlers

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::{get, post}};
use citydash::prelude::{CityRecord, Composition, recompose};
use tracing::debug;

use crate::AppState;
use crate::error::Result;
use crate::models::{ControlsRequest, ControlsResponse};

/// Build the dashboard API router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/controls", get(get_controls))
        .route("/cities", get(list_cities))
        .route("/compose", post(compose))
}

/// GET /api/v1/controls - Control layout for the served variant
async fn get_controls(State(state): State<Arc<AppState>>) -> Json<ControlsResponse> {
    Json(ControlsResponse::describe(state.variant, &state.dataset))
}

/// GET /api/v1/cities - Full dataset, most populous first
async fn list_cities(State(state): State<Arc<AppState>>) -> Json<Vec<CityRecord>> {
    Json(state.dataset.records().to_vec())
}

/// POST /api/v1/compose - Charts for a snapshot of the controls
async fn compose(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ControlsRequest>,
) -> Result<Json<Composition>> {
    let ui = req.into_state(state.variant)?;
    let composition = recompose(&state.dataset, state.variant, &ui);
    debug!(
        "Composed {} charts for {:?}",
        composition.charts().len(),
        ui.checklist
    );
    Ok(Json(composition))
}
