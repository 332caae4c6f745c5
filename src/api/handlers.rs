use axum::{
    body::Bytes,
    extract::{Form, Query, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use super::assembler::{assemble, CatalogStatus, LockoutView, OptionView};
use super::error::ApiError;
use crate::catalog::CatalogStore;
use crate::common::errors::TradeError;
use crate::engine::{parse_timestamp, CalculateParams, TradeEngine};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub engine: Arc<TradeEngine>,
}

/// Sets the search cancel flag when the request future is dropped
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().starts_with("application/json"))
}

/// Ranks trade options for the posted request.
///
/// Accepts the page's urlencoded form or a JSON body with the same fields.
///
/// # Errors
/// Returns the mapped status for validation, lookup and search failures.
pub async fn calculate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<OptionView>>, ApiError> {
    let params = if is_json(&headers) {
        serde_json::from_slice::<CalculateParams>(&body)
            .map_err(|e| TradeError::InvalidRequest(e.to_string()))?
    } else {
        CalculateParams::from_form(&body)?
    };
    let request = params.into_request(state.engine.utc_offset())?;
    let strategy = request.strategy;

    let catalog = state.store.snapshot();
    let engine = Arc::clone(&state.engine);
    let cancelled = Arc::new(AtomicBool::new(false));
    let deadline = engine.deadline().with_cancel_flag(Arc::clone(&cancelled));
    let _guard = CancelOnDrop(cancelled);

    let options = tokio::task::spawn_blocking(move || engine.search(&catalog, &request, &deadline))
        .await
        .map_err(|e| TradeError::Internal(format!("search task failed: {e}")))??;

    Ok(Json(assemble(&options, strategy)))
}

/// Lists every player name in the catalog, sorted.
pub async fn players(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.snapshot().names())
}

#[derive(Debug, Deserialize)]
pub struct LockoutParams {
    pub player_name: Option<String>,
    #[serde(rename = "simulateDateTime")]
    pub simulate_date_time: Option<String>,
}

fn lockout_status(state: &AppState, params: LockoutParams) -> Result<Json<LockoutView>, ApiError> {
    let name = params
        .player_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| TradeError::InvalidRequest("player_name is required".into()))?;
    let simulated = params
        .simulate_date_time
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_timestamp(&raw, state.engine.utc_offset()))
        .transpose()?;

    let is_locked = state
        .engine
        .check_lockout(&state.store.snapshot(), name.trim(), simulated)?;
    Ok(Json(LockoutView { is_locked }))
}

/// Lockout check with query parameters.
///
/// # Errors
/// Returns 404 for an unknown player and 400 for a malformed time.
pub async fn check_player_lockout(
    State(state): State<AppState>,
    Query(params): Query<LockoutParams>,
) -> Result<Json<LockoutView>, ApiError> {
    lockout_status(&state, params)
}

/// Lockout check with form fields.
///
/// # Errors
/// Returns 404 for an unknown player and 400 for a malformed time.
pub async fn check_player_lockout_form(
    State(state): State<AppState>,
    Form(params): Form<LockoutParams>,
) -> Result<Json<LockoutView>, ApiError> {
    lockout_status(&state, params)
}

/// Reports the loaded catalog.
pub async fn health(State(state): State<AppState>) -> Json<CatalogStatus> {
    Json(CatalogStatus::new("ok", &state.store.snapshot()))
}

/// Reloads the catalog from its source.
///
/// # Errors
/// Returns 500 when the source fails; the previous catalog stays active.
pub async fn admin_reload(State(state): State<AppState>) -> Result<Json<CatalogStatus>, ApiError> {
    let catalog = state.store.reload().await?;
    info!(players = catalog.len(), "Catalog reloaded on request");
    Ok(Json(CatalogStatus::new("reloaded", &catalog)))
}
