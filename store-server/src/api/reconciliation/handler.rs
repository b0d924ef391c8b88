//! Reconciliation API Handlers

use axum::{Json, extract::State};

use crate::core::AppState;
use crate::store::ReconciliationFailure;
use crate::utils::{AppResponse, AppResult, ok};

/// List reconciliation failure records
pub async fn list_failures(
    State(state): State<AppState>,
) -> AppResult<Json<AppResponse<Vec<ReconciliationFailure>>>> {
    Ok(ok(state.failures.list()))
}
