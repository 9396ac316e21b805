//! Budgets collection endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use engine::Budget;

/// Lists every budget, most recent date first.
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Budget>>, ServerError> {
    let budgets = state.budgets.read().await.list_by_date_desc()?;
    Ok(Json(budgets))
}

/// Fetches one budget by id.
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Budget>, ServerError> {
    match state.budgets.read().await.get(id)? {
        Some(budget) => Ok(Json(budget)),
        None => Err(ServerError::NotFound(id.to_string())),
    }
}

/// Inserts or replaces the budget stored under the path id.
pub async fn upsert(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(budget): Json<Budget>,
) -> Result<StatusCode, ServerError> {
    if budget.id != id {
        return Err(ServerError::Validation(
            "body id does not match path id".to_string(),
        ));
    }

    state.budgets.write().await.upsert(&budget)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes one budget by id.
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    if state.budgets.write().await.remove(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound(id.to_string()))
    }
}
