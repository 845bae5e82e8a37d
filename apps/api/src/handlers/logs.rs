use axum::Json;
use axum::extract::{Path, State};

use stockledger_core::CategoryId;

use crate::dto::LogEntryResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_category_logs_handler(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<Vec<LogEntryResponse>>> {
    let entries = state
        .audit_log_service
        .list_for_category(CategoryId::new(category_id))
        .await?
        .into_iter()
        .map(LogEntryResponse::from)
        .collect();

    Ok(Json(entries))
}

pub async fn deleted_category_logs_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<LogEntryResponse>>> {
    let entries = state
        .audit_log_service
        .deleted_category_history()
        .await?
        .into_iter()
        .map(LogEntryResponse::from)
        .collect();

    Ok(Json(entries))
}
