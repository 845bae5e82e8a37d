use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use stockledger_application::NewItem;
use stockledger_core::{CategoryId, ItemId};

use crate::dto::{CreateItemRequest, ItemResponse, UpdateItemRequest};
use crate::error::ApiResult;
use crate::handlers::categories::ListParams;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct SearchParams {
    pub query: String,
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<ItemResponse>)> {
    let item = state
        .inventory_service
        .create_item(NewItem {
            name: payload.name,
            description: payload.description,
            quantity: payload.quantity,
            category_id: CategoryId::new(payload.category_id),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

pub async fn list_items_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let items = state
        .inventory_service
        .list_items(params.into_query())
        .await?
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(Json(items))
}

pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state.inventory_service.get_item(ItemId::new(item_id)).await?;

    Ok(Json(ItemResponse::from(item)))
}

pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(payload): Json<UpdateItemRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state
        .inventory_service
        .update_item(ItemId::new(item_id), payload.into())
        .await?;

    Ok(Json(ItemResponse::from(item)))
}

pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .inventory_service
        .delete_item(ItemId::new(item_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn search_items_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let items = state
        .inventory_service
        .search_items(&params.query)
        .await?
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(Json(items))
}
