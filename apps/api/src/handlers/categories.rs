use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use stockledger_application::{ListQuery, NewCategory};
use stockledger_core::CategoryId;

use crate::dto::{
    CategoryResponse, CreateCategoryRequest, ItemResponse, UpdateCategoryRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct ListParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl ListParams {
    pub fn into_query(self) -> ListQuery {
        let defaults = ListQuery::default();
        ListQuery {
            skip: self.skip.unwrap_or(defaults.skip),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let category = state
        .inventory_service
        .create_category(NewCategory {
            name: payload.name,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

pub async fn list_categories_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let categories = state
        .inventory_service
        .list_categories(params.into_query())
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();

    Ok(Json(categories))
}

pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = state
        .inventory_service
        .get_category(CategoryId::new(category_id))
        .await?;

    Ok(Json(CategoryResponse::from(category)))
}

pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = state
        .inventory_service
        .update_category(CategoryId::new(category_id), payload.into())
        .await?;

    Ok(Json(CategoryResponse::from(category)))
}

pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .inventory_service
        .delete_category(CategoryId::new(category_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_category_items_handler(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let items = state
        .inventory_service
        .list_items_in_category(CategoryId::new(category_id))
        .await?
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(Json(items))
}
