use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use stockledger_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .route(
            "/api/categories",
            get(handlers::categories::list_categories_handler)
                .post(handlers::categories::create_category_handler),
        )
        .route(
            "/api/categories/{category_id}",
            get(handlers::categories::get_category_handler)
                .put(handlers::categories::update_category_handler)
                .delete(handlers::categories::delete_category_handler),
        )
        .route(
            "/api/categories/{category_id}/items",
            get(handlers::categories::list_category_items_handler),
        )
        .route(
            "/api/categories/{category_id}/logs",
            get(handlers::logs::list_category_logs_handler),
        )
        .route(
            "/api/items",
            get(handlers::items::list_items_handler).post(handlers::items::create_item_handler),
        )
        .route(
            "/api/items/{item_id}",
            get(handlers::items::get_item_handler)
                .put(handlers::items::update_item_handler)
                .delete(handlers::items::delete_item_handler),
        )
        .route("/api/search", get(handlers::items::search_items_handler))
        .route(
            "/api/logs/deleted-categories",
            get(handlers::logs::deleted_category_logs_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
