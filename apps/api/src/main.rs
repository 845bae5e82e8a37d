//! Stockledger API composition root.

#![forbid(unsafe_code)]

mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use stockledger_application::{AuditLogService, InventoryService};
use stockledger_core::AppError;
use stockledger_infrastructure::{PostgresAuditLogRepository, PostgresInventoryRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    let pool = api_services::connect_and_migrate(&database_url).await?;

    if migrate_only {
        info!("migrations applied, exiting");
        return Ok(());
    }

    let inventory_repository = Arc::new(PostgresInventoryRepository::new(pool.clone()));
    let audit_log_repository = Arc::new(PostgresAuditLogRepository::new(pool));
    let app_state = AppState {
        inventory_service: InventoryService::new(inventory_repository),
        audit_log_service: AuditLogService::new(audit_log_repository),
    };

    let router = api_router::build_router(app_state, &frontend_url)?;

    let ip = IpAddr::from_str(&api_host).map_err(|_| {
        AppError::Validation(format!("API_HOST '{api_host}' is not a valid IP address"))
    })?;
    let address = SocketAddr::new(ip, api_port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Storage(format!("failed to bind {address}: {error}")))?;

    info!(%address, "stockledger api listening");

    axum::serve(listener, router)
        .await
        .map_err(|error| AppError::Storage(format!("api server failed: {error}")))?;

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
