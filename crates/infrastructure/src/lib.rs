//! PostgreSQL-backed adapters for the Stockledger repository ports.

#![forbid(unsafe_code)]

mod postgres_audit_log_repository;
mod postgres_inventory_repository;

pub use postgres_audit_log_repository::PostgresAuditLogRepository;
pub use postgres_inventory_repository::PostgresInventoryRepository;
